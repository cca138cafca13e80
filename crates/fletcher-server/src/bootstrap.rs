//! High-level bootstrap entry points.
//!
//! These functions string the startup pipeline together: load external
//! configuration, install components, merge, resolve, bind. Every stage is
//! awaited in order and the chain short-circuits on the first failure — a
//! partially configured server never starts listening.

use fletcher_core::{Component, Config, FletcherError, FletcherResult};

use crate::args::{RunArgs, DEFAULT_SERVER_PORT};
use crate::install::install;
use crate::resolve::resolve;
use crate::server::{Server, ServerHandle};

/// Resolves the main handler from `config` and binds the server.
///
/// The port is taken from the invocation arguments, then the `serverPort`
/// configuration key, then [`DEFAULT_SERVER_PORT`].
///
/// # Errors
///
/// Any resolution error (see [`resolve`]) or a bind failure.
pub async fn run_with_config(config: Config, args: &RunArgs) -> FletcherResult<ServerHandle> {
    let handler = resolve(&config, args).await?;
    let port = args
        .server_port
        .or_else(|| config.server_port())
        .unwrap_or(DEFAULT_SERVER_PORT);
    Server::new(handler, port).bind().await
}

/// Installs `components`, merges in external configuration, and starts the
/// server.
///
/// When the invocation arguments name a configuration file it is loaded
/// first and merged as the earlier source — the installed component
/// configuration wins on conflicting keys, external values fill the gaps.
///
/// # Errors
///
/// A configuration load failure, any installation failure (see
/// [`install`]), any resolution error, or a bind failure.
pub async fn run_with_components(
    components: &[Component],
    args: &RunArgs,
) -> FletcherResult<ServerHandle> {
    let input_config = match args.config.as_deref() {
        Some(path) => {
            fletcher_config::load_file(path).map_err(|source| FletcherError::ConfigLoad {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?
        }
        None => Config::new(),
    };

    let component_config = install(components).await?;
    let config = Config::merge([input_config, component_config]);

    run_with_config(config, args).await
}

//! Component installation.
//!
//! Components install in declaration order, and the order is significant:
//! each descriptor's builder runs against the configuration accumulated
//! from all previously installed descriptors, so a later component may read
//! a capability an earlier one registered. The first builder failure aborts
//! the whole installation; nothing external has been committed, so there is
//! no rollback.

use std::sync::Arc;

use fletcher_core::{Component, Config, FletcherError, FletcherResult};

/// Installs a list of component descriptors into a configuration fragment.
///
/// A descriptor's declared requirements are validated against the
/// accumulated configuration before its builder runs, and each builder then
/// runs once against that configuration — either way, an ordering mistake
/// (a component depending on one declared after it) surfaces here instead
/// of at resolution time. The descriptor's builder is registered under its
/// name in the handleable builder registry; resolution re-invokes it with
/// the final merged configuration.
///
/// An empty descriptor list yields an empty configuration and never errors.
///
/// # Errors
///
/// Returns [`FletcherError::Configuration`] for a duplicate component name,
/// or [`FletcherError::Install`] naming the first descriptor whose declared
/// requirement is unmet or whose builder failed, with the underlying error
/// as source.
///
/// # Example
///
/// ```
/// use fletcher_core::{simple_handler_fn, Component};
/// use fletcher_server::install;
///
/// # tokio_test::block_on(async {
/// let greeter = Component::simple("greeter", "text", |_config| async {
///     Ok(simple_handler_fn(|args| async move {
///         Ok(format!("hello, {}", &args.path[1..]))
///     }))
/// });
///
/// let config = install(&[greeter]).await.unwrap();
/// assert!(config.handleable_builder("greeter").is_some());
/// # });
/// ```
pub async fn install(components: &[Component]) -> FletcherResult<Config> {
    let mut config = Config::new();

    for (index, component) in components.iter().enumerate() {
        let name = component.name();
        if config.handleable_builder(name).is_some() {
            return Err(FletcherError::configuration(format!(
                "duplicate component name `{name}` in installation run"
            )));
        }

        for required in component.requires() {
            if config.handleable_builder(required).is_none() {
                return Err(FletcherError::Install {
                    name: name.to_string(),
                    index,
                    source: Box::new(FletcherError::BuilderNotFound {
                        name: required.clone(),
                    }),
                });
            }
        }

        tracing::debug!(name, kind = %component.kind(), "installing component");
        let builder = Arc::clone(component.builder());
        if let Err(source) = builder(config.clone()).await {
            tracing::error!(name, error = %source, "component installation failed");
            return Err(FletcherError::Install {
                name: name.to_string(),
                index,
                source: Box::new(source),
            });
        }

        config.insert_handleable_builder(name, builder);
    }

    Ok(config)
}

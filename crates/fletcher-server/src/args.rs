//! Invocation arguments.
//!
//! [`RunArgs`] is the seam exposed to the command-line-parsing collaborator:
//! a plain record of the recognized invocation keys, read-only during a
//! single run. Deserialization accepts both the camelCase and the
//! dashed key spellings (`mainHttp`/`main-http`, `serverPort`/`server-port`).

use std::path::PathBuf;

use serde::Deserialize;

/// Port used when neither the invocation arguments nor the configuration
/// name one.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Arguments supplied for a single server run.
///
/// # Example
///
/// ```
/// use fletcher_server::RunArgs;
///
/// let args = RunArgs::new().with_main("greeter").with_server_port(9090);
/// assert_eq!(args.main.as_deref(), Some("greeter"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunArgs {
    /// Name of the stream-capable main handler.
    pub main: Option<String>,

    /// Name of the HTTP-capable main handler. Takes precedence over `main`.
    #[serde(rename = "mainHttp", alias = "main-http")]
    pub main_http: Option<String>,

    /// Path to an external configuration file.
    pub config: Option<PathBuf>,

    /// Listening port.
    #[serde(rename = "serverPort", alias = "server-port")]
    pub server_port: Option<u16>,
}

impl RunArgs {
    /// Creates empty invocation arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stream-capable main handler name.
    #[must_use]
    pub fn with_main(mut self, name: impl Into<String>) -> Self {
        self.main = Some(name.into());
        self
    }

    /// Sets the HTTP-capable main handler name.
    #[must_use]
    pub fn with_main_http(mut self, name: impl Into<String>) -> Self {
        self.main_http = Some(name.into());
        self
    }

    /// Sets the external configuration file path.
    #[must_use]
    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Sets the listening port.
    #[must_use]
    pub fn with_server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }
}

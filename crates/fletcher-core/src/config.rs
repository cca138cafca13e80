//! The configuration value.
//!
//! A [`Config`] maps string keys to JSON-shaped values and carries two
//! reserved registries: the handleable builder registry (name → builder)
//! populated by the component installer, and the stream handler registry
//! (name → already-built handler) used as a bridging slot by the
//! stream-to-HTTP adapter.
//!
//! Configurations are built incrementally and treated as immutable once the
//! merge/install stage completes: [`Config::merge`] produces a new value
//! instead of mutating its inputs, and clones are cheap because registry
//! entries are `Arc`-shared.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::error::{FletcherError, FletcherResult};
use crate::handler::{HandleableBuilder, StreamHandler};

/// Reserved key: name of the stream handler the bootstrap resolves by default.
pub const MAIN_KEY: &str = "main";
/// Reserved key: name of the HTTP handler the bootstrap prefers when set.
pub const MAIN_HTTP_KEY: &str = "mainHttp";
/// Reserved key: listening port for the server bootstrap.
pub const SERVER_PORT_KEY: &str = "serverPort";

/// Configuration: scalar values plus the two handler registries.
///
/// # Example
///
/// ```
/// use fletcher_core::Config;
///
/// let mut config = Config::new();
/// config.set("greet", "hello");
/// assert_eq!(config.get_str("greet"), Some("hello"));
/// ```
#[derive(Clone, Default)]
pub struct Config {
    values: HashMap<String, Value>,
    handleable_builders: HashMap<String, HandleableBuilder>,
    stream_handlers: HashMap<String, StreamHandler>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builders: Vec<&str> = self.handleable_builders.keys().map(String::as_str).collect();
        builders.sort_unstable();
        let mut handlers: Vec<&str> = self.stream_handlers.keys().map(String::as_str).collect();
        handlers.sort_unstable();
        f.debug_struct("Config")
            .field("values", &self.values)
            .field("handleable_builders", &builders)
            .field("stream_handlers", &handlers)
            .finish()
    }
}

impl Config {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from an external JSON document.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the document is not object-shaped.
    pub fn from_json(value: Value) -> FletcherResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                values: map.into_iter().collect(),
                ..Self::default()
            }),
            other => Err(FletcherError::configuration(format!(
                "configuration must be an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Gets a raw value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Gets a string value by key.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Gets an unsigned integer value by key.
    #[must_use]
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    /// Sets a value. Used only while a configuration is being constructed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// The configured stream-capable main handler name, if any.
    #[must_use]
    pub fn main(&self) -> Option<&str> {
        self.get_str(MAIN_KEY)
    }

    /// The configured HTTP-capable main handler name, if any.
    #[must_use]
    pub fn main_http(&self) -> Option<&str> {
        self.get_str(MAIN_HTTP_KEY)
    }

    /// The configured server port, if any.
    #[must_use]
    pub fn server_port(&self) -> Option<u16> {
        self.get_u64(SERVER_PORT_KEY)
            .and_then(|port| u16::try_from(port).ok())
    }

    /// Registers a handleable builder under a name.
    pub fn insert_handleable_builder(&mut self, name: impl Into<String>, builder: HandleableBuilder) {
        self.handleable_builders.insert(name.into(), builder);
    }

    /// Looks up a handleable builder by name.
    #[must_use]
    pub fn handleable_builder(&self, name: &str) -> Option<&HandleableBuilder> {
        self.handleable_builders.get(name)
    }

    /// Names present in the handleable builder registry.
    pub fn handleable_builder_names(&self) -> impl Iterator<Item = &str> {
        self.handleable_builders.keys().map(String::as_str)
    }

    /// Parks an already-built stream handler under a name (the bridging slot).
    pub fn insert_stream_handler(&mut self, name: impl Into<String>, handler: StreamHandler) {
        self.stream_handlers.insert(name.into(), handler);
    }

    /// Looks up a parked stream handler by name.
    #[must_use]
    pub fn stream_handler(&self, name: &str) -> Option<&StreamHandler> {
        self.stream_handlers.get(name)
    }

    /// Merges configurations left to right.
    ///
    /// For a key present in more than one input the rightmost value wins.
    /// The two registries merge as key-unions: a name defined in a later
    /// configuration overrides a same-named entry from an earlier one, but
    /// unrelated names from both survive. Pure; inputs are consumed, not
    /// mutated.
    ///
    /// # Example
    ///
    /// ```
    /// use fletcher_core::Config;
    ///
    /// let mut a = Config::new();
    /// a.set("greet", "hello");
    /// let mut b = Config::new();
    /// b.set("greet", "howdy");
    ///
    /// let merged = Config::merge([a, b]);
    /// assert_eq!(merged.get_str("greet"), Some("howdy"));
    /// ```
    #[must_use]
    pub fn merge<I>(configs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut merged = Self::new();
        for config in configs {
            merged.values.extend(config.values);
            merged.handleable_builders.extend(config.handleable_builders);
            merged.stream_handlers.extend(config.stream_handlers);
        }
        merged
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! # Fletcher Config
//!
//! File-based configuration loading for the Fletcher component server.
//!
//! External configuration arrives as a JSON or TOML document and is merged
//! with the configuration the component installer produces. This crate owns
//! only the file boundary: reading, parsing, and layering documents into a
//! [`fletcher_core::Config`]. The handler registries are never populated
//! from files.
//!
//! ## Example
//!
//! ```no_run
//! use fletcher_config::ConfigLoader;
//!
//! # fn main() -> Result<(), fletcher_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_file("server.json")?
//!     .load();
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/fletcher-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::{load_file, ConfigLoader};

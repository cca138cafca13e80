//! # Fletcher
//!
//! **Component-driven HTTP server bootstrap**
//!
//! Fletcher turns a declarative list of component descriptors into a
//! running HTTP server:
//!
//! - **Install** – component builders run in declaration order, each seeing
//!   the configuration accumulated so far
//! - **Resolve** – the main handler is looked up by name, with a two-tier
//!   fallback between HTTP-native and stream-based capabilities
//! - **Adapt** – stream handlers are bridged to the canonical HTTP contract
//! - **Serve** – the resolved handler is bound to a port via hyper
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fletcher::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let greeter = Component::simple("greeter", "text", |_config| async {
//!         Ok(simple_handler_fn(|args| async move {
//!             Ok(format!("hello, {}", &args.path[1..]))
//!         }))
//!     });
//!
//!     let args = RunArgs::new().with_main("greeter");
//!     let handle = run_with_components(&[greeter], &args).await?;
//!     handle.stopped().await;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/fletcher/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use fletcher_core as core;

// Re-export configuration loading
pub use fletcher_config as config;

// Re-export the pipeline and server
pub use fletcher_server as server;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use fletcher::prelude::*;
/// ```
pub mod prelude {
    pub use fletcher_core::{
        http_handler_fn, simple_handler_fn, stream_handler_fn, Capability, Component,
        ComponentKind, Config, FletcherError, FletcherResult, HandleableBuilder, Handleable,
        HandlerArgs, HttpHandler, RequestHead, ResponseHead, SimpleHandler, StreamHandler,
        Streamable,
    };

    pub use fletcher_config::{ConfigLoader, load_file};

    pub use fletcher_server::{
        adapt, install, resolve, run_with_components, run_with_config, RunArgs, Server,
        ServerHandle, ShutdownSignal, DEFAULT_SERVER_PORT,
    };
}

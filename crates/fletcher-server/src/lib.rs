//! # Fletcher Server
//!
//! Component installation, handler resolution, and HTTP bootstrap.
//!
//! The startup pipeline is a strict sequential chain of fallible async
//! steps, each beginning only after the previous one succeeds:
//!
//! ```text
//! install components → merge configs → resolve main handler → adapt → bind
//! ```
//!
//! - [`install`] runs component builders in declaration order and produces
//!   the configuration fragment holding their named builders.
//! - [`resolve`] picks the main handler name from invocation arguments or
//!   configuration, looks up its builder, and demands the required
//!   capability view.
//! - [`adapt`] bridges a stream handler to the canonical HTTP contract.
//! - [`Server`] binds the resolved HTTP handler to a listening port,
//!   delegating socket and protocol framing to hyper.
//!
//! [`run_with_components`] strings the whole chain together.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fletcher_core::{simple_handler_fn, Component};
//! use fletcher_server::{run_with_components, RunArgs};
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

#![doc(html_root_url = "https://docs.rs/fletcher-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod adapt;
mod args;
mod bootstrap;
mod bridge;
mod install;
mod resolve;
mod server;
mod shutdown;

pub use adapt::{adapt, from_bridge_config, BRIDGE_SLOT};
pub use args::{RunArgs, DEFAULT_SERVER_PORT};
pub use bootstrap::{run_with_components, run_with_config};
pub use install::install;
pub use resolve::resolve;
pub use server::{Server, ServerHandle};
pub use shutdown::ShutdownSignal;

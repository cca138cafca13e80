//! # Fletcher Core
//!
//! Core types and traits for the Fletcher component server.
//!
//! This crate provides the foundational types used throughout Fletcher:
//!
//! - [`Streamable`] - Single-consumption byte stream with an optional content type
//! - [`RequestHead`] / [`ResponseHead`] - Canonical HTTP request/response heads
//! - [`HttpHandler`] / [`StreamHandler`] - Type-erased async handler signatures
//! - [`Handleable`] - Capability union produced by component builders
//! - [`Component`] - Declarative component descriptor
//! - [`Config`] - Configuration value with the handler registries and merge
//! - [`FletcherError`] - Standard error taxonomy

#![doc(html_root_url = "https://docs.rs/fletcher-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod component;
mod config;
mod error;
mod handleable;
mod handler;
mod streamable;

pub use component::{Component, ComponentKind};
pub use config::Config;
pub use error::{BoxError, FletcherError, FletcherResult};
pub use handleable::{Capability, Handleable};
pub use handler::{
    http_handler_fn, simple_handler_fn, stream_handler_fn, HandleableBuilder, HandlerArgs,
    HttpHandler, RequestHead, ResponseHead, SimpleHandler, StreamHandler,
};
pub use streamable::Streamable;

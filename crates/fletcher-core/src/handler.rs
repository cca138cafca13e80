//! Canonical handler signatures.
//!
//! Two handler shapes exist at the core seams:
//!
//! - [`HttpHandler`] — takes a request head and a body stream, returns a
//!   response head and a body stream. This is the contract exposed to the
//!   socket-binding collaborator.
//! - [`StreamHandler`] — takes structured [`HandlerArgs`] and a body stream,
//!   returns a result stream. This is the contract consumed from handleable
//!   builders; the adapter bridges it to HTTP semantics.
//!
//! Handlers are type-erased `Arc` closures so one resolved instance can be
//! shared across concurrent in-flight requests. A handler must not assume
//! exclusive access to shared mutable state between invocations.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::config::Config;
use crate::error::FletcherResult;
use crate::handleable::Handleable;
use crate::streamable::Streamable;

/// Canonical HTTP request head: the raw URL plus a header mapping.
#[derive(Debug, Clone, Default)]
pub struct RequestHead {
    /// The raw request URL (path, query, fragment as received).
    pub url: String,
    /// Header mapping.
    pub headers: HashMap<String, String>,
}

impl RequestHead {
    /// Creates a request head for a URL with no headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Gets a header by name (case-insensitive per RFC 7230).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Canonical HTTP response head: a status code plus a header mapping.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    /// HTTP status code.
    pub status_code: u16,
    /// Header mapping.
    pub headers: HashMap<String, String>,
}

impl ResponseHead {
    /// Creates a response head with the given status and no headers.
    #[must_use]
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
        }
    }

    /// Creates a `200 OK` response head with an empty header map.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Gets a header by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Structured invocation arguments passed to a stream handler.
#[derive(Debug, Clone)]
pub struct HandlerArgs {
    /// Path component of the request URL.
    pub path: String,
    /// Mount point of the handler. Equal to `path` until nested dispatch exists.
    pub root_path: String,
    /// The originating request head.
    pub request_head: RequestHead,
}

/// Type-erased HTTP handler: `(RequestHead, Streamable) -> (ResponseHead, Streamable)`.
pub type HttpHandler = Arc<
    dyn Fn(RequestHead, Streamable) -> BoxFuture<'static, FletcherResult<(ResponseHead, Streamable)>>
        + Send
        + Sync,
>;

/// Type-erased stream handler: `(HandlerArgs, Streamable) -> Streamable`.
pub type StreamHandler =
    Arc<dyn Fn(HandlerArgs, Streamable) -> BoxFuture<'static, FletcherResult<Streamable>> + Send + Sync>;

/// Type-erased simple handler: `HandlerArgs -> String`.
///
/// Simple handlers ignore the request body and resolve to a plain value;
/// the component layer converts them into stream handlers.
pub type SimpleHandler =
    Arc<dyn Fn(HandlerArgs) -> BoxFuture<'static, FletcherResult<String>> + Send + Sync>;

/// Asynchronously produces a [`Handleable`] from the full configuration.
pub type HandleableBuilder =
    Arc<dyn Fn(Config) -> BoxFuture<'static, FletcherResult<Handleable>> + Send + Sync>;

/// Erases a plain async closure into an [`HttpHandler`].
///
/// # Example
///
/// ```
/// use fletcher_core::{http_handler_fn, ResponseHead, Streamable};
///
/// let handler = http_handler_fn(|_head, _body| async {
///     Ok((ResponseHead::ok(), Streamable::from_text("hi")))
/// });
/// # let _ = handler;
/// ```
pub fn http_handler_fn<F, Fut>(f: F) -> HttpHandler
where
    F: Fn(RequestHead, Streamable) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FletcherResult<(ResponseHead, Streamable)>> + Send + 'static,
{
    Arc::new(move |head, body| Box::pin(f(head, body)))
}

/// Erases a plain async closure into a [`StreamHandler`].
pub fn stream_handler_fn<F, Fut>(f: F) -> StreamHandler
where
    F: Fn(HandlerArgs, Streamable) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FletcherResult<Streamable>> + Send + 'static,
{
    Arc::new(move |args, body| Box::pin(f(args, body)))
}

/// Erases a plain async closure into a [`SimpleHandler`].
pub fn simple_handler_fn<F, Fut>(f: F) -> SimpleHandler
where
    F: Fn(HandlerArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = FletcherResult<String>> + Send + 'static,
{
    Arc::new(move |args| Box::pin(f(args)))
}

//! Component descriptors.
//!
//! A [`Component`] declares a named handler, its capability type, and the
//! asynchronous builder that produces it. Descriptors are immutable once
//! declared; module authors create them, the installer consumes them once,
//! in declaration order.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::config::Config;
use crate::error::FletcherResult;
use crate::handleable::Handleable;
use crate::handler::{HandleableBuilder, HttpHandler, SimpleHandler, StreamHandler};
use crate::streamable::Streamable;

/// The capability type a component descriptor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Builds an HTTP-native handler.
    HttpHandler,
    /// Builds a stream handler.
    StreamHandler,
    /// Builds a simple handler: structured args in, plain value out.
    SimpleHandler,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpHandler => f.write_str("http handler"),
            Self::StreamHandler => f.write_str("stream handler"),
            Self::SimpleHandler => f.write_str("simple handler"),
        }
    }
}

/// A declarative component descriptor.
///
/// # Example
///
/// ```
/// use fletcher_core::{simple_handler_fn, Component};
///
/// let greeter = Component::simple("greeter", "text", |_config| async {
///     Ok(simple_handler_fn(|args| async move {
///         Ok(format!("hello, {}", &args.path[1..]))
///     }))
/// });
/// assert_eq!(greeter.name(), "greeter");
/// ```
#[derive(Clone)]
pub struct Component {
    name: String,
    kind: ComponentKind,
    input_type: Option<String>,
    output_type: Option<String>,
    requires: Vec<String>,
    builder: HandleableBuilder,
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("input_type", &self.input_type)
            .field("output_type", &self.output_type)
            .finish_non_exhaustive()
    }
}

impl Component {
    /// Declares a component whose builder produces an HTTP handler.
    pub fn http<F, Fut>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(Config) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FletcherResult<HttpHandler>> + Send + 'static,
    {
        let build = Arc::new(build);
        Self {
            name: name.into(),
            kind: ComponentKind::HttpHandler,
            input_type: None,
            requires: Vec::new(),
            output_type: None,
            builder: Arc::new(move |config| {
                let build = Arc::clone(&build);
                Box::pin(async move { Ok(Handleable::Http(build(config).await?)) })
            }),
        }
    }

    /// Declares a component whose builder produces a stream handler.
    pub fn stream<F, Fut>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(Config) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FletcherResult<StreamHandler>> + Send + 'static,
    {
        let build = Arc::new(build);
        Self {
            name: name.into(),
            kind: ComponentKind::StreamHandler,
            input_type: None,
            requires: Vec::new(),
            output_type: None,
            builder: Arc::new(move |config| {
                let build = Arc::clone(&build);
                Box::pin(async move { Ok(Handleable::Stream(build(config).await?)) })
            }),
        }
    }

    /// Declares a component whose builder produces a simple handler.
    ///
    /// The simple handler ignores the request body and resolves to a plain
    /// text value. The declared output type tags the resulting streamable's
    /// content type (`"text"` → `text/plain`, `"json"` → `application/json`).
    pub fn simple<F, Fut>(name: impl Into<String>, output_type: impl Into<String>, build: F) -> Self
    where
        F: Fn(Config) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FletcherResult<SimpleHandler>> + Send + 'static,
    {
        let build = Arc::new(build);
        let output_type = output_type.into();
        let content_type = simple_content_type(&output_type);
        Self {
            name: name.into(),
            kind: ComponentKind::SimpleHandler,
            input_type: Some("void".to_string()),
            requires: Vec::new(),
            output_type: Some(output_type),
            builder: Arc::new(move |config| {
                let build = Arc::clone(&build);
                Box::pin(async move {
                    let simple = build(config).await?;
                    Ok(Handleable::Stream(to_stream_handler(simple, content_type)))
                })
            }),
        }
    }

    /// Declares a component from a raw handleable builder.
    ///
    /// This is the escape hatch for builders that produce a handleable with
    /// both capability views.
    pub fn handleable<F, Fut>(name: impl Into<String>, kind: ComponentKind, build: F) -> Self
    where
        F: Fn(Config) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FletcherResult<Handleable>> + Send + 'static,
    {
        Self {
            name: name.into(),
            kind,
            input_type: None,
            requires: Vec::new(),
            output_type: None,
            builder: Arc::new(move |config| Box::pin(build(config))),
        }
    }

    /// Declares names of components this component needs installed before
    /// its builder can run.
    ///
    /// The installer validates the declarations against the accumulated
    /// configuration before executing the builder, so an ordering mistake
    /// is reported by name instead of surfacing as an opaque builder
    /// failure.
    #[must_use]
    pub fn with_requires<I, S>(mut self, requires: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires = requires.into_iter().map(Into::into).collect();
        self
    }

    /// The descriptor's name, unique within an installation run.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared capability type.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// The declared input shape of a simple handler, if any.
    #[must_use]
    pub fn input_type(&self) -> Option<&str> {
        self.input_type.as_deref()
    }

    /// The declared output shape of a simple handler, if any.
    #[must_use]
    pub fn output_type(&self) -> Option<&str> {
        self.output_type.as_deref()
    }

    /// The declared requirements, in declaration order.
    #[must_use]
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    /// The descriptor's handleable builder.
    #[must_use]
    pub fn builder(&self) -> &HandleableBuilder {
        &self.builder
    }
}

fn simple_content_type(output_type: &str) -> &'static str {
    match output_type {
        "json" => "application/json",
        _ => "text/plain",
    }
}

/// Converts a simple handler into a stream handler.
///
/// The request body is dropped unread (simple handlers declare a `void`
/// input) and the resolved value becomes a single-chunk streamable tagged
/// with the component's output content type.
fn to_stream_handler(simple: SimpleHandler, content_type: &'static str) -> StreamHandler {
    Arc::new(move |args, _body| {
        let simple = Arc::clone(&simple);
        Box::pin(async move {
            let value = simple(args).await?;
            Ok(Streamable::from_bytes(value.into_bytes()).with_content_type(content_type))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FletcherError;
    use crate::handler::{simple_handler_fn, HandlerArgs, RequestHead};

    fn args(path: &str) -> HandlerArgs {
        HandlerArgs {
            path: path.to_string(),
            root_path: path.to_string(),
            request_head: RequestHead::new(path),
        }
    }

    #[tokio::test]
    async fn test_simple_component_builds_a_stream_view() {
        let component = Component::simple("greeter", "text", |_config| async {
            Ok(simple_handler_fn(|args| async move {
                Ok(format!("hello, {}", &args.path[1..]))
            }))
        });
        assert_eq!(component.kind(), ComponentKind::SimpleHandler);
        assert_eq!(component.output_type(), Some("text"));

        let handleable = (component.builder())(Config::new()).await.unwrap();
        let handler = handleable.stream_view().expect("stream view");
        let result = handler(args("/world"), Streamable::empty()).await.unwrap();
        assert_eq!(result.content_type(), Some("text/plain"));
        assert_eq!(result.collect_text().await.unwrap(), "hello, world");
    }

    #[tokio::test]
    async fn test_json_output_type_tags_content_type() {
        let component = Component::simple("status", "json", |_config| async {
            Ok(simple_handler_fn(|_args| async {
                Ok(r#"{"status":"ok"}"#.to_string())
            }))
        });
        let handleable = (component.builder())(Config::new()).await.unwrap();
        let handler = handleable.stream_view().unwrap();
        let result = handler(args("/status"), Streamable::empty()).await.unwrap();
        assert_eq!(result.content_type(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_builder_reads_configuration() {
        let component = Component::simple("greeter", "text", |config: Config| async move {
            let greet = config.get_str("greet").unwrap_or("hello").to_string();
            Ok(simple_handler_fn(move |args| {
                let greet = greet.clone();
                async move { Ok(format!("{}, {}", greet, &args.path[1..])) }
            }))
        });

        let mut config = Config::new();
        config.set("greet", "howdy");
        let handleable = (component.builder())(config).await.unwrap();
        let handler = handleable.stream_view().unwrap();
        let result = handler(args("/world"), Streamable::empty()).await.unwrap();
        assert_eq!(result.collect_text().await.unwrap(), "howdy, world");
    }

    #[tokio::test]
    async fn test_failing_builder_surfaces_its_error() {
        let component = Component::stream("broken", |_config| async {
            Err(FletcherError::builder("boom"))
        });
        let err = (component.builder())(Config::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}

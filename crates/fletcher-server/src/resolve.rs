//! Handler resolution.
//!
//! Given the final configuration and the invocation arguments, resolution
//! determines the main handler's name and required capability, invokes the
//! matching builder, and adapts the result to the canonical HTTP contract.
//!
//! Name selection is a two-tier fallback: an HTTP handler name (arguments,
//! then configuration) takes precedence and requires the HTTP view; absent
//! that, a stream handler name (arguments, then configuration) requires the
//! stream view and goes through the stream-to-HTTP adapter. A handleable
//! exposing both views is resolved by whichever path was taken — only the
//! required view is consulted.

use fletcher_core::{Capability, Config, FletcherError, FletcherResult, Handleable, HttpHandler};

use crate::adapt;
use crate::args::RunArgs;

/// Resolves the main handler to a canonical HTTP handler.
///
/// # Errors
///
/// - [`FletcherError::Configuration`] when neither `mainHttp` nor `main` is
///   present in the arguments or the configuration.
/// - [`FletcherError::BuilderNotFound`] when the chosen name has no entry in
///   the handleable builder registry.
/// - The builder's own error, unchanged, when handler construction fails.
/// - [`FletcherError::CapabilityMismatch`] when the built handleable lacks
///   the required view.
pub async fn resolve(config: &Config, args: &RunArgs) -> FletcherResult<HttpHandler> {
    let (name, required) = choose_main(config, args)?;
    tracing::debug!(name, capability = %required, "resolving main handler");

    let builder = config
        .handleable_builder(name)
        .ok_or_else(|| FletcherError::BuilderNotFound {
            name: name.to_string(),
        })?;

    let handleable = builder(config.clone()).await?;

    match required {
        Capability::Http => handleable
            .http_view()
            .ok_or_else(|| mismatch(name, required, &handleable)),
        Capability::Stream => {
            let stream = handleable
                .stream_view()
                .ok_or_else(|| mismatch(name, required, &handleable))?;

            // Park the handler in the bridging slot and build the HTTP view
            // from that configuration, the same path a config-driven bridge
            // takes.
            let mut bridge = Config::new();
            bridge.insert_stream_handler(adapt::BRIDGE_SLOT, stream);
            adapt::from_bridge_config(&bridge)
        }
    }
}

fn choose_main<'a>(config: &'a Config, args: &'a RunArgs) -> FletcherResult<(&'a str, Capability)> {
    if let Some(name) = args.main_http.as_deref().or_else(|| config.main_http()) {
        Ok((name, Capability::Http))
    } else if let Some(name) = args.main.as_deref().or_else(|| config.main()) {
        Ok((name, Capability::Stream))
    } else {
        Err(FletcherError::configuration(
            "main handler name not specified in invocation arguments or config",
        ))
    }
}

fn mismatch(name: &str, expected: Capability, handleable: &Handleable) -> FletcherError {
    FletcherError::CapabilityMismatch {
        name: name.to_string(),
        expected,
        actual: handleable.describe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::install;
    use fletcher_core::{
        http_handler_fn, simple_handler_fn, stream_handler_fn, Component, ComponentKind,
        RequestHead, ResponseHead, Streamable,
    };
    use std::sync::Arc;

    fn greeter() -> Component {
        Component::simple("greeter", "text", |_config| async {
            Ok(simple_handler_fn(|args| async move {
                Ok(format!("hello, {}", &args.path[1..]))
            }))
        })
    }

    fn front() -> Component {
        Component::http("front", |_config| async {
            Ok(http_handler_fn(|_head, _body| async {
                let mut head = ResponseHead::new(418);
                head.headers
                    .insert("x-front".to_string(), "direct".to_string());
                Ok((head, Streamable::from_text("teapot")))
            }))
        })
    }

    #[tokio::test]
    async fn test_missing_main_name_is_a_configuration_error() {
        let config = install(&[greeter()]).await.unwrap();
        let err = resolve(&config, &RunArgs::new()).await.err().unwrap();
        assert!(matches!(err, FletcherError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_unknown_name_is_a_lookup_error() {
        let config = install(&[greeter()]).await.unwrap();
        let args = RunArgs::new().with_main("missing");
        let err = resolve(&config, &args).await.err().unwrap();
        let FletcherError::BuilderNotFound { name } = err else {
            panic!("expected lookup error, got {err}");
        };
        assert_eq!(name, "missing");
    }

    #[tokio::test]
    async fn test_stream_handler_resolves_through_adapter() {
        let config = install(&[greeter()]).await.unwrap();
        let args = RunArgs::new().with_main("greeter");
        let handler = resolve(&config, &args).await.unwrap();

        let (head, body) = handler(RequestHead::new("/world"), Streamable::empty())
            .await
            .unwrap();
        assert_eq!(head.status_code, 200);
        assert_eq!(body.collect_text().await.unwrap(), "hello, world");
    }

    #[tokio::test]
    async fn test_http_handler_resolves_without_adaptation() {
        let config = install(&[front()]).await.unwrap();
        let args = RunArgs::new().with_main_http("front");
        let handler = resolve(&config, &args).await.unwrap();

        let (head, body) = handler(RequestHead::new("/anything"), Streamable::empty())
            .await
            .unwrap();
        assert_eq!(head.status_code, 418);
        assert_eq!(head.header("x-front"), Some("direct"));
        assert_eq!(body.collect_text().await.unwrap(), "teapot");
    }

    #[tokio::test]
    async fn test_http_request_for_stream_only_handleable_mismatches() {
        let config = install(&[greeter()]).await.unwrap();
        let args = RunArgs::new().with_main_http("greeter");
        let err = resolve(&config, &args).await.err().unwrap();
        let FletcherError::CapabilityMismatch { expected, actual, .. } = err else {
            panic!("expected capability mismatch, got {err}");
        };
        assert_eq!(expected, Capability::Http);
        assert_eq!(actual, "stream");
    }

    #[tokio::test]
    async fn test_stream_request_for_http_only_handleable_mismatches() {
        let config = install(&[front()]).await.unwrap();
        let args = RunArgs::new().with_main("front");
        let err = resolve(&config, &args).await.err().unwrap();
        assert!(matches!(err, FletcherError::CapabilityMismatch { .. }));
    }

    #[tokio::test]
    async fn test_main_http_takes_precedence_over_main() {
        let config = install(&[greeter(), front()]).await.unwrap();
        let args = RunArgs::new().with_main("greeter").with_main_http("front");
        let handler = resolve(&config, &args).await.unwrap();

        let (head, _) = handler(RequestHead::new("/x"), Streamable::empty())
            .await
            .unwrap();
        assert_eq!(head.status_code, 418);
    }

    #[tokio::test]
    async fn test_config_keys_fill_in_for_absent_args() {
        let mut config = install(&[greeter()]).await.unwrap();
        config.set("main", "greeter");
        let handler = resolve(&config, &RunArgs::new()).await.unwrap();

        let (head, body) = handler(RequestHead::new("/config"), Streamable::empty())
            .await
            .unwrap();
        assert_eq!(head.status_code, 200);
        assert_eq!(body.collect_text().await.unwrap(), "hello, config");
    }

    #[tokio::test]
    async fn test_dual_view_handleable_follows_the_requested_path() {
        let dual = Component::handleable("dual", ComponentKind::HttpHandler, |_config| async {
            Ok(fletcher_core::Handleable::Both {
                http: http_handler_fn(|_head, _body| async {
                    Ok((ResponseHead::new(204), Streamable::empty()))
                }),
                stream: stream_handler_fn(|_args, _body| async {
                    Ok(Streamable::from_text("streamed"))
                }),
            })
        });
        let config = install(&[dual]).await.unwrap();

        let http_handler = resolve(&config, &RunArgs::new().with_main_http("dual"))
            .await
            .unwrap();
        let (head, _) = http_handler(RequestHead::new("/"), Streamable::empty())
            .await
            .unwrap();
        assert_eq!(head.status_code, 204);

        let stream_handler = resolve(&config, &RunArgs::new().with_main("dual"))
            .await
            .unwrap();
        let (head, body) = stream_handler(RequestHead::new("/"), Streamable::empty())
            .await
            .unwrap();
        assert_eq!(head.status_code, 200);
        assert_eq!(body.collect_text().await.unwrap(), "streamed");
    }

    #[tokio::test]
    async fn test_builder_failure_propagates_verbatim() {
        let broken = Component::stream("broken", |_config| async {
            Err(FletcherError::builder("vault sealed"))
        });
        // Install the dependency-free component lazily: registration itself
        // must succeed so resolution is what trips the builder.
        let mut config = Config::new();
        config.insert_handleable_builder("broken", Arc::clone(broken.builder()));
        let args = RunArgs::new().with_main("broken");

        let err = resolve(&config, &args).await.err().unwrap();
        let FletcherError::Builder(source) = &err else {
            panic!("expected the builder's own error, got {err}");
        };
        assert_eq!(source.to_string(), "vault sealed");
    }
}

//! Stream-to-HTTP adaptation.
//!
//! Wraps a stream handler (structured args + body stream in, result stream
//! out) as a canonical HTTP handler. The adapter is deliberately thin: it
//! extracts the request path, forwards the body, synthesizes a `200`
//! response head, and copies the result's content type. It performs no
//! error-to-status translation — a stream handler error propagates verbatim
//! to the HTTP error channel, where the bridge owns the translation.

use fletcher_core::{
    http_handler_fn, Config, FletcherError, FletcherResult, HandlerArgs, HttpHandler, RequestHead,
    ResponseHead, StreamHandler, Streamable,
};

/// Name of the bridging registry slot the adapted stream handler is parked
/// under while its HTTP view is built.
pub const BRIDGE_SLOT: &str = "main stream handler";

/// Wraps a stream handler as a canonical HTTP handler.
///
/// The produced handler parses the request URL and passes only its path
/// component to the stream handler (query string and fragment are discarded
/// at this layer). `root_path` always equals `path`; no sub-mounting
/// happens here.
///
/// On success the response head is `200` with an empty header map, plus
/// `content-type` when the result stream declares one. No other header is
/// ever injected at this layer.
///
/// # Example
///
/// ```
/// use fletcher_core::{stream_handler_fn, RequestHead, Streamable};
/// use fletcher_server::adapt;
///
/// # tokio_test::block_on(async {
/// let handler = adapt(stream_handler_fn(|args, _body| async move {
///     Ok(Streamable::from_text(format!("hello, {}", &args.path[1..])))
/// }));
///
/// let (head, body) = handler(RequestHead::new("/world"), Streamable::empty())
///     .await
///     .unwrap();
/// assert_eq!(head.status_code, 200);
/// assert_eq!(body.collect_text().await.unwrap(), "hello, world");
/// # });
/// ```
pub fn adapt(handler: StreamHandler) -> HttpHandler {
    http_handler_fn(move |head: RequestHead, body: Streamable| {
        let handler = handler.clone();
        async move {
            let path = request_path(&head.url)?;
            let args = HandlerArgs {
                path: path.clone(),
                root_path: path,
                request_head: head,
            };

            let result = handler(args, body).await?;

            let mut response = ResponseHead::ok();
            if let Some(content_type) = result.content_type() {
                response
                    .headers
                    .insert("content-type".to_string(), content_type.to_string());
            }
            Ok((response, result))
        }
    })
}

/// Builds the HTTP handler from the stream handler parked in the bridging
/// slot of `config`.
///
/// # Errors
///
/// Returns a configuration error if no handler is parked under
/// [`BRIDGE_SLOT`].
pub fn from_bridge_config(config: &Config) -> FletcherResult<HttpHandler> {
    let handler = config
        .stream_handler(BRIDGE_SLOT)
        .cloned()
        .ok_or_else(|| {
            FletcherError::configuration(format!("no stream handler parked under `{BRIDGE_SLOT}`"))
        })?;
    Ok(adapt(handler))
}

fn request_path(url: &str) -> FletcherResult<String> {
    url.parse::<http::Uri>()
        .map(|uri| uri.path().to_string())
        .map_err(|err| FletcherError::configuration(format!("invalid request url `{url}`: {err}")))
}

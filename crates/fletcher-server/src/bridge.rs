//! The hyper bridge.
//!
//! Converts between hyper's request/response types and the canonical
//! handler contract: a hyper request becomes a [`RequestHead`] plus a body
//! [`Streamable`]; the handler's `(ResponseHead, Streamable)` result is
//! streamed back without buffering. This is also the single place where a
//! handler error is translated into an HTTP status — the error's numeric
//! class becomes the response status and the message is wrapped in a JSON
//! envelope.

use std::convert::Infallible;

use bytes::Bytes;
use futures_util::StreamExt;
use http::{header, Request, Response, StatusCode};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, BodyStream, Full, StreamBody};
use hyper::body::{Frame, Incoming};

use fletcher_core::{FletcherError, HttpHandler, RequestHead, ResponseHead, Streamable};

/// Type alias for the bridged HTTP response body.
pub(crate) type ResponseBody = UnsyncBoxBody<Bytes, FletcherError>;

/// Type alias for the bridged HTTP response.
pub(crate) type HttpResponse = Response<ResponseBody>;

/// Handles a single hyper request through the resolved handler.
pub(crate) async fn handle_request(
    handler: &HttpHandler,
    req: Request<Incoming>,
) -> Result<HttpResponse, Infallible> {
    let head = request_head(&req);
    let body = request_body(req);

    tracing::debug!(url = %head.url, "dispatching request");

    match handler(head, body).await {
        Ok((response_head, response_body)) => Ok(success_response(&response_head, response_body)),
        Err(err) => {
            tracing::error!(error = %err, "handler failed");
            Ok(error_response(&err))
        }
    }
}

fn request_head(req: &Request<Incoming>) -> RequestHead {
    let mut head = RequestHead::new(req.uri().to_string());
    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            head.headers.insert(name.as_str().to_string(), value.to_string());
        }
    }
    head
}

fn request_body(req: Request<Incoming>) -> Streamable {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let chunks = BodyStream::new(req.into_body()).filter_map(|frame| async move {
        match frame {
            Ok(frame) => frame.into_data().ok().map(Ok),
            Err(err) => Some(Err(FletcherError::stream(err.to_string()))),
        }
    });

    let body = Streamable::from_stream(chunks);
    match content_type {
        Some(content_type) => body.with_content_type(content_type),
        None => body,
    }
}

fn success_response(head: &ResponseHead, body: Streamable) -> HttpResponse {
    let status =
        StatusCode::from_u16(head.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = Response::builder().status(status);
    for (name, value) in &head.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let chunks = body.into_stream().map(|chunk| chunk.map(Frame::data));
    builder
        .body(StreamBody::new(chunks).boxed_unsync())
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "response head was unserializable");
            plain_response(StatusCode::INTERNAL_SERVER_ERROR, Bytes::new())
        })
}

fn error_response(err: &FletcherError) -> HttpResponse {
    let class = err.status_code();
    let status = StatusCode::from_u16(class).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = serde_json::json!({
        "error": {
            "code": class,
            "message": err.to_string(),
        }
    });

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(full_body(envelope.to_string()))
        .unwrap_or_else(|_| plain_response(status, Bytes::from_static(b"{}")))
}

fn full_body(text: String) -> ResponseBody {
    Full::new(Bytes::from(text))
        .map_err(|never| match never {})
        .boxed_unsync()
}

fn plain_response(status: StatusCode, bytes: Bytes) -> HttpResponse {
    let mut response = Response::new(
        Full::new(bytes)
            .map_err(|never| match never {})
            .boxed_unsync(),
    );
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use fletcher_core::http_handler_fn;

    #[test]
    fn test_error_envelope_carries_class_and_message() {
        let err = FletcherError::configuration("no main handler");
        let response = error_response(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_success_response_streams_handler_output() {
        let handler = http_handler_fn(|_head, _body| async {
            let mut head = ResponseHead::ok();
            head.headers
                .insert("content-type".to_string(), "text/plain".to_string());
            Ok((head, Streamable::from_text("hello")))
        });

        let (head, body) = handler(RequestHead::new("/"), Streamable::empty())
            .await
            .unwrap();
        let response = success_response(&head, body);
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"hello");
    }

    #[test]
    fn test_out_of_range_status_degrades_to_500() {
        let head = ResponseHead::new(99);
        let response = success_response(&head, Streamable::empty());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

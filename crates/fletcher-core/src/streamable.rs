//! Single-consumption byte streams.
//!
//! A [`Streamable`] is the opaque body value passed between handlers: a
//! possibly-empty stream of byte chunks, optionally tagged with a content
//! type. It is produced by one side and consumed exactly once by the other;
//! ownership enforces that it is never duplicated or rewound.

use std::fmt;

use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, BoxStream, Stream, StreamExt};

use crate::error::{FletcherError, FletcherResult};

/// An opaque, single-consumption byte stream with an optional content type.
///
/// # Example
///
/// ```
/// use fletcher_core::Streamable;
///
/// # tokio_test::block_on(async {
/// let body = Streamable::from_text("hello, world");
/// assert_eq!(body.content_type(), Some("text/plain"));
/// assert_eq!(body.collect_text().await.unwrap(), "hello, world");
/// # });
/// ```
pub struct Streamable {
    content_type: Option<String>,
    stream: BoxStream<'static, FletcherResult<Bytes>>,
}

impl fmt::Debug for Streamable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Streamable")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

impl Streamable {
    /// Creates an empty streamable with no content type.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            content_type: None,
            stream: stream::empty().boxed(),
        }
    }

    /// Creates a streamable from a single chunk of bytes, with no content type.
    pub fn from_bytes(bytes: impl Into<Bytes> + Send + 'static) -> Self {
        Self {
            content_type: None,
            stream: stream::once(async move { Ok(bytes.into()) }).boxed(),
        }
    }

    /// Creates a `text/plain` streamable from a string.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_bytes(Bytes::from(text.into())).with_content_type("text/plain")
    }

    /// Wraps an arbitrary chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = FletcherResult<Bytes>> + Send + 'static,
    {
        Self {
            content_type: None,
            stream: stream.boxed(),
        }
    }

    /// Sets the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the declared content type, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Consumes the streamable, concatenating all chunks.
    pub async fn collect(self) -> FletcherResult<Bytes> {
        let mut buf = BytesMut::new();
        let mut stream = self.stream;
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// Consumes the streamable, decoding the concatenated chunks as UTF-8.
    pub async fn collect_text(self) -> FletcherResult<String> {
        let bytes = self.collect().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|err| FletcherError::stream(format!("body is not valid UTF-8: {err}")))
    }

    /// Consumes the streamable, yielding the underlying chunk stream.
    #[must_use]
    pub fn into_stream(self) -> BoxStream<'static, FletcherResult<Bytes>> {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_collects_to_nothing() {
        let body = Streamable::empty();
        assert_eq!(body.content_type(), None);
        assert!(body.collect().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_text_tags_plain_text() {
        let body = Streamable::from_text("hello");
        assert_eq!(body.content_type(), Some("text/plain"));
        assert_eq!(body.collect_text().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_content_type_override() {
        let body = Streamable::from_bytes("{}").with_content_type("application/json");
        assert_eq!(body.content_type(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_chunked_stream_concatenates_in_order() {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"hello, ")),
            Ok(Bytes::from_static(b"world")),
        ]);
        let body = Streamable::from_stream(chunks);
        assert_eq!(body.collect_text().await.unwrap(), "hello, world");
    }

    #[tokio::test]
    async fn test_mid_stream_error_surfaces() {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(FletcherError::stream("connection reset")),
        ]);
        let err = Streamable::from_stream(chunks).collect().await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_a_stream_error() {
        let body = Streamable::from_bytes(Bytes::from_static(&[0xff, 0xfe]));
        let err = body.collect_text().await.unwrap_err();
        assert!(matches!(err, FletcherError::Stream { .. }));
    }
}

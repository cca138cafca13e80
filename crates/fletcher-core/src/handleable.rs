//! The handleable capability union.
//!
//! A [`Handleable`] is the opaque value a component builder produces. It is
//! modeled as a tagged union over the two capability views so the resolver's
//! probe is a pattern match, not runtime shape inspection.

use std::fmt;

use crate::handler::{HttpHandler, StreamHandler};

/// A capability view required during handler resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The HTTP-native view.
    Http,
    /// The stream-based view.
    Stream,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Stream => f.write_str("stream"),
        }
    }
}

/// Capability value produced by a component builder.
///
/// A handleable exposes an HTTP-handler view, a stream-handler view, or
/// both. The resolver consults only the view its resolution path requires;
/// the other view (if present) is never exercised.
#[derive(Clone)]
pub enum Handleable {
    /// Exposes only the HTTP view.
    Http(HttpHandler),
    /// Exposes only the stream view.
    Stream(StreamHandler),
    /// Exposes both views.
    Both {
        /// The HTTP view.
        http: HttpHandler,
        /// The stream view.
        stream: StreamHandler,
    },
}

impl fmt::Debug for Handleable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handleable").field(&self.describe()).finish()
    }
}

impl Handleable {
    /// Returns the HTTP view, if this handleable exposes one.
    #[must_use]
    pub fn http_view(&self) -> Option<HttpHandler> {
        match self {
            Self::Http(http) | Self::Both { http, .. } => Some(http.clone()),
            Self::Stream(_) => None,
        }
    }

    /// Returns the stream view, if this handleable exposes one.
    #[must_use]
    pub fn stream_view(&self) -> Option<StreamHandler> {
        match self {
            Self::Stream(stream) | Self::Both { stream, .. } => Some(stream.clone()),
            Self::Http(_) => None,
        }
    }

    /// Whether the given capability view is present.
    #[must_use]
    pub fn exposes(&self, capability: Capability) -> bool {
        match capability {
            Capability::Http => !matches!(self, Self::Stream(_)),
            Capability::Stream => !matches!(self, Self::Http(_)),
        }
    }

    /// Short description of the exposed views, used in error messages.
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Stream(_) => "stream",
            Self::Both { .. } => "http+stream",
        }
    }
}

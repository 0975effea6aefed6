//! Opaque cursor and page envelope primitives shared by list endpoints.
//!
//! Callers treat a [`Cursor`] as an opaque continuation token: it is issued
//! by whichever store executed the query, passed back verbatim by clients,
//! and never interpreted in between. Adapters that need a concrete
//! representation can use the offset-token helpers, which encode a record
//! offset as URL-safe base64 of a small JSON document.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use url::Url;

/// Errors raised while validating or decoding cursor tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The supplied token was empty or whitespace.
    #[error("cursor token must not be empty")]
    Empty,
    /// The token could not be decoded as an offset cursor.
    #[error("cursor token is malformed")]
    Malformed,
}

/// Errors raised while constructing pagination links.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The collection path could not be joined onto the root URL.
    #[error("failed to join {path} onto the root URL")]
    InvalidPath {
        /// Path that failed to join.
        path: String,
    },
}

/// Opaque pagination continuation token.
///
/// Tokens are passed through unmodified; only the issuing store assigns
/// meaning to their contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cursor(String);

#[derive(Serialize, Deserialize)]
struct OffsetToken {
    offset: usize,
}

impl Cursor {
    /// Validate and wrap a raw token supplied by a client.
    pub fn new(token: impl Into<String>) -> Result<Self, CursorError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CursorError::Empty);
        }
        Ok(Self(token))
    }

    /// Issue a token encoding a record offset.
    ///
    /// # Panics
    /// Never panics: `OffsetToken` serialisation is infallible for all
    /// `usize` values.
    #[must_use]
    pub fn from_offset(offset: usize) -> Self {
        let json = serde_json::to_vec(&OffsetToken { offset })
            .unwrap_or_else(|err| unreachable!("offset token serialisation failed: {err}"));
        Self(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a token previously issued by [`Cursor::from_offset`].
    pub fn offset(&self) -> Result<usize, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(&self.0)
            .map_err(|_| CursorError::Malformed)?;
        let token: OffsetToken =
            serde_json::from_slice(&bytes).map_err(|_| CursorError::Malformed)?;
        Ok(token.offset)
    }

    /// Raw token text as received or issued.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Cursor> for String {
    fn from(value: Cursor) -> Self {
        value.0
    }
}

impl TryFrom<String> for Cursor {
    type Error = CursorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Bounds for a single page of a list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of items to return.
    pub limit: usize,
    /// Continuation token from a previous page, if any.
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    /// First page of a listing with the given page size.
    #[must_use]
    pub fn first(limit: usize) -> Self {
        Self {
            limit,
            cursor: None,
        }
    }

    /// Continuation page following a previously issued cursor.
    #[must_use]
    pub fn after(limit: usize, cursor: Cursor) -> Self {
        Self {
            limit,
            cursor: Some(cursor),
        }
    }
}

/// One page of results plus the token for the next page, when more exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in store order.
    pub items: Vec<T>,
    /// Token for the following page; `None` when the listing is exhausted.
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Page holding every remaining item, with no continuation.
    #[must_use]
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// Map the items of the page while retaining the continuation token.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

/// Build the absolute URL of the next page: `<root><path>?cursor=<token>`.
pub fn next_url(root: &Url, path: &str, cursor: &Cursor) -> Result<Url, LinkError> {
    let mut url = root.join(path).map_err(|_| LinkError::InvalidPath {
        path: path.to_owned(),
    })?;
    url.query_pairs_mut()
        .clear()
        .append_pair("cursor", cursor.as_str());
    Ok(url)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for cursor tokens and link construction.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0)]
    #[case(5)]
    #[case(usize::MAX)]
    fn offset_tokens_round_trip(#[case] offset: usize) {
        let cursor = Cursor::from_offset(offset);
        assert_eq!(cursor.offset(), Ok(offset));
    }

    #[rstest]
    fn client_tokens_pass_through_unmodified() {
        let cursor = Cursor::new("CjsSNWoO").expect("non-empty token");
        assert_eq!(cursor.as_str(), "CjsSNWoO");
        assert_eq!(String::from(cursor), "CjsSNWoO");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_tokens_are_rejected(#[case] raw: &str) {
        assert_eq!(Cursor::new(raw), Err(CursorError::Empty));
    }

    #[rstest]
    #[case("not!base64")]
    #[case("YWJj")]
    fn foreign_tokens_do_not_decode_as_offsets(#[case] raw: &str) {
        let cursor = Cursor::new(raw).expect("non-empty token");
        assert_eq!(cursor.offset(), Err(CursorError::Malformed));
    }

    #[rstest]
    fn next_url_appends_cursor_query() {
        let root = Url::parse("https://freight.example.com").expect("valid root");
        let cursor = Cursor::from_offset(5);
        let url = next_url(&root, "/boats", &cursor).expect("joinable path");
        assert_eq!(url.path(), "/boats");
        assert_eq!(
            url.query(),
            Some(format!("cursor={}", cursor.as_str()).as_str())
        );
    }

    #[rstest]
    fn page_map_preserves_continuation() {
        let page = Page {
            items: vec![1_i32, 2, 3],
            next_cursor: Some(Cursor::from_offset(3)),
        };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert!(mapped.next_cursor.is_some());
    }
}

//! Named routes for the two dashboard views.
//!
//! Routes are looked up from a path such as `/shipments/SHP-1001`. Resolving
//! a route never consults the store; the detail view does its own lookup.
//! Ids are percent-encoded in paths, so any id survives a round trip.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// A compiled route pattern.
#[derive(Debug)]
struct RoutePattern {
    /// Route name.
    name: &'static str,

    /// The compiled regex. Captures `id` for parameterized routes.
    regex: Regex,
}

impl RoutePattern {
    fn new(name: &'static str, pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
        })
    }
}

static ROUTE_TABLE: LazyLock<Vec<RoutePattern>> = LazyLock::new(|| {
    [
        (SHIPMENT_LIST, r"^/?$"),
        (SHIPMENT_DETAIL, r"^/shipments/(?P<id>[^/]+)/?$"),
    ]
    .into_iter()
    .filter_map(|(name, pattern)| RoutePattern::new(name, pattern).ok())
    .collect()
});

const SHIPMENT_LIST: &str = "shipment-list";
const SHIPMENT_DETAIL: &str = "shipment-detail";

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// All shipments with their assignment counters.
    ShipmentList,
    /// One shipment, keyed by id.
    ShipmentDetail {
        /// The shipment id from the path.
        id: String,
    },
}

impl Route {
    /// Match a path against the route table.
    ///
    /// Query strings and fragments are ignored and the id segment is
    /// percent-decoded. Returns `None` for paths no route handles.
    #[must_use]
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();

        ROUTE_TABLE.iter().find_map(|route| {
            let captures = route.regex.captures(path)?;
            match route.name {
                SHIPMENT_LIST => Some(Self::ShipmentList),
                SHIPMENT_DETAIL => captures.name("id").map(|id| Self::ShipmentDetail {
                    id: decode_segment(id.as_str()),
                }),
                _ => None,
            }
        })
    }

    /// Like [`Route::resolve`], but unknown paths are an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRoute`] if no route matches.
    pub fn parse(path: &str) -> Result<Self> {
        Self::resolve(path).ok_or_else(|| Error::unknown_route(path))
    }

    /// The route's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShipmentList => SHIPMENT_LIST,
            Self::ShipmentDetail { .. } => SHIPMENT_DETAIL,
        }
    }

    /// The canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ShipmentList => "/".to_string(),
            Self::ShipmentDetail { id } => format!("/shipments/{}", encode_segment(id)),
        }
    }
}

/// Characters left as-is in a path segment (RFC 3986 `pchar` minus `%`).
fn is_segment_safe(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@".contains(&byte)
}

fn encode_segment(segment: &str) -> String {
    use std::fmt::Write;

    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if is_segment_safe(byte) {
            encoded.push(char::from(byte));
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}

/// Decode `%XX` escapes. Malformed escapes are kept literally, and a segment
/// that does not decode to UTF-8 is returned unchanged.
fn decode_segment(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = segment
                .get(i + 1..i + 3)
                .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = escape {
                decoded.push(byte);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    String::from_utf8(decoded).unwrap_or_else(|_| segment.to_string())
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.path())
    }
}

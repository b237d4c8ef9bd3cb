//! Source location utilities.

use saphyr_parser::{Marker, Span as ParserSpan};
use serde::Serialize;

/// Row/column location within the source YAML document (1-indexed, character-based).
///
/// Every event carries a pair of locations: where the node starts and where it ends.
/// Errors report the start location; [`crate::Error::ForwardAnchorNotSupported`]
/// reports both.
///
/// # Example
///
/// ```
/// use saphyr_nodes::{from_str, SeqType, ValueType};
///
/// // `x` cannot be coerced into an integer.
/// let yaml = "[1, 2, x]";
/// let err = from_str(yaml, &ValueType::Seq(SeqType::list(ValueType::Int))).unwrap_err();
///
/// let loc = err.location().expect("coercion errors are located");
/// assert_eq!(loc.line(), 1);
/// assert_eq!(loc.column(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// 1-indexed row number in the input stream.
    pub(crate) line: u32,
    /// 1-indexed column number in the input stream.
    pub(crate) column: u32,
    /// 0-indexed character offset in the input stream.
    pub(crate) offset: u32,
}

impl Location {
    /// Sentinel value meaning "location unknown".
    ///
    /// Used when a precise position is not yet available at error creation time.
    pub const UNKNOWN: Self = Self {
        line: 0,
        column: 0,
        offset: 0,
    };

    /// Create a new location record.
    ///
    /// Arguments:
    /// - `line`: 1-indexed line.
    /// - `column`: 1-indexed column.
    /// - `offset`: 0-indexed character offset.
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        // 4 Gb is larger than any YAML document we expect, and this is
        // diagnostics only.
        Self {
            line: line as u32,
            column: column as u32,
            offset: offset as u32,
        }
    }

    /// serde_yaml-compatible line information.
    #[inline]
    pub fn line(&self) -> u64 {
        self.line as u64
    }

    /// serde_yaml-compatible column information.
    #[inline]
    pub fn column(&self) -> u64 {
        self.column as u64
    }

    /// Character offset from the start of the input.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset as u64
    }

    #[inline]
    pub(crate) fn is_known(&self) -> bool {
        self.line != 0 && self.column != 0
    }
}

fn location_from_marker(marker: &Marker) -> Location {
    Location::new(marker.line(), marker.col() + 1, marker.index())
}

/// Convert a `saphyr_parser::Span` to a 1-indexed `(start, end)` pair.
///
/// Called by:
/// - The live events adapter for each raw parser event.
pub(crate) fn locations_from_span(span: &ParserSpan) -> (Location, Location) {
    (
        location_from_marker(&span.start),
        location_from_marker(&span.end),
    )
}

//! Defines error and its location
use std::fmt;

use saphyr_parser::ScanError;

use crate::budget::BudgetBreach;
use crate::location::Location;

/// Error type for every fallible operation of the crate.
#[derive(Debug)]
pub enum Error {
    /// Free-form error with optional source location.
    Message { msg: String, location: Location },
    /// Unexpected end of input.
    Eof { location: Location },
    /// Structural mismatch: something else than the expected event was seen.
    Unexpected {
        expected: &'static str,
        found: &'static str,
        location: Location,
    },
    /// Alias references an anchor that was never defined in its document.
    UnknownAnchor { id: usize, location: Location },
    /// A forward alias was found in a sequence whose collection cannot be patched
    /// by position after insertion.
    ForwardAnchorNotSupported {
        start: Location,
        end: Location,
        msg: String,
    },
    /// A value cannot be converted to the required type.
    Coercion {
        value: String,
        target: String,
        location: Location,
    },
    /// The collection does not provide the requested operation.
    Unsupported {
        operation: &'static str,
        type_name: String,
    },
    /// A [`crate::Budget`] limit was exceeded.
    Budget {
        breach: BudgetBreach,
        location: Location,
    },
    /// `from_str` found more than one document.
    MultipleDocuments { location: Location },
}

impl Error {
    /// Construct a `Message` error with no known location.
    pub(crate) fn msg<S: Into<String>>(s: S) -> Self {
        Error::Message {
            msg: s.into(),
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn eof() -> Self {
        Error::Eof {
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn unexpected(expected: &'static str, found: &'static str) -> Self {
        Error::Unexpected {
            expected,
            found,
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn unknown_anchor(id: usize) -> Self {
        Error::UnknownAnchor {
            id,
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn coercion(value: impl Into<String>, target: impl Into<String>) -> Self {
        Error::Coercion {
            value: value.into(),
            target: target.into(),
            location: Location::UNKNOWN,
        }
    }

    pub(crate) fn unsupported(operation: &'static str, type_name: impl Into<String>) -> Self {
        Error::Unsupported {
            operation,
            type_name: type_name.into(),
        }
    }

    pub(crate) fn budget(breach: BudgetBreach) -> Self {
        Error::Budget {
            breach,
            location: Location::UNKNOWN,
        }
    }

    /// Attach a location unless the error already carries a known one.
    ///
    /// Errors raised deep inside nested nodes keep their precise position when
    /// outer frames add their own, coarser location.
    pub(crate) fn with_location(mut self, set_location: Location) -> Self {
        match &mut self {
            Error::Message { location, .. }
            | Error::Eof { location }
            | Error::Unexpected { location, .. }
            | Error::UnknownAnchor { location, .. }
            | Error::Coercion { location, .. }
            | Error::Budget { location, .. }
            | Error::MultipleDocuments { location } => {
                if !location.is_known() {
                    *location = set_location;
                }
            }
            Error::ForwardAnchorNotSupported { .. } | Error::Unsupported { .. } => {}
        }
        self
    }

    /// Location where the error was detected, if known.
    ///
    /// For [`Error::ForwardAnchorNotSupported`] this is the start of the offending node.
    pub fn location(&self) -> Option<Location> {
        let location = match self {
            Error::Message { location, .. }
            | Error::Eof { location }
            | Error::Unexpected { location, .. }
            | Error::UnknownAnchor { location, .. }
            | Error::Coercion { location, .. }
            | Error::Budget { location, .. }
            | Error::MultipleDocuments { location } => *location,
            Error::ForwardAnchorNotSupported { start, .. } => *start,
            Error::Unsupported { .. } => return None,
        };
        location.is_known().then_some(location)
    }

    pub(crate) fn from_scan_error(err: ScanError) -> Self {
        let mark = err.marker();
        Error::Message {
            msg: err.info().to_owned(),
            location: Location::new(mark.line(), mark.col() + 1, mark.index()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message { msg, location } => fmt_with_location(f, msg, location),
            Error::Eof { location } => fmt_with_location(f, "unexpected end of input", location),
            Error::Unexpected {
                expected,
                found,
                location,
            } => fmt_with_location(
                f,
                &format!("unexpected event: expected {expected}, found {found}"),
                location,
            ),
            Error::UnknownAnchor { id, location } => fmt_with_location(
                f,
                &format!("alias references unknown anchor id {id}"),
                location,
            ),
            Error::ForwardAnchorNotSupported { start, end, msg } => {
                if start.is_known() {
                    write!(
                        f,
                        "{msg} (from line {}, column {} to line {}, column {})",
                        start.line, start.column, end.line, end.column
                    )
                } else {
                    write!(f, "{msg}")
                }
            }
            Error::Coercion {
                value,
                target,
                location,
            } => fmt_with_location(
                f,
                &format!("cannot convert `{value}` to {target}"),
                location,
            ),
            Error::Unsupported {
                operation,
                type_name,
            } => write!(f, "{type_name} does not support {operation}"),
            Error::Budget { breach, location } => {
                fmt_with_location(f, &format!("YAML budget breached: {breach:?}"), location)
            }
            Error::MultipleDocuments { location } => fmt_with_location(
                f,
                "multiple YAML documents detected; use from_multiple or from_multiple_with_options",
                location,
            ),
        }
    }
}

impl std::error::Error for Error {}

fn fmt_with_location(f: &mut fmt::Formatter<'_>, msg: &str, location: &Location) -> fmt::Result {
    if location.is_known() {
        write!(
            f,
            "{msg} at line {}, column {}",
            location.line, location.column
        )
    } else {
        write!(f, "{msg}")
    }
}

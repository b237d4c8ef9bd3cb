//! Deserialization options.

use crate::budget::Budget;

/// Deserialization options.
///
/// Construct with [`crate::options!`] so that new fields do not break call sites.
///
/// ```rust
/// use saphyr_nodes::{from_str_with_options, options, ValueType};
///
/// let options = options! {
///     strict_booleans: false,
/// };
/// let value = from_str_with_options("yes", &ValueType::Bool, options).unwrap();
/// assert_eq!(value.as_bool(), Some(true));
/// ```
#[derive(Clone, Debug)]
pub struct Options {
    /// Optional YAML budget to enforce while parsing (counts raw parser events).
    pub budget: Option<Budget>,
    /// Only `true`/`false` (any casing the core schema allows) are booleans. When false,
    /// YAML 1.1 forms such as `yes`, `no`, `on` and `off` are accepted for `Bool` targets.
    ///
    /// Untyped (`Any`) targets always use the strict form.
    pub strict_booleans: bool,
    /// Accept YAML 1.1 octal integers written with a `00` prefix.
    pub legacy_octal_numbers: bool,
    /// Aliases to anchors that have not been seen yet produce promises that are resolved
    /// when the anchor appears later in the document. When false, such aliases fail
    /// immediately. Aliases to an anchor that is still being read (self-references) always
    /// produce promises.
    pub allow_forward_aliases: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            budget: Some(Budget::default()),
            strict_booleans: true,
            legacy_octal_numbers: false,
            allow_forward_aliases: true,
        }
    }
}

//! Recognition of the YAML core schema tags that steer scalar resolution.

pub(crate) const TAG_STR: &str = "!!str";
pub(crate) const TAG_STR_SHORTHAND: &str = "!str";
pub(crate) const TAG_STR_CANONICAL: &str = "tag:yaml.org,2002:str";
pub(crate) const TAG_STR_CANONICAL_ALT: &str = "tag:yaml.org,2002:!str";

pub(crate) const TAG_INT: &str = "!!int";
pub(crate) const TAG_INT_SHORTHAND: &str = "!int";
pub(crate) const TAG_INT_CANONICAL: &str = "tag:yaml.org,2002:int";
pub(crate) const TAG_INT_CANONICAL_ALT: &str = "tag:yaml.org,2002:!int";

pub(crate) const TAG_FLOAT: &str = "!!float";
pub(crate) const TAG_FLOAT_SHORTHAND: &str = "!float";
pub(crate) const TAG_FLOAT_CANONICAL: &str = "tag:yaml.org,2002:float";
pub(crate) const TAG_FLOAT_CANONICAL_ALT: &str = "tag:yaml.org,2002:!float";

pub(crate) const TAG_BOOL: &str = "!!bool";
pub(crate) const TAG_BOOL_SHORTHAND: &str = "!bool";
pub(crate) const TAG_BOOL_CANONICAL: &str = "tag:yaml.org,2002:bool";
pub(crate) const TAG_BOOL_CANONICAL_ALT: &str = "tag:yaml.org,2002:!bool";

pub(crate) const TAG_NULL: &str = "!!null";
pub(crate) const TAG_NULL_SHORTHAND: &str = "!null";
pub(crate) const TAG_NULL_CANONICAL: &str = "tag:yaml.org,2002:null";
pub(crate) const TAG_NULL_CANONICAL_ALT: &str = "tag:yaml.org,2002:!null";

/// Core schema tag attached to a scalar, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScalarTag {
    /// No tag, or a tag outside the core schema.
    None,
    Str,
    Int,
    Float,
    Bool,
    Null,
}

impl ScalarTag {
    pub(crate) fn of(tag: Option<&str>) -> Self {
        match tag {
            Some(TAG_STR | TAG_STR_SHORTHAND | TAG_STR_CANONICAL | TAG_STR_CANONICAL_ALT) => ScalarTag::Str,
            Some(TAG_INT | TAG_INT_SHORTHAND | TAG_INT_CANONICAL | TAG_INT_CANONICAL_ALT) => ScalarTag::Int,
            Some(TAG_FLOAT | TAG_FLOAT_SHORTHAND | TAG_FLOAT_CANONICAL | TAG_FLOAT_CANONICAL_ALT) => ScalarTag::Float,
            Some(TAG_BOOL | TAG_BOOL_SHORTHAND | TAG_BOOL_CANONICAL | TAG_BOOL_CANONICAL_ALT) => ScalarTag::Bool,
            Some(TAG_NULL | TAG_NULL_SHORTHAND | TAG_NULL_CANONICAL | TAG_NULL_CANONICAL_ALT) => ScalarTag::Null,
            _ => ScalarTag::None,
        }
    }
}

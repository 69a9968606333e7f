//! Coarse parameter type tags.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

const NUMERIC_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "f32", "f64",
];

/// External type tag attached to every action parameter.
///
/// The mapping is lossy: structured, optional, and temporal types all collapse
/// into [`TypeTag::Any`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Any integer or floating-point primitive.
    Number,
    /// Owned or borrowed UTF-8 string.
    String,
    /// Boolean primitive.
    Boolean,
    /// Catch-all for every type not covered above.
    Any,
}

impl TypeTag {
    /// Classifies a normalised Rust type name.
    ///
    /// Accepts the last path segment of a type (`String`, `i64`, `bool`) or a
    /// reference to one (`&str`, `&'a str`). Everything else maps to
    /// [`TypeTag::Any`].
    #[must_use]
    pub fn infer(rust_type: &str) -> Self {
        let name = strip_reference(rust_type.trim());
        if NUMERIC_TYPES.contains(&name) {
            Self::Number
        } else if matches!(name, "String" | "str") {
            Self::String
        } else if name == "bool" {
            Self::Boolean
        } else {
            Self::Any
        }
    }

    /// Returns the tag as it appears in the manifest.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Any => "any",
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn strip_reference(name: &str) -> &str {
    let Some(rest) = name.strip_prefix('&') else {
        return name;
    };
    let rest = rest.trim_start();
    let rest = match rest.strip_prefix('\'') {
        Some(lifetime) => lifetime
            .find(char::is_whitespace)
            .map_or("", |idx| &lifetime[idx..]),
        None => rest,
    };
    let rest = rest.trim_start();
    rest.strip_prefix("mut ").unwrap_or(rest).trim()
}

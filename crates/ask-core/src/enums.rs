//! Resolution state and the tri-state filter over it.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ResolutionFilter
// ---------------------------------------------------------------------------

/// Which resolution states a search admits.
///
/// ```text
/// "resolved"        → Resolved   (is_resolved = true)
/// "unresolved"      → Unresolved (is_resolved = false)
/// absent / anything → Any        (both)
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionFilter {
    Resolved,
    Unresolved,
    #[default]
    Any,
}

impl ResolutionFilter {
    /// Interpret a raw status token. Unrecognized tokens mean "no filter".
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("resolved") => Self::Resolved,
            Some("unresolved") => Self::Unresolved,
            None => Self::Any,
            Some(other) => {
                tracing::debug!(token = other, "unrecognized status token, ignoring");
                Self::Any
            }
        }
    }

    /// The `is_resolved` value this filter pins, if any.
    #[must_use]
    pub const fn required_state(self) -> Option<bool> {
        match self {
            Self::Resolved => Some(true),
            Self::Unresolved => Some(false),
            Self::Any => None,
        }
    }

    #[must_use]
    pub fn admits(self, is_resolved: bool) -> bool {
        self.required_state()
            .is_none_or(|required| required == is_resolved)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resolved => "resolved",
            Self::Unresolved => "unresolved",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for ResolutionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

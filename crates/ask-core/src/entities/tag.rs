use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named label shared across questions.
///
/// Names are unique and compared case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

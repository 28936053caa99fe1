//! Entity structs for askboard domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod question;
mod tag;

pub use question::{NewQuestion, Question};
pub use tag::Tag;

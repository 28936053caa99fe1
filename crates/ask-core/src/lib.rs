//! # ask-core
//!
//! Core types, query normalization, and error types for askboard.
//!
//! This crate provides the foundational types shared across all askboard crates:
//! - Entity structs for questions and tags
//! - The tri-state resolution filter and its lenient token parsing
//! - `QuestionQuery`, the normalized form of raw search parameters
//! - Question identifiers
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod query;

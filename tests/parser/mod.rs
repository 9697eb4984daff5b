//! Parser layer tests
//!
//! - Node rules and their kinds
//! - Transformations, items and hole checks
//! - Error codes, locations and hints

pub mod tests_transformations;

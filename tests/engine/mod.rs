//! Engine tests
//!
//! - Matching single nodes against left items
//! - Building trees from right items
//! - Rewriting sibling windows and whole trees

pub mod tests_conversion;
pub mod tests_matching;
pub mod tests_transformer;

//! Rule model tests
//!
//! - Inheritance topology and cycle rejection
//! - Tag merging across subtypes
//! - Re-serialization of parsed rules

pub mod tests_round_trip;
pub mod tests_tag_merge;
pub mod tests_topology;

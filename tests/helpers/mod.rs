//! Shared test helpers

#![allow(dead_code)]

pub mod rule_fixtures;
pub mod tree_helpers;

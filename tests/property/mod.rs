//! Property-based tests

pub mod validators_proptest;

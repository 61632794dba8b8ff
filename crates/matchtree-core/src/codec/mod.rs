//! Document codecs producing Actual and Expected trees.

pub mod json;

pub use json::{
    actual_from_str, actual_from_value, expected_from_str, expected_from_value, PatternOptions,
};

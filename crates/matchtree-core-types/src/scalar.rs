//! Scalar leaf values
//!
//! A `Scalar` is the value carried by an atomic tree node. Composite nodes
//! carry no scalar at all (`Option::None` at the node level), which is
//! distinct from `Scalar::Null` and from an empty string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of an atomic node
///
/// Integers and floats compare numerically, so `Scalar::Int(1)` equals
/// `Scalar::Float(1.0)`. All other variants compare only within their own kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Numeric view of the value, if it is an integer or a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether this value takes part in numeric comparisons
    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Float(_))
    }

    /// String view of the value, if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_and_float_compare_numerically() {
        assert_eq!(Scalar::Int(1), Scalar::Float(1.0));
        assert_ne!(Scalar::Int(1), Scalar::Float(1.5));
    }

    #[test]
    fn test_string_is_not_number() {
        assert_ne!(Scalar::Str("1".to_string()), Scalar::Int(1));
        assert_eq!(Scalar::from("1"), Scalar::Str("1".to_string()));
    }

    #[test]
    fn test_null_is_distinct_from_empty_string() {
        assert_ne!(Scalar::Null, Scalar::Str(String::new()));
        assert_eq!(Scalar::Null, Scalar::Null);
    }

    #[test]
    fn test_display_quotes_strings() {
        assert_eq!(Scalar::from("abc").to_string(), "\"abc\"");
        assert_eq!(Scalar::Int(42).to_string(), "42");
        assert_eq!(Scalar::Null.to_string(), "null");
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Scalar::Int(3).as_f64(), Some(3.0));
        assert_eq!(Scalar::Bool(true).as_f64(), None);
        assert!(Scalar::Float(0.5).is_numeric());
    }

    #[test]
    fn test_serialization() {
        let values = vec![
            Scalar::Null,
            Scalar::Bool(true),
            Scalar::Int(7),
            Scalar::Float(2.5),
            Scalar::from("x"),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,true,7,2.5,"x"]"#);
        let back: Vec<Scalar> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}

//! Assertion helpers for tests.

use crate::capture::Captures;
use crate::config::MatchConfig;
use crate::errors::{MatchTreeError, Result};
use crate::model::{ActualTree, ExpectedTree};

/// Match `actual` against `expected`, returning the captures on success
///
/// # Errors
/// * `Mismatch` - the trees differ; `report` is the rendered diff, pruned
///   and depth-limited per `config.report`
/// * `TooDeep` - recursion exceeded `config.max_depth`
pub fn verify(expected: &ExpectedTree, actual: &ActualTree, config: &MatchConfig) -> Result<Captures> {
    let report = expected.run(actual, config)?;
    if report.is_match() {
        let (_, captures) = report.into_parts();
        return Ok(captures);
    }
    Err(MatchTreeError::Mismatch {
        report: report.render(&config.report),
    })
}

/// Panic with the rendered diff unless `actual` satisfies `expected`
///
/// Evaluates to the recorded [`Captures`](crate::capture::Captures).
///
/// ```
/// use matchtree_core::assert_tree_match;
/// use matchtree_core::codec::{actual_from_str, expected_from_str, PatternOptions};
///
/// let actual = actual_from_str(r#"{"a": 1, "b": 2}"#).unwrap();
/// let expected = expected_from_str(r#"{"b": 2}"#, &PatternOptions::new()).unwrap();
/// assert_tree_match!(expected, actual);
/// ```
#[macro_export]
macro_rules! assert_tree_match {
    ($expected:expr, $actual:expr) => {
        $crate::assert_tree_match!($expected, $actual, &$crate::config::MatchConfig::default())
    };
    ($expected:expr, $actual:expr, $config:expr) => {
        match $crate::assert::verify(&$expected, &$actual, $config) {
            Ok(captures) => captures,
            Err(err) => panic!("{}", err),
        }
    };
}

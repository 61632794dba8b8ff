use crate::errors::{MatchTreeError, Result};
use matchtree_core_types::Scalar;
use std::collections::BTreeMap;

/// Values recorded by capture nodes during one match
///
/// Records are kept in the order they were observed. Labels declared by the
/// pattern are known up front, so a declared capture that observed nothing
/// yields an empty sequence rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Captures {
    labels: Vec<String>,
    log: Vec<(String, Scalar)>,
}

impl Captures {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            log: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, label: &str, value: Scalar) {
        self.log.push((label.to_string(), value));
    }

    /// Current position in the log, for a later [`Captures::rollback`]
    pub(crate) fn mark(&self) -> usize {
        self.log.len()
    }

    /// Drop everything recorded after `mark`
    pub(crate) fn rollback(&mut self, mark: usize) {
        self.log.truncate(mark);
    }

    /// Declared capture labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Total number of recorded values across all labels
    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Values recorded for `label`, in observation order
    ///
    /// # Errors
    /// * `CaptureNotFound` - the pattern declares no capture with this label
    pub fn values(&self, label: &str) -> Result<Vec<&Scalar>> {
        if !self.labels.iter().any(|l| l == label) {
            return Err(MatchTreeError::CaptureNotFound {
                label: label.to_string(),
            });
        }
        Ok(self
            .log
            .iter()
            .filter(|(l, _)| l == label)
            .map(|(_, v)| v)
            .collect())
    }

    /// Values recorded for `label` as numbers
    ///
    /// # Errors
    /// * `CaptureNotFound` - unknown label
    /// * `NonNumericCapture` - a recorded value is not an integer or float
    pub fn numbers(&self, label: &str) -> Result<Vec<f64>> {
        self.values(label)?
            .into_iter()
            .map(|value| {
                value.as_f64().ok_or_else(|| MatchTreeError::NonNumericCapture {
                    label: label.to_string(),
                    value: value.to_string(),
                })
            })
            .collect()
    }

    /// All recorded values grouped by label
    pub fn to_map(&self) -> BTreeMap<String, Vec<Scalar>> {
        let mut map: BTreeMap<String, Vec<Scalar>> = self
            .labels
            .iter()
            .map(|label| (label.clone(), Vec::new()))
            .collect();
        for (label, value) in &self.log {
            map.entry(label.clone()).or_default().push(value.clone());
        }
        map
    }
}

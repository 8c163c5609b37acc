use serde::{Deserialize, Serialize};

/// Execution parameters for the binarization pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinarizeParams {
    /// Split the histogram and binarization passes across worker threads.
    ///
    /// Only takes effect when the crate is built with the `rayon` feature;
    /// results are identical to the sequential path either way.
    pub parallel: bool,
    /// Minimal number of image rows handled by one parallel task.
    pub min_rows_per_task: usize,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self {
            parallel: false,
            min_rows_per_task: 64,
        }
    }
}

impl BinarizeParams {
    /// Default parameters with parallel execution switched on.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }
}

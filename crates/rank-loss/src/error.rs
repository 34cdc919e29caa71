/// Errors surfaced by loss construction and evaluation.
///
/// All variants are detected synchronously, before or at the start of the
/// single computation pass, and are surfaced directly to the caller. The
/// computation is deterministic given its inputs, so nothing is retried
/// and no partial results are returned.
#[derive(Debug, thiserror::Error)]
pub enum LossError {
    /// Margin bounds are inverted at construction.
    #[error("invalid margin bounds: gamma_min {gamma_min} > gamma_max {gamma_max}")]
    InvalidMarginBounds { gamma_min: f64, gamma_max: f64 },

    /// Predictions and targets disagree on shape.
    #[error("predictions shape {predictions:?} does not match targets shape {targets:?}")]
    ShapeMismatch {
        predictions: [usize; 3],
        targets: [usize; 3],
    },

    /// The feature axis is empty, so pair sampling is impossible.
    #[error("feature axis of shape {dims:?} has no entries to sample")]
    DegenerateFeatureAxis { dims: [usize; 3] },

    /// The loss capability was invoked on a variant that does not
    /// implement it.
    #[error("loss variant does not implement compute")]
    Unsupported,
}

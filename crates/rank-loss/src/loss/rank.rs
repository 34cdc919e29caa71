//! Adaptive-margin pairwise ranking loss.
//!
//! Constrains the relative ordering of channels at every timestep of a
//! `[batch, seq_len, dim]` curve: per cell one random channel pair is
//! compared, the predicted gap is signed by the target order, and a
//! softplus penalty scaled by a dispersion-derived margin is applied.
//! Suited to outputs in the 0-1 range whose absolute calibration is loose.

use burn::prelude::*;
use burn::tensor::activation;
use burn::tensor::TensorData;
use rand::{Rng, RngCore};

use crate::error::LossError;
use crate::loss::Loss;

/// Configuration for [`RankLoss`].
///
/// The margin for each `(batch, seq_len)` cell is the standard deviation
/// of the target values across the feature axis, clamped to
/// `[gamma_min, gamma_max]`. Cells whose targets are nearly uniform carry
/// little ordering signal and bottom out at `gamma_min`; strongly
/// dispersed cells are penalized at up to `gamma_max`.
#[derive(Config, Debug)]
pub struct RankLossConfig {
    /// Lower clamp for the per-timestep margin.
    #[config(default = 0.05)]
    pub gamma_min: f64,
    /// Upper clamp for the per-timestep margin.
    #[config(default = 0.3)]
    pub gamma_max: f64,
}

impl RankLossConfig {
    /// Validate the margin bounds and build the loss.
    ///
    /// # Errors
    /// [`LossError::InvalidMarginBounds`] if `gamma_min > gamma_max`.
    pub fn init(&self) -> Result<RankLoss, LossError> {
        if self.gamma_min > self.gamma_max {
            return Err(LossError::InvalidMarginBounds {
                gamma_min: self.gamma_min,
                gamma_max: self.gamma_max,
            });
        }
        tracing::debug!(
            gamma_min = self.gamma_min,
            gamma_max = self.gamma_max,
            "RankLoss initialized"
        );
        Ok(RankLoss {
            gamma_min: self.gamma_min,
            gamma_max: self.gamma_max,
        })
    }
}

/// Pairwise ranking loss over the feature axis of `[batch, seq_len, dim]`
/// curves.
///
/// Per `(batch, seq_len)` cell:
/// 1. margin `γ` = std of targets across the feature axis, clamped to
///    `[gamma_min, gamma_max]`;
/// 2. one channel pair `(i, j)` is drawn uniformly with replacement
///    (`i == j` is a legal, zero-information draw — never resampled);
/// 3. `sign = +1` if `target_i ≥ target_j` else `-1` (ties resolve to
///    `+1`), `delta = (s_i − s_j) · sign`;
/// 4. the cell's term is `softplus(γ · delta)`.
///
/// The scalar result is the mean over all `batch × seq_len` terms. Padded
/// timesteps are not masked here; mask them before calling.
#[derive(Debug, Clone)]
pub struct RankLoss {
    gamma_min: f64,
    gamma_max: f64,
}

impl RankLoss {
    /// Compute the loss for a batch of score curves against target curves.
    ///
    /// Both tensors must have identical `[batch, seq_len, dim]` shapes with
    /// `dim ≥ 1`. Pair sampling draws from `rng`; with a fixed seed and
    /// identical inputs, the sampled pairs and the loss are identical
    /// across calls.
    ///
    /// # Errors
    /// [`LossError::ShapeMismatch`] or [`LossError::DegenerateFeatureAxis`]
    /// on invalid inputs.
    pub fn forward<B: Backend>(
        &self,
        scores: Tensor<B, 3>,
        targets: Tensor<B, 3>,
        rng: &mut impl Rng,
    ) -> Result<Tensor<B, 1>, LossError> {
        let score_dims = scores.dims();
        let target_dims = targets.dims();
        if score_dims != target_dims {
            return Err(LossError::ShapeMismatch {
                predictions: score_dims,
                targets: target_dims,
            });
        }
        let [batch, seq_len, dim] = score_dims;
        if dim < 1 {
            return Err(LossError::DegenerateFeatureAxis { dims: score_dims });
        }
        let device = scores.device();

        let gamma = adaptive_margin(&targets, self.gamma_min, self.gamma_max);
        let (i_idx, j_idx) = sample_pair_indices::<B, _>(batch, seq_len, dim, rng, &device);

        let s_i = take_along_features(scores.clone(), i_idx.clone());
        let s_j = take_along_features(scores, j_idx.clone());
        let y_i = take_along_features(targets.clone(), i_idx);
        let y_j = take_along_features(targets, j_idx);

        // +1 where target_i >= target_j, else -1
        let agree = y_i.greater_equal(y_j);
        let sign = Tensor::<B, 2>::from_data(agree.int().into_data(), &device) * 2.0 - 1.0;

        let delta = (s_i - s_j) * sign;
        let terms = activation::softplus(gamma * delta, 1.0);
        Ok(terms.mean())
    }
}

impl<B: Backend> Loss<B> for RankLoss {
    fn compute(
        &self,
        predictions: Tensor<B, 3>,
        targets: Tensor<B, 3>,
        mut rng: &mut dyn RngCore,
    ) -> Result<Tensor<B, 1>, LossError> {
        self.forward(predictions, targets, &mut rng)
    }
}

/// Per-cell margin: standard deviation of the targets along the feature
/// axis (population normalization), clamped to `[gamma_min, gamma_max]`.
/// Output shape `[batch, seq_len]`.
fn adaptive_margin<B: Backend>(
    targets: &Tensor<B, 3>,
    gamma_min: f64,
    gamma_max: f64,
) -> Tensor<B, 2> {
    targets
        .clone()
        .var_bias(2)
        .sqrt()
        .clamp(gamma_min, gamma_max)
        .squeeze::<2>(2)
}

/// Draw one comparison pair of feature indices per `(batch, seq_len)` cell.
///
/// Each entry is uniform over `[0, dim)` with replacement; `i == j` is a
/// legal draw. The full `i` array is filled before the `j` array, each in
/// row-major cell order, so the output is a pure function of the generator
/// state. `dim == 1` forces `i = j = 0` everywhere.
fn sample_pair_indices<B: Backend, R: Rng>(
    batch: usize,
    seq_len: usize,
    dim: usize,
    rng: &mut R,
    device: &B::Device,
) -> (Tensor<B, 2, Int>, Tensor<B, 2, Int>) {
    let cells = batch * seq_len;
    let i_raw: Vec<i64> = (0..cells).map(|_| rng.gen_range(0..dim as i64)).collect();
    let j_raw: Vec<i64> = (0..cells).map(|_| rng.gen_range(0..dim as i64)).collect();
    (
        Tensor::from_data(TensorData::new(i_raw, [batch, seq_len]), device),
        Tensor::from_data(TensorData::new(j_raw, [batch, seq_len]), device),
    )
}

/// Gather `values[b, t, idx[b, t]]` for every cell independently.
///
/// The index tensor is unsqueezed to `[batch, seq_len, 1]` so the gather
/// aligns each batch and sequence position with its own sampled feature
/// index.
fn take_along_features<B: Backend>(values: Tensor<B, 3>, idx: Tensor<B, 2, Int>) -> Tensor<B, 2> {
    values.gather(2, idx.unsqueeze_dim::<3>(2)).squeeze::<2>(2)
}

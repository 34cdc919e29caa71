//! Loss capability trait and the concrete ranking loss.

mod rank;

pub use rank::{RankLoss, RankLossConfig};

use burn::prelude::*;
use rand::RngCore;

use crate::error::LossError;

/// A training loss over `[batch, seq_len, dim]` predictions and targets.
///
/// The single capability is [`compute`](Loss::compute): batch of
/// predictions against ground truth, scalar loss tensor out. The default
/// body rejects the call with [`LossError::Unsupported`]; a concrete loss
/// overrides it. The trait is object-safe, so a training loop can hold a
/// `&dyn Loss<B>` and swap variants without re-monomorphizing.
pub trait Loss<B: Backend> {
    /// Compute the scalar loss for a batch of predictions against targets.
    ///
    /// Any randomness (e.g. pair sampling) draws from `rng`; pass a seeded
    /// generator for reproducible results.
    fn compute(
        &self,
        predictions: Tensor<B, 3>,
        targets: Tensor<B, 3>,
        rng: &mut dyn RngCore,
    ) -> Result<Tensor<B, 1>, LossError> {
        let _ = (predictions, targets, rng);
        Err(LossError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArray;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestBackend = NdArray<f32>;

    /// A loss variant that never overrides the capability.
    struct Unimplemented;

    impl Loss<TestBackend> for Unimplemented {}

    #[test]
    fn default_compute_is_unsupported() {
        let device = Default::default();
        let predictions = Tensor::<TestBackend, 3>::zeros([1, 2, 3], &device);
        let targets = Tensor::<TestBackend, 3>::zeros([1, 2, 3], &device);
        let mut rng = StdRng::seed_from_u64(0);

        let err = Unimplemented
            .compute(predictions, targets, &mut rng)
            .unwrap_err();
        assert!(
            matches!(err, LossError::Unsupported),
            "expected Unsupported, got {err:?}"
        );
    }
}

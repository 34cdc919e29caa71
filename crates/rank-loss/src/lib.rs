//! Training losses for per-timestep control-expression intensity curves.
//!
//! Models in this project emit `[batch, seq_len, dim]` intensity curves in
//! the 0-1 range, one channel per control expression. Absolute calibration
//! of those outputs is imperfect; what matters at every timestep is the
//! relative ordering of the channels. [`RankLoss`] penalizes randomly
//! sampled channel pairs whose predicted order disagrees with the target
//! order, scaled by a per-timestep margin derived from target dispersion.
//!
//! Losses are generic over `B: Backend` and return a scalar
//! `Tensor<B, 1>`, so a training loop can call `.backward()` on the result.
//! Pair sampling draws from an explicitly injected `rand` generator;
//! seed it for reproducible runs.

pub mod error;
pub mod loss;

pub use error::LossError;
pub use loss::{Loss, RankLoss, RankLossConfig};

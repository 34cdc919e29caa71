//! Minimal consumer demo: drive a raw prediction tensor with manual
//! gradient steps against synthetic target curves and print the loss
//! trajectory.
//!
//! Usage:
//!   cargo run -p rank-loss --example train_synthetic

use burn::backend::ndarray::NdArray;
use burn::backend::Autodiff;
use burn::prelude::*;
use burn::tensor::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

use rank_loss::RankLossConfig;

type B = Autodiff<NdArray<f32>>;

const STEPS: usize = 25;
const LR: f32 = 0.5;

fn main() {
    let device = Default::default();
    let mut rng = StdRng::seed_from_u64(17);
    let loss_fn = RankLossConfig::new().init().expect("default margin bounds");

    let targets =
        Tensor::<B, 3>::random([4, 16, 8], Distribution::Uniform(0.0, 1.0), &device);
    let mut preds =
        Tensor::<B, 3>::random([4, 16, 8], Distribution::Uniform(0.0, 1.0), &device);

    for step in 0..STEPS {
        let tracked = preds.clone().require_grad();
        let loss = loss_fn
            .forward(tracked.clone(), targets.clone(), &mut rng)
            .expect("shapes are fixed");
        let value: f32 = loss.clone().into_scalar().elem();

        let grads = loss.backward();
        let grad = tracked.grad(&grads).expect("predictions are tracked");
        let updated = (tracked.inner() - grad.mul_scalar(LR)).clamp(0.0, 1.0);
        preds = Tensor::from_inner(updated);

        println!("step {step:>2}  rank_loss = {value:.5}");
    }
}

#![cfg(test)]

use ndarray::{Array1, Array2, Axis};
use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{IMAGE_SIDE, INPUT_SIZE, MlErr, Mlp, Model, NUM_CLASSES, ParameterStore, predict};

fn random_params(seed: u64, hidden: usize) -> ParameterStore {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sample = |shape: usize| -> Vec<f32> {
        (0..shape).map(|_| rng.random_range(-0.5..0.5)).collect()
    };

    let w1 = Array2::from_shape_vec((INPUT_SIZE, hidden), sample(INPUT_SIZE * hidden)).unwrap();
    let b1 = Array1::from_vec(sample(hidden));
    let w2 = Array2::from_shape_vec((hidden, NUM_CLASSES), sample(hidden * NUM_CLASSES)).unwrap();
    let b2 = Array1::from_vec(sample(NUM_CLASSES));
    ParameterStore::new(w1, b1, w2, b2).unwrap()
}

fn image<F: Fn(f32, f32) -> bool>(lit: F) -> Vec<f32> {
    let center = (IMAGE_SIDE as f32 - 1.) / 2.;
    (0..INPUT_SIZE)
        .map(|i| {
            let (y, x) = ((i / IMAGE_SIDE) as f32, (i % IMAGE_SIDE) as f32);
            if lit(y - center, x - center) { 1. } else { 0. }
        })
        .collect()
}

fn ring() -> Vec<f32> {
    image(|dy, dx| {
        let r = (dy * dy + dx * dx).sqrt();
        (7.0..=10.0).contains(&r)
    })
}

fn bar() -> Vec<f32> {
    image(|dy, dx| dx.abs() <= 1. && dy.abs() <= 10.)
}

/// One hidden unit per class. Unit 0 matches a ring, unit 1 a vertical bar and the rest
/// stay silent, each unit feeds its own class.
fn template_params() -> ParameterStore {
    let mut w1 = Array2::<f32>::zeros((INPUT_SIZE, NUM_CLASSES));
    for (class, template) in [(0, ring()), (1, bar())] {
        let lit = template.iter().sum::<f32>();
        let column = Array1::from_vec(template) / lit;
        w1.column_mut(class).assign(&column);
    }

    let w2 = Array2::eye(NUM_CLASSES) * 10.;
    ParameterStore::new(
        w1,
        Array1::zeros(NUM_CLASSES),
        w2,
        Array1::zeros(NUM_CLASSES),
    )
    .unwrap()
}

#[test]
fn blank_image_is_decided_by_the_biases() {
    let params = random_params(7, 16);
    let (w1, _, w2, mut b2) = (
        params.w1().to_owned(),
        params.b1().to_owned(),
        params.w2().to_owned(),
        params.b2().to_owned(),
    );
    b2[6] = 5.;

    // With a negative hidden bias every hidden unit is off for a blank image.
    let params = ParameterStore::new(w1, Array1::from_elem(16, -1.), w2, b2).unwrap();
    let mlp = Mlp::new(&params);
    let blank = [0.; INPUT_SIZE];

    let first = mlp.predict_one(&blank).unwrap();
    assert_eq!(first, 6);
    for _ in 0..10 {
        assert_eq!(mlp.predict_one(&blank).unwrap(), first);
    }
}

#[test]
fn ring_is_a_zero_and_bar_is_a_one() {
    let params = template_params();
    let mlp = Mlp::new(&params);

    assert_eq!(mlp.predict_one(&ring()).unwrap(), 0);
    assert_eq!(mlp.predict_one(&bar()).unwrap(), 1);
}

#[test]
fn short_rows_are_rejected() {
    let params = random_params(1, 8);

    let err = Mlp::new(&params).predict_one(&[0.5; 700]).unwrap_err();

    assert_eq!(
        err,
        MlErr::ShapeMismatch {
            what: "input columns",
            got: 700,
            expected: INPUT_SIZE
        }
    );
}

#[test]
fn batch_matches_row_by_row() {
    const ROWS: usize = 5;

    let params = random_params(42, 32);
    let mlp = Mlp::new(&params);
    let mut rng = StdRng::seed_from_u64(3);
    let x = Array2::from_shape_fn((ROWS, INPUT_SIZE), |_| rng.random::<f32>());

    let batch = predict(x.view(), &params).unwrap();
    assert_eq!(batch.len(), ROWS);

    for (row, expected) in x.axis_iter(Axis(0)).zip(&batch) {
        let single = mlp.predict_one(row.as_slice().unwrap()).unwrap();
        assert_eq!(single, *expected);
    }

    let pass = mlp.forward(x.view()).unwrap();
    for (i, row) in x.axis_iter(Axis(0)).enumerate() {
        let alone = mlp.forward(row.insert_axis(Axis(0))).unwrap();
        for (a, b) in pass.a2.row(i).iter().zip(alone.a2.row(0)) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn predictions_are_stable_digits(
        seed in 0u64..1000,
        pixels in proptest::collection::vec(0.0f32..=1.0f32, INPUT_SIZE..=INPUT_SIZE)
    ) {
        let params = random_params(seed, 24);
        let mlp = Mlp::new(&params);

        let first = mlp.predict_one(&pixels).unwrap();
        let second = mlp.predict_one(&pixels).unwrap();

        prop_assert!(first < NUM_CLASSES);
        prop_assert_eq!(first, second);
    }
}

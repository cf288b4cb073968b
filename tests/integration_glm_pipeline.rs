//! Integration tests for the GLM estimator and its data sources.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: from a numeric table or synthetic
//!   arrays, through `GLMData` validation and maximum-likelihood fitting,
//!   to response-scale predictions.
//! - Check coefficient recovery for each family on deterministic synthetic
//!   samples whose sufficient statistics sit close to the true model.
//!
//! Coverage
//! --------
//! - `glm::model::GLM`: `fit`, `predict`, `linear_predictor`,
//!   `coefficients`, refitting, and the unfitted precondition.
//! - `glm::family`: link bounds for saturating linear predictors and
//!   runtime family selection.
//! - `data::loader`: `CsvTextLoader` → `add_constant` → `glm_data` → fit.
//! - `optimization::loglik_optimizer`: BFGS and L-BFGS paths through
//!   `MLEOptions`.
//!
//! Exclusions
//! ----------
//! - Likelihood closed forms, option validation and error mapping; those
//!   are covered by unit tests.
//! - Python bindings.
use std::str::FromStr;

use ndarray::{Array1, Array2, array};
use rust_glm::{
    data::{CsvTextLoader, DataError, DataLoader},
    glm::{
        Bernoulli, BernoulliGLM, Family, GLM, GLMData, GLMError, GLMFamily, Normal, NormalGLM,
        Poisson, PoissonGLM,
    },
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, QuasiNewton, Tolerances},
};

/// Design `[1, x]` with `x` taking each of `levels`, repeated `reps` times.
fn grouped_design(levels: &[f64], reps: usize) -> Array2<f64> {
    let n = levels.len() * reps;
    Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { 1.0 } else { levels[i / reps] })
}

fn logistic(eta: f64) -> f64 {
    1.0 / (1.0 + (-eta).exp())
}

fn assert_close(actual: &Array1<f64>, expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < tol, "got {actual}, expected {expected:?} (tol {tol})");
    }
}

#[test]
// Purpose
// -------
// A Normal GLM recovers intercept and slope under small bounded noise.
//
// Given
// -----
// - n = 200, x evenly spaced on [-5, 5), y = 1.5 - 0.7·x + 0.1·sin(3i).
//
// Expect
// ------
// - β̂ within 0.05 of (1.5, -0.7) and the fit reports convergence.
fn normal_recovers_linear_coefficients() {
    // Arrange
    let n = 200;
    let xi = |i: usize| i as f64 / 20.0 - 5.0;
    let x = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { 1.0 } else { xi(i) });
    let y = Array1::from_shape_fn(n, |i| 1.5 - 0.7 * xi(i) + 0.1 * (3.0 * i as f64).sin());
    let mut model = NormalGLM::from_arrays(Normal, x, y).expect("valid data");

    // Act
    let converged = model.fit().expect("fit should succeed").converged;

    // Assert
    assert!(converged);
    assert_close(model.coefficients().expect("fitted"), &[1.5, -0.7], 0.05);
}

#[test]
// Purpose
// -------
// A Bernoulli GLM recovers logistic coefficients.
//
// Given
// -----
// - Five x-levels in [-2, 2] with 100 replicates each; at each level the
//   number of ones is `round(100 · logistic(0.5 + x))`.
//
// Expect
// ------
// - β̂ within 0.1 of (0.5, 1.0); predicted probabilities strictly in (0, 1).
fn bernoulli_recovers_logistic_coefficients() {
    // Arrange
    let levels = [-2.0, -1.0, 0.0, 1.0, 2.0];
    let reps = 100;
    let x = grouped_design(&levels, reps);
    let y = Array1::from_shape_fn(levels.len() * reps, |i| {
        let ones = (reps as f64 * logistic(0.5 + levels[i / reps])).round() as usize;
        if i % reps < ones { 1.0 } else { 0.0 }
    });
    let mut model = BernoulliGLM::from_arrays(Bernoulli, x, y).expect("valid data");

    // Act
    model.fit().expect("fit should succeed");
    let probs = model.predict(array![[1.0, -2.0], [1.0, 0.0], [1.0, 2.0]].view()).expect("fitted");

    // Assert
    assert_close(model.coefficients().expect("fitted"), &[0.5, 1.0], 0.1);
    assert!(probs.iter().all(|&p| p > 0.0 && p < 1.0));
    assert!(probs[0] < probs[1] && probs[1] < probs[2]);
}

#[test]
// Purpose
// -------
// A Poisson GLM recovers log-linear coefficients.
//
// Given
// -----
// - Five x-levels in [-1, 1] with 50 replicates each; counts at a level
//   with rate λ are `floor((j+1)λ) - floor(jλ)`, so their mean is ≈ λ.
// - True λ = exp(0.3 + 0.8·x).
//
// Expect
// ------
// - β̂ within 0.1 of (0.3, 0.8); predicted means positive.
fn poisson_recovers_log_linear_coefficients() {
    // Arrange
    let levels = [-1.0, -0.5, 0.0, 0.5, 1.0];
    let reps = 50;
    let x = grouped_design(&levels, reps);
    let y = Array1::from_shape_fn(levels.len() * reps, |i| {
        let lambda = (0.3 + 0.8 * levels[i / reps]).exp();
        let j = (i % reps) as f64;
        ((j + 1.0) * lambda).floor() - (j * lambda).floor()
    });
    let mut model = PoissonGLM::from_arrays(Poisson, x, y).expect("valid data");

    // Act
    model.fit().expect("fit should succeed");
    let mu = model.predict(array![[1.0, -1.0], [1.0, 1.0]].view()).expect("fitted");

    // Assert
    assert_close(model.coefficients().expect("fitted"), &[0.3, 0.8], 0.1);
    assert!(mu.iter().all(|&m| m > 0.0 && m.is_finite()));
}

#[test]
// Purpose
// -------
// Counts in the millions fit without a line-search or non-finite-cost
// failure, even though the first trial steps push η far past the rate
// clamp.
//
// Given
// -----
// - Intercept-only design with counts 1e6, 2e6 and 3e6.
//
// Expect
// ------
// - `fit` succeeds and β̂ ≈ ln(2e6), the log of the sample mean.
// - The fitted mean is ≈ 2e6.
fn poisson_fits_counts_in_the_millions() {
    // Arrange
    let x = array![[1.0], [1.0], [1.0]];
    let y = array![1.0e6, 2.0e6, 3.0e6];
    let mut model = PoissonGLM::from_arrays(Poisson, x, y).expect("valid data");

    // Act
    model.fit().expect("fit should succeed");
    let mu = model.predict(array![[1.0]].view()).expect("fitted");

    // Assert
    assert_close(model.coefficients().expect("fitted"), &[2.0e6_f64.ln()], 1e-3);
    assert!((mu[0] / 2.0e6 - 1.0).abs() < 1e-3, "mu = {}", mu[0]);
}

#[test]
// Purpose
// -------
// L-BFGS with Hager–Zhang reaches the same Normal solution as the default.
//
// Given
// -----
// - The 4-point table X = [[1,0],[0,1],[1,1],[2,1]], y = [3.0, 1.0, 4.2, 5.1].
// - Options: L-BFGS, memory 5, Hager–Zhang, default tolerances.
//
// Expect
// ------
// - β̂ ≈ (21.3/9, 9.6/9) within 1e-3 for both configurations.
fn lbfgs_and_bfgs_agree_on_small_normal_problem() {
    // Arrange
    let x = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [2.0, 1.0]];
    let y = array![3.0, 1.0, 4.2, 5.1];
    let data = GLMData::new(x, y).expect("valid data");
    let lbfgs = MLEOptions::new(
        Tolerances::default(),
        QuasiNewton::Lbfgs,
        LineSearcher::HagerZhang,
        Some(5),
        None,
        false,
    )
    .expect("valid options");
    let mut default_model = GLM::new(Normal, data.clone(), MLEOptions::default());
    let mut lbfgs_model = GLM::new(Normal, data, lbfgs);

    // Act
    default_model.fit().expect("bfgs fit");
    lbfgs_model.fit().expect("lbfgs fit");

    // Assert
    let expected = [21.3 / 9.0, 9.6 / 9.0];
    assert_close(default_model.coefficients().expect("fitted"), &expected, 1e-3);
    assert_close(lbfgs_model.coefficients().expect("fitted"), &expected, 1e-3);
}

#[test]
// Purpose
// -------
// Fitting is required before any prediction, for a runtime-selected family.
//
// Given
// -----
// - An unfitted `GLM<GLMFamily>` built from the family name "poisson".
//
// Expect
// ------
// - `predict` and `linear_predictor` return `ModelNotFitted`; after `fit`
//   both succeed.
fn predict_requires_fit() {
    let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
    let y = array![1.0, 2.0, 4.0];
    let family = GLMFamily::from_str("poisson").expect("known family");
    let mut model = GLM::from_arrays(family, x.clone(), y).expect("valid data");

    assert_eq!(model.predict(x.view()), Err(GLMError::ModelNotFitted));
    assert_eq!(model.linear_predictor(x.view()), Err(GLMError::ModelNotFitted));

    model.fit().expect("fit should succeed");
    assert!(model.is_fitted());
    assert_eq!(model.predict(x.view()).expect("fitted").len(), 3);
}

#[test]
// Purpose
// -------
// Refitting the same data restarts from zeros and reproduces the estimate.
//
// Given
// -----
// - A small Bernoulli table with overlapping classes, fitted twice.
//
// Expect
// ------
// - Coefficients and log-likelihood agree to 1e-9.
fn refit_reproduces_the_estimate() {
    let x = array![[1.0, -1.0], [1.0, -0.5], [1.0, 0.0], [1.0, 0.5], [1.0, 1.0], [1.0, 1.5]];
    let y = array![0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
    let mut model = BernoulliGLM::from_arrays(Bernoulli, x, y).expect("valid data");

    let first = model.fit().expect("first fit").clone();
    let second = model.fit().expect("second fit").clone();

    for (a, b) in first.theta_hat.iter().zip(second.theta_hat.iter()) {
        assert!((a - b).abs() < 1e-9);
    }
    assert!((first.value - second.value).abs() < 1e-9);
}

#[test]
// Purpose
// -------
// Inverse links stay in range for saturating linear predictors.
//
// Given
// -----
// - η = ±50 through the Bernoulli and Poisson links, directly and via a
//   fitted model's `predict` on extreme rows.
//
// Expect
// ------
// - Bernoulli values lie strictly inside (0, 1); Poisson values are
//   finite and strictly positive.
fn links_stay_in_range_for_extreme_predictors() {
    for eta in [-50.0, 50.0] {
        let p = Bernoulli.link_function(eta);
        let mu = Poisson.link_function(eta);
        assert!(p > 0.0 && p < 1.0, "logistic({eta}) = {p}");
        assert!(mu > 0.0 && mu.is_finite(), "exp({eta}) = {mu}");
    }

    let x = array![[1.0, -1.0], [1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];
    let y = array![0.0, 1.0, 0.0, 1.0];
    let mut model = BernoulliGLM::from_arrays(Bernoulli, x, y).expect("valid data");
    model.fit().expect("fit should succeed");
    let extreme = array![[1.0, 1e6], [1.0, -1e6]];
    let probs = model.predict(extreme.view()).expect("fitted");
    assert!(probs.iter().all(|&p| p > 0.0 && p < 1.0));
}

#[test]
// Purpose
// -------
// The Normal link is the identity on arbitrary inputs.
//
// Given
// -----
// - η ∈ {-1e6, -1, 0, 2.5, 1e6}.
//
// Expect
// ------
// - `link_function(η) == η` exactly.
fn normal_link_is_identity() {
    for eta in [-1e6, -1.0, 0.0, 2.5, 1e6] {
        assert_eq!(Normal.link_function(eta), eta);
        assert_eq!(GLMFamily::Normal.link_function(eta), eta);
    }
}

#[test]
// Purpose
// -------
// A CSV table goes through the loader, gains an intercept and fits.
//
// Given
// -----
// - CSV text with header `x,y` and rows on the exact line y = 2 + 3x.
//
// Expect
// ------
// - Headers become `["const", "x", "y"]`.
// - The Normal fit recovers (2, 3) within 1e-3.
fn csv_text_pipeline_fits_exact_line() {
    // Arrange
    let text = "x,y\n0,2\n1,5\n2,8\n3,11\n4,14\n5,17\n";
    let mut loader = CsvTextLoader::new(text);
    assert_eq!(loader.glm_data().err(), Some(DataError::NotLoaded));

    // Act
    loader.load_data().expect("valid csv");
    loader.add_constant().expect("loaded");
    let data = loader.glm_data().expect("valid table");
    let mut model = GLM::new(GLMFamily::Normal, data, MLEOptions::default());
    model.fit().expect("fit should succeed");

    // Assert
    assert_eq!(loader.headers().expect("loaded"), ["const", "x", "y"]);
    assert_eq!(loader.x_transpose().expect("loaded").dim(), (2, 6));
    assert_close(model.coefficients().expect("fitted"), &[2.0, 3.0], 1e-3);
}

#[test]
// Purpose
// -------
// Family names parse case-insensitively and unknown names are rejected.
//
// Given
// -----
// - "Normal", "GAUSSIAN", "logit", "Poisson" and "gamma".
//
// Expect
// ------
// - The first four map to their families; "gamma" is `UnknownFamily`.
fn family_names_parse() {
    assert_eq!(GLMFamily::from_str("Normal"), Ok(GLMFamily::Normal));
    assert_eq!(GLMFamily::from_str("GAUSSIAN"), Ok(GLMFamily::Normal));
    assert_eq!(GLMFamily::from_str("logit"), Ok(GLMFamily::Bernoulli));
    assert_eq!(GLMFamily::from_str("Poisson"), Ok(GLMFamily::Poisson));
    assert_eq!(
        GLMFamily::from_str("gamma"),
        Err(GLMError::UnknownFamily { name: "gamma".to_string() })
    );
}

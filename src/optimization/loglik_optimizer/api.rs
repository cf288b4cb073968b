//! High-level entry point for maximizing a [`LogLikelihood`].
//!
//! Picks BFGS or L-BFGS and the line search from [`MLEOptions`], wraps the
//! model in an [`ArgMinAdapter`] (which *minimizes* `-ℓ(θ)`), and hands the
//! run to [`run_bfgs`] / [`run_lbfgs`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{
            build_bfgs_hager_zhang, build_bfgs_more_thuente, build_lbfgs_hager_zhang,
            build_lbfgs_more_thuente,
        },
        run::{run_bfgs, run_lbfgs},
        traits::{LineSearcher, LogLikelihood, MLEOptions, QuasiNewton},
    },
};

/// Maximize `ℓ(θ)` starting from `theta0`.
///
/// # Behavior
/// - Validates the starting point via `f.check(&theta0, data)`.
/// - Builds the solver selected by `opts.method` × `opts.line_searcher`.
/// - Runs it with the runtime limits in `opts` and returns an
///   [`OptimOutcome`] expressed in log-likelihood terms.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder and runtime errors (line-search failures, model
///   errors raised during evaluation, non-finite results).
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_glm::optimization::errors::OptResult;
/// use rust_glm::optimization::loglik_optimizer::{maximize, LogLikelihood, MLEOptions, Theta};
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_glm::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match (opts.method, opts.line_searcher) {
        (QuasiNewton::Bfgs, LineSearcher::MoreThuente) => {
            let solver = build_bfgs_more_thuente(opts)?;
            run_bfgs(theta0, opts, problem, solver)
        }
        (QuasiNewton::Bfgs, LineSearcher::HagerZhang) => {
            let solver = build_bfgs_hager_zhang(opts)?;
            run_bfgs(theta0, opts, problem, solver)
        }
        (QuasiNewton::Lbfgs, LineSearcher::MoreThuente) => {
            let solver = build_lbfgs_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        (QuasiNewton::Lbfgs, LineSearcher::HagerZhang) => {
            let solver = build_lbfgs_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::traits::Tolerances,
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Dispatch over all four method / line-search combinations.
    // - `check` running before any solver work.
    // -------------------------------------------------------------------------

    /// ℓ(θ) = -(θ₀ - 1)² - 2(θ₁ + 0.5)².
    struct Bowl;

    impl LogLikelihood for Bowl {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            Ok(-(theta[0] - 1.0).powi(2) - 2.0 * (theta[1] + 0.5).powi(2))
        }

        fn check(&self, theta: &Theta, _: &()) -> OptResult<()> {
            if theta.len() != 2 {
                return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
            }
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // Every solver combination reaches the same maximizer.
    //
    // Given
    // -----
    // - The `Bowl` log-likelihood, θ₀ = 0, default tolerances.
    //
    // Expect
    // ------
    // - θ̂ ≈ (1, -0.5) within 1e-4 for each combination.
    fn maximize_dispatches_every_solver_combination() {
        for method in [QuasiNewton::Bfgs, QuasiNewton::Lbfgs] {
            for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
                let opts = MLEOptions::new(Tolerances::default(), method, ls, None, None, false)
                    .expect("options should be valid");

                let out = maximize(&Bowl, array![0.0, 0.0], &(), &opts)
                    .unwrap_or_else(|e| panic!("{method:?}/{ls:?} failed: {e}"));

                assert!((out.theta_hat[0] - 1.0).abs() < 1e-4, "{method:?}/{ls:?}");
                assert!((out.theta_hat[1] + 0.5).abs() < 1e-4, "{method:?}/{ls:?}");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // A starting point rejected by `check` never reaches the solver.
    //
    // Given
    // -----
    // - θ₀ of length 3 for a two-parameter model.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 2, actual: 3 }`.
    fn maximize_runs_check_first() {
        let err = maximize(&Bowl, array![0.0, 0.0, 0.0], &(), &MLEOptions::default())
            .expect_err("check should fail");

        assert_eq!(err, OptError::ThetaLengthMismatch { expected: 2, actual: 3 });
    }
}

//! Execution helpers that run an `argmin` quasi-Newton solver on a
//! log-likelihood problem and return a crate-friendly [`OptimOutcome`].
//!
//! Both runners wire up the same runtime concerns:
//! - initial parameters `theta0` (and, for BFGS, a scaled identity inverse
//!   Hessian),
//! - `max_iters` from [`Tolerances`](super::Tolerances),
//! - the optional wall-clock `timeout`,
//! - the optional slog observer (behind the `obs_slog` feature).
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
        types::InvHessian,
    },
};
use argmin::core::{CostFunction, Executor, Gradient, IterState, Solver, State};
use argmin_math::ArgminL2Norm;

/// Argmin state carried by L-BFGS (no inverse Hessian).
type LbfgsState = IterState<Theta, Grad, (), (), (), f64>;

/// Argmin state carried by BFGS (dense inverse Hessian).
type BfgsState = IterState<Theta, Grad, (), InvHessian, (), f64>;

/// Run an L-BFGS solver on `problem` starting at `theta0`.
///
/// # Errors
/// - Propagates Argmin runtime errors (line-search failures, cost errors
///   raised by the model) as `OptError`.
/// - Propagates validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, LbfgsState> + Send + 'static,
{
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }
    if let Some(timeout) = opts.timeout {
        optimizer = optimizer.timeout(timeout);
    }
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let result = optimizer.run()?.state().clone();
    outcome_from_state(result)
}

/// Run a full-memory BFGS solver on `problem` starting at `theta0`.
///
/// The inverse-Hessian approximation is seeded with `I / max(1, ‖∇c(θ₀)‖)`,
/// so the first trial step has at most unit length whatever the scale of the
/// cost.
///
/// # Errors
/// Same as [`run_lbfgs`].
pub fn run_bfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, BfgsState> + Send + 'static,
{
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let init_inv_hessian = initial_inv_hessian(&theta0, &problem)?;
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0).inv_hessian(init_inv_hessian));
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }
    if let Some(timeout) = opts.timeout {
        optimizer = optimizer.timeout(timeout);
    }
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let result = optimizer.run()?.state().clone();
    outcome_from_state(result)
}

// ---- Helper Methods ----

/// Convert a finished Argmin state into an [`OptimOutcome`], flipping the
/// best cost back into a log-likelihood.
fn outcome_from_state<H>(mut state: IterState<Theta, Grad, (), H, (), f64>) -> OptResult<OptimOutcome>
where
    IterState<Theta, Grad, (), H, (), f64>: State<Param = Theta, Float = f64>,
{
    let iterations = state.get_iter();
    let function_counts = state.get_func_counts().clone();
    let termination = state.get_termination_status().clone();
    let grad = state.take_gradient();
    OptimOutcome::new(
        state.take_best_param(),
        -state.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

/// Identity scaled down by the initial gradient norm (never scaled up).
fn initial_inv_hessian<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<InvHessian>
where
    F: LogLikelihood,
{
    let g0n = problem.gradient(theta0)?.l2_norm();
    Ok(InvHessian::eye(theta0.len()) / g0n.max(1.0))
}

fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    match problem.gradient(theta0) {
        Ok(g0) => log::debug!("init: ell(theta0) = {ll0:.6}, ||grad|| = {:.6}", g0.l2_norm()),
        Err(err) => {
            log::debug!("init: ell(theta0) = {ll0:.6}, gradient unavailable: {err}")
        }
    }
    Ok(())
}

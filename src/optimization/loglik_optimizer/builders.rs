//! loglik_optimizer::builders — quasi-Newton solver construction helpers.
//!
//! Purpose
//! -------
//! Hide Argmin's generic wiring behind small builders that return a BFGS or
//! L-BFGS solver with the requested line search and the tolerances from
//! [`MLEOptions`] already applied.
//!
//! Key behaviors
//! -------------
//! - `build_bfgs_*` construct full-memory BFGS solvers.
//! - `build_lbfgs_*` construct L-BFGS solvers with history `opts.lbfgs_mem`
//!   (falling back to [`DEFAULT_LBFGS_MEM`]).
//! - [`configure_bfgs`] / [`configure_lbfgs`] apply `tol_grad` / `tol_cost`
//!   when present and leave Argmin's defaults otherwise.
//!
//! Conventions
//! -----------
//! - Builders never set `theta0`, the initial inverse Hessian, `max_iters`
//!   or the timeout; those are runtime concerns handled in [`super::run`].
//! - Argmin configuration errors surface as [`OptError`](crate::optimization::errors::OptError)
//!   through `From<argmin::core::Error>`.
//!
//! Testing notes
//! -------------
//! - Unit tests check every builder accepts valid options, with and without
//!   tolerances. Full solves are exercised by the runner and GLM tests.
use argmin::solver::quasinewton::{BFGS, LBFGS};

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            BfgsHagerZhang, BfgsMoreThuente, Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS,
            LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
        },
    },
};

/// Build BFGS with the Hager–Zhang line search.
///
/// # Errors
/// Returns an `OptError` if Argmin rejects a configured tolerance.
pub fn build_bfgs_hager_zhang(opts: &MLEOptions) -> OptResult<BfgsHagerZhang> {
    let bfgs = BfgsHagerZhang::new(HagerZhangLS::new());
    configure_bfgs(bfgs, opts)
}

/// Build BFGS with the More–Thuente line search.
///
/// # Errors
/// Returns an `OptError` if Argmin rejects a configured tolerance.
pub fn build_bfgs_more_thuente(opts: &MLEOptions) -> OptResult<BfgsMoreThuente> {
    let bfgs = BfgsMoreThuente::new(MoreThuenteLS::new());
    configure_bfgs(bfgs, opts)
}

/// Build L-BFGS with the Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` as the history size, or [`DEFAULT_LBFGS_MEM`].
///
/// # Errors
/// Returns an `OptError` if Argmin rejects a configured tolerance.
pub fn build_lbfgs_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Build L-BFGS with the More–Thuente line search.
///
/// Uses `opts.lbfgs_mem` as the history size, or [`DEFAULT_LBFGS_MEM`].
///
/// # Errors
/// Returns an `OptError` if Argmin rejects a configured tolerance.
pub fn build_lbfgs_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional gradient / cost tolerances to a BFGS solver.
///
/// A `None` tolerance leaves Argmin's default in place.
pub fn configure_bfgs<L>(mut solver: BFGS<L, Cost>, opts: &MLEOptions) -> OptResult<BFGS<L, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Apply optional gradient / cost tolerances to an L-BFGS solver.
///
/// A `None` tolerance leaves Argmin's default in place.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{
        LineSearcher, MLEOptions, QuasiNewton, Tolerances,
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of all four solver/line-search combinations.
    // - Tolerance wiring with present and absent tolerances.
    //
    // They intentionally DO NOT cover:
    // - Executor behavior (see `run` and the GLM integration tests).
    // -------------------------------------------------------------------------

    fn opts(method: QuasiNewton, ls: LineSearcher, mem: Option<usize>) -> MLEOptions {
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-10), Some(50)).expect("Tolerances should be valid");
        MLEOptions::new(tols, method, ls, mem, None, false).expect("MLEOptions should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Every BFGS builder accepts valid tolerances.
    //
    // Given
    // -----
    // - Options with finite positive tolerances for both line searches.
    //
    // Expect
    // ------
    // - Both builders return `Ok(_)`.
    fn bfgs_builders_accept_valid_options() {
        assert!(build_bfgs_more_thuente(&opts(QuasiNewton::Bfgs, LineSearcher::MoreThuente, None))
            .is_ok());
        assert!(build_bfgs_hager_zhang(&opts(QuasiNewton::Bfgs, LineSearcher::HagerZhang, None))
            .is_ok());
    }

    #[test]
    // Purpose
    // -------
    // L-BFGS builders accept default and explicit history sizes.
    //
    // Given
    // -----
    // - `lbfgs_mem = None` and `lbfgs_mem = Some(11)`.
    //
    // Expect
    // ------
    // - Both builders return `Ok(_)` in both cases.
    fn lbfgs_builders_accept_default_and_explicit_memory() {
        for mem in [None, Some(11)] {
            assert!(build_lbfgs_hager_zhang(&opts(
                QuasiNewton::Lbfgs,
                LineSearcher::HagerZhang,
                mem
            ))
            .is_ok());
            assert!(build_lbfgs_more_thuente(&opts(
                QuasiNewton::Lbfgs,
                LineSearcher::MoreThuente,
                mem
            ))
            .is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // Absent tolerances leave the solvers constructible on Argmin defaults.
    //
    // Given
    // -----
    // - `Tolerances { tol_grad: None, tol_cost: None, max_iter: Some(10) }`.
    //
    // Expect
    // ------
    // - `configure_bfgs` and `configure_lbfgs` both return `Ok(_)`.
    fn configure_helpers_respect_absent_tolerances() {
        let tols = Tolerances::new(None, None, Some(10)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, QuasiNewton::Bfgs, LineSearcher::MoreThuente, None, None, false)
            .expect("MLEOptions should be valid");

        assert!(configure_bfgs(BFGS::new(MoreThuenteLS::new()), &opts).is_ok());
        assert!(configure_lbfgs(LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM), &opts).is_ok());
    }
}

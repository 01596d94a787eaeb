//! Newton-Raphson with a Brent safety net.

use log::warn;

use crate::error::{MathError, MathResult};
use crate::solvers::{brent, SolverConfig, SolverResult};

/// Slopes smaller than this in magnitude end the Newton phase.
const MIN_SLOPE: f64 = 1e-15;

/// Consecutive residual increases tolerated before Newton is abandoned.
const MAX_DIVERGENT_STEPS: u32 = 3;

/// Newton iterations allowed before handing over to Brent.
const NEWTON_BUDGET: u32 = 20;

/// Newton-Raphson that falls back to Brent on `bounds`.
///
/// Newton runs first with a short iteration budget. It is abandoned, and
/// Brent's method is run on `bounds` instead, when:
///
/// 1. an iterate leaves `bounds` or becomes non-finite
/// 2. the slope vanishes
/// 3. the residual grows on several consecutive steps
/// 4. the budget runs out
///
/// # Example
///
/// ```rust
/// use redform_math::solvers::{newton_with_fallback, SolverConfig};
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let df = |x: f64| 3.0 * x * x - 1.0;
///
/// let result = newton_with_fallback(f, df, 1.5, (1.0, 2.0), &SolverConfig::default()).unwrap();
/// assert!(f(result.root).abs() < 1e-10);
/// ```
pub fn newton_with_fallback<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let (lo, hi) = if bounds.0 <= bounds.1 {
        bounds
    } else {
        (bounds.1, bounds.0)
    };
    let start = initial_guess.clamp(lo, hi);

    match bounded_newton(&f, &df, start, (lo, hi), config) {
        Ok(result) => Ok(result),
        Err(reason) => {
            warn!("Newton abandoned ({reason}); falling back to Brent on [{lo}, {hi}]");
            let mut result = brent(&f, lo, hi, config)?;
            result.iterations += NEWTON_BUDGET.min(config.max_iterations);
            Ok(result)
        }
    }
}

fn bounded_newton<F, DF>(
    f: &F,
    df: &DF,
    start: f64,
    (lo, hi): (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let budget = config.max_iterations.min(NEWTON_BUDGET);
    let mut x = start;
    let mut prev_residual = f64::INFINITY;
    let mut divergent = 0;

    for iteration in 0..budget {
        let fx = f(x);
        let residual = fx.abs();
        if !fx.is_finite() {
            return Err(MathError::invalid_input("non-finite objective"));
        }
        if residual < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if residual > prev_residual {
            divergent += 1;
            if divergent >= MAX_DIVERGENT_STEPS {
                return Err(MathError::invalid_input("Newton diverging"));
            }
        } else {
            divergent = 0;
        }
        prev_residual = residual;

        let slope = df(x);
        if slope.abs() < MIN_SLOPE || !slope.is_finite() {
            return Err(MathError::DivisionByZero { value: slope });
        }

        let step = fx / slope;
        x -= step;
        if !x.is_finite() || x < lo || x > hi {
            return Err(MathError::invalid_input("Newton left the bracket"));
        }

        if step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(budget, f(x).abs()))
}

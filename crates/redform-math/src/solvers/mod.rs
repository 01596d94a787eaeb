//! Root-finding algorithms.
//!
//! - [`brent`]: bracketing method mixing bisection, secant and inverse
//!   quadratic interpolation; always converges on a valid bracket
//! - [`newton_with_fallback`]: Newton first, Brent on the supplied bracket
//!   if Newton stalls, diverges or leaves the finite range
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Superlinear | Guaranteed | Bracket |
//! | Newton + fallback | Quadratic | Guaranteed | Slope and bracket |
//!
//! # Example: implied spread over a flat curve
//!
//! ```rust
//! use redform_math::solvers::{brent, SolverConfig};
//!
//! let price = |s: f64| (1..=5).map(|t| 5.0 * (-(0.03 + s) * t as f64).exp()).sum::<f64>()
//!     + 100.0 * (-(0.03 + s) * 5.0).exp();
//! let result = brent(|s| price(s) - 97.0, -0.05, 0.10, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.0);
//! ```

mod brent;
mod hybrid;

pub use brent::brent;
pub use hybrid::newton_with_fallback;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the residual and on the step.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Outcome of a successful root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Function value at the root.
    pub residual: f64,
}

//! Configuration structures.

use redform_math::differentiation::{scaled_step, DifferencingScheme};
use redform_math::solvers::SolverConfig;
use serde::{Deserialize, Serialize};

use super::error::{require_positive, ConfigResult, Validate, ValidationError};

// =============================================================================
// SENSITIVITY CONFIGURATION
// =============================================================================

/// Finite-difference step policy for price sensitivities.
///
/// The default step for an input with current value `x` is
///
/// ```text
/// h = max(relative_step * |x|, step_floor)
/// ```
///
/// so it scales with the input and stays usable when the input is at or
/// near zero. `scheme` is the preferred stencil; a one-sided stencil is
/// substituted when the preferred one would leave the input's domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityConfig {
    /// Step as a fraction of the input's magnitude.
    #[serde(default = "default_relative_step")]
    pub relative_step: f64,

    /// Smallest step ever used.
    #[serde(default = "default_step_floor")]
    pub step_floor: f64,

    /// One basis point, the bump for CR01/IR01 and their gammas.
    #[serde(default = "default_basis_point")]
    pub basis_point: f64,

    /// Preferred stencil.
    #[serde(default = "default_scheme")]
    pub scheme: DifferencingScheme,
}

fn default_relative_step() -> f64 {
    1e-4
}

fn default_step_floor() -> f64 {
    1e-6
}

fn default_basis_point() -> f64 {
    1e-4
}

fn default_scheme() -> DifferencingScheme {
    DifferencingScheme::Central
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            relative_step: default_relative_step(),
            step_floor: default_step_floor(),
            basis_point: default_basis_point(),
            scheme: default_scheme(),
        }
    }
}

impl SensitivityConfig {
    /// Parses a (possibly partial) JSON document and validates it.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Default step for an input currently at `value`.
    #[must_use]
    pub fn step_for(&self, value: f64) -> f64 {
        scaled_step(value, self.relative_step, self.step_floor)
    }

    /// Sets the relative step.
    pub fn with_relative_step(mut self, relative_step: f64) -> Self {
        self.relative_step = relative_step;
        self
    }

    /// Sets the step floor.
    pub fn with_step_floor(mut self, step_floor: f64) -> Self {
        self.step_floor = step_floor;
        self
    }

    /// Sets the basis-point bump.
    pub fn with_basis_point(mut self, basis_point: f64) -> Self {
        self.basis_point = basis_point;
        self
    }

    /// Sets the preferred stencil.
    pub fn with_scheme(mut self, scheme: DifferencingScheme) -> Self {
        self.scheme = scheme;
        self
    }
}

impl Validate for SensitivityConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require_positive(&mut errors, "relative_step", self.relative_step);
        require_positive(&mut errors, "step_floor", self.step_floor);
        require_positive(&mut errors, "basis_point", self.basis_point);
        errors
    }
}

// =============================================================================
// SOLVER CONFIGURATION
// =============================================================================

/// Settings for the implied-spread solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Absolute price tolerance.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Maximum iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Lowest spread searched.
    #[serde(default = "default_spread_floor")]
    pub spread_floor: f64,

    /// Highest spread searched (10.0 = 100,000 bp).
    #[serde(default = "default_spread_cap")]
    pub spread_cap: f64,
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    100
}

fn default_spread_floor() -> f64 {
    1e-10
}

fn default_spread_cap() -> f64 {
    10.0
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            spread_floor: default_spread_floor(),
            spread_cap: default_spread_cap(),
        }
    }
}

impl SolverSettings {
    /// Parses a (possibly partial) JSON document and validates it.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate_or_error()?;
        Ok(settings)
    }

    /// Sets the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the searched spread range.
    pub fn with_spread_bounds(mut self, floor: f64, cap: f64) -> Self {
        self.spread_floor = floor;
        self.spread_cap = cap;
        self
    }

    /// The tolerance and iteration budget as a solver configuration.
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require_positive(&mut errors, "tolerance", self.tolerance);
        require_positive(&mut errors, "spread_floor", self.spread_floor);
        require_positive(&mut errors, "spread_cap", self.spread_cap);

        if self.max_iterations == 0 {
            errors.push(ValidationError::new("max_iterations", "must be at least 1"));
        }
        if self.spread_cap <= self.spread_floor {
            errors.push(ValidationError::new(
                "spread_cap",
                "must be greater than spread_floor",
            ));
        }
        errors
    }
}

// =============================================================================
// BATCH CONFIGURATION
// =============================================================================

/// Controls parallel evaluation of batched pricing and sensitivities.
///
/// Parallelism also requires the `parallel` feature of `redform-analytics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Enable parallel processing.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Minimum item count before work is spread across threads.
    /// Below this, sequential is faster due to thread overhead.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl AnalyticsConfig {
    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if `count` items should be processed in parallel.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        self.parallel && count >= self.parallel_threshold
    }
}

//! Finite-difference differentiation of scalar functions.
//!
//! Bump-and-reprice in its most general form: the function under study is
//! any `FnMut(f64) -> Result<f64, E>`, so a pricer that validates its inputs
//! can be differentiated directly and its first error is returned unchanged.
//! Each evaluation is an independent call; nothing is cached between them.
//!
//! Truncation error is `O(h^2)` for the central stencil and `O(h)` for the
//! one-sided ones. One-sided stencils exist for points sitting on the edge
//! of a parameter's domain, where `x - h` or `x + h` cannot be evaluated.

use serde::{Deserialize, Serialize};

use crate::error::MathError;

/// Finite-difference stencil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferencingScheme {
    /// `(f(x + h) - f(x)) / h`.
    Forward,
    /// `(f(x) - f(x - h)) / h`.
    Backward,
    /// `(f(x + h) - f(x - h)) / 2h`.
    Central,
}

impl DifferencingScheme {
    /// Points (as multiples of `h`) at which a first-derivative stencil
    /// evaluates the function.
    #[must_use]
    pub fn offsets(self) -> (f64, f64) {
        match self {
            Self::Forward => (0.0, 1.0),
            Self::Backward => (-1.0, 0.0),
            Self::Central => (-1.0, 1.0),
        }
    }
}

impl std::fmt::Display for DifferencingScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Central => "central",
        };
        write!(f, "{name}")
    }
}

/// Step proportional to `|x|`, never smaller than `floor`.
///
/// `h = max(relative * |x|, floor)`
#[must_use]
pub fn scaled_step(x: f64, relative: f64, floor: f64) -> f64 {
    (relative.abs() * x.abs()).max(floor.abs())
}

fn check_step(h: f64) -> Result<(), MathError> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(MathError::invalid_input(format!(
            "finite-difference step must be positive and finite, got {h}"
        )))
    }
}

/// First derivative of `f` at `x`.
///
/// # Example
///
/// ```rust
/// use redform_math::differentiation::{derivative, DifferencingScheme};
/// use redform_math::MathError;
///
/// let d = derivative(|x| Ok::<_, MathError>(x.exp()), 0.0, 1e-5, DifferencingScheme::Central)
///     .unwrap();
/// assert!((d - 1.0).abs() < 1e-9);
/// ```
pub fn derivative<F, E>(mut f: F, x: f64, h: f64, scheme: DifferencingScheme) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    check_step(h)?;

    let (lo, hi) = scheme.offsets();
    let f_hi = f(x + hi * h)?;
    let f_lo = f(x + lo * h)?;

    Ok((f_hi - f_lo) / ((hi - lo) * h))
}

/// Second derivative of `f` at `x`.
///
/// Central: `(f(x+h) - 2f(x) + f(x-h)) / h^2`. The one-sided forms shift
/// the same three-point stencil entirely to one side of `x`.
pub fn second_derivative<F, E>(
    mut f: F,
    x: f64,
    h: f64,
    scheme: DifferencingScheme,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<MathError>,
{
    check_step(h)?;

    let centre = match scheme {
        DifferencingScheme::Central => x,
        DifferencingScheme::Forward => x + h,
        DifferencingScheme::Backward => x - h,
    };
    let f_up = f(centre + h)?;
    let f_mid = f(centre)?;
    let f_down = f(centre - h)?;

    Ok((f_up - 2.0 * f_mid + f_down) / (h * h))
}

//! # Redform Math
//!
//! Numerical utilities for the Redform credit pricing library.
//!
//! This crate provides:
//!
//! - **Solvers**: Brent's method, and a Newton iteration that falls back
//!   to Brent inside a bracket
//! - **Differentiation**: Bump-and-reprice finite differences over any
//!   fallible scalar function, with forward, backward and central stencils
//!
//! Everything works on `f64`. Functions are pure; nothing here allocates
//! beyond the caller's closures.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod differentiation;
pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::differentiation::{derivative, second_derivative, DifferencingScheme};
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{brent, newton_with_fallback, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};

//! Finite-difference price sensitivities.
//!
//! Each requested input is bumped independently and the bond repriced; the
//! derivative is a difference quotient of those prices. The step for an
//! input at `x` defaults to `max(1e-4 |x|, 1e-6)` and can be overridden per
//! input. Near a domain edge (zero spread, recovery close to 1, maturity
//! close to the previous payment) the stencil switches to the side that
//! stays valid, and the result records which stencil was used.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use redform_core::{
    AnalyticsConfig, BondSpec, CreditError, CreditMarketParams, CreditResult, MarketParameter,
    SensitivityConfig,
};
use redform_math::differentiation::{derivative, DifferencingScheme};

use super::bump::{base_value, reprice, select_scheme, validate_step};
use crate::parallel::maybe_parallel_try_map;
use crate::pricing::price;

/// Where a finite-difference step came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepSource {
    /// Derived from the configured step policy.
    Default,
    /// Supplied by the caller.
    User,
}

/// Derivative of price with respect to one input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    /// Input differentiated.
    pub parameter: MarketParameter,
    /// Value of the input at which the derivative was taken.
    pub base_value: f64,
    /// `dPrice / dInput`.
    pub derivative: f64,
    /// Step used.
    pub step: f64,
    /// Stencil used.
    pub scheme: DifferencingScheme,
    /// Whether the step was the caller's or the default policy's.
    pub step_source: StepSource,
}

/// Sensitivities of one bond's price, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    /// Price at the unshocked inputs.
    pub base_price: f64,
    entries: Vec<SensitivityEntry>,
}

impl SensitivityResult {
    /// Entry for `parameter`, if it was requested.
    pub fn get(&self, parameter: MarketParameter) -> Option<&SensitivityEntry> {
        self.entries.iter().find(|e| e.parameter == parameter)
    }

    /// Derivative with respect to `parameter`, if it was requested.
    pub fn derivative(&self, parameter: MarketParameter) -> Option<f64> {
        self.get(parameter).map(|e| e.derivative)
    }

    /// All entries, in request order.
    pub fn entries(&self) -> &[SensitivityEntry] {
        &self.entries
    }

    /// Iterates over entries in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, SensitivityEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no input was requested.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SensitivityResult {
    type Item = &'a SensitivityEntry;
    type IntoIter = std::slice::Iter<'a, SensitivityEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sensitivities of `bond`'s price to each of `parameters`, using the
/// default step policy.
///
/// `step_sizes`, when given, must hold one positive step per parameter.
/// Parameters must not repeat. The first failure aborts the computation.
///
/// # Example
///
/// ```rust
/// use redform_analytics::prelude::*;
///
/// let bond = BondSpec::annual(100.0, 0.05, 3).unwrap();
/// let market = CreditMarketParams::new(0.02, 0.01, 0.4).unwrap();
///
/// let result = sensitivities(
///     &bond,
///     &market,
///     &[MarketParameter::CreditSpread, MarketParameter::RecoveryRate],
///     Some(&[1e-5, 1e-4]),
/// )
/// .unwrap();
///
/// let spread = result.get(MarketParameter::CreditSpread).unwrap();
/// assert_eq!(spread.step, 1e-5);
/// assert_eq!(spread.step_source, StepSource::User);
/// assert!(spread.derivative < 0.0);
/// ```
pub fn sensitivities(
    bond: &BondSpec,
    market: &CreditMarketParams,
    parameters: &[MarketParameter],
    step_sizes: Option<&[f64]>,
) -> CreditResult<SensitivityResult> {
    SensitivityCalculator::default().compute(bond, market, parameters, step_sizes)
}

/// Sensitivity calculator with a configurable step policy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensitivityCalculator {
    config: SensitivityConfig,
    batch: AnalyticsConfig,
}

impl SensitivityCalculator {
    /// Creates a calculator with the given step policy.
    ///
    /// An invalid policy surfaces as an `InvalidParameter` error on the
    /// first computation that uses it.
    #[must_use]
    pub fn new(config: SensitivityConfig) -> Self {
        Self {
            config,
            batch: AnalyticsConfig::default(),
        }
    }

    /// Sets the parallelism settings for evaluating several inputs.
    #[must_use]
    pub fn with_batch_config(mut self, batch: AnalyticsConfig) -> Self {
        self.batch = batch;
        self
    }

    /// The step policy.
    pub fn config(&self) -> &SensitivityConfig {
        &self.config
    }

    /// See [`sensitivities`].
    pub fn compute(
        &self,
        bond: &BondSpec,
        market: &CreditMarketParams,
        parameters: &[MarketParameter],
        step_sizes: Option<&[f64]>,
    ) -> CreditResult<SensitivityResult> {
        if let Some(steps) = step_sizes {
            if steps.len() != parameters.len() {
                return Err(CreditError::invalid_parameter(
                    "step_sizes",
                    steps.len() as f64,
                    format!("expected {} steps, one per parameter", parameters.len()),
                ));
            }
        }

        let mut seen = HashSet::with_capacity(parameters.len());
        for &parameter in parameters {
            if !seen.insert(parameter) {
                return Err(CreditError::invalid_parameter(
                    parameter.as_str(),
                    base_value(bond, market, parameter),
                    "requested more than once",
                ));
            }
        }

        let base_price = price(bond, market)?;

        let requests: Vec<(MarketParameter, Option<f64>)> = parameters
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, step_sizes.map(|steps| steps[i])))
            .collect();

        let entries = maybe_parallel_try_map(&requests, &self.batch, |&(parameter, step)| {
            self.entry(bond, market, parameter, step)
        })?;

        Ok(SensitivityResult {
            base_price,
            entries,
        })
    }

    fn entry(
        &self,
        bond: &BondSpec,
        market: &CreditMarketParams,
        parameter: MarketParameter,
        user_step: Option<f64>,
    ) -> CreditResult<SensitivityEntry> {
        let x = base_value(bond, market, parameter);
        let (step, step_source) = match user_step {
            Some(step) => (validate_step(parameter, step)?, StepSource::User),
            None => (
                validate_step(parameter, self.config.step_for(x))?,
                StepSource::Default,
            ),
        };

        let scheme = select_scheme(bond, market, parameter, x, step, 1.0, self.config.scheme)?;
        let value = derivative(|v| reprice(bond, market, parameter, v), x, step, scheme)?;

        debug!("d(price)/d({parameter}) at {x} = {value} (step {step}, {scheme})");

        Ok(SensitivityEntry {
            parameter,
            base_value: x,
            derivative: value,
            step,
            scheme,
            step_source,
        })
    }
}

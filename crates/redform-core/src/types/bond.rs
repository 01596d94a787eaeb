//! Fixed-coupon bond terms on a continuous time axis.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CreditError, CreditResult};

/// Terms of a fixed-coupon bullet bond.
///
/// Times are year fractions from the valuation date. The coupon paid at
/// `t_i` accrues over `(t_{i-1}, t_i]` with `t_0 = 0`:
///
/// ```text
/// CF_i = notional * coupon_rate * (t_i - t_{i-1})      (i < n)
/// CF_n = notional * coupon_rate * (t_n - t_{n-1}) + notional
/// ```
///
/// Invariants, enforced by every constructor:
/// - `notional > 0`, `coupon_rate >= 0`, `maturity > 0`, all finite
/// - `payment_times` non-empty, positive, strictly increasing
/// - the last payment time equals `maturity` exactly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BondSpecFields")]
pub struct BondSpec {
    notional: f64,
    coupon_rate: f64,
    maturity: f64,
    payment_times: Vec<f64>,
}

#[derive(Deserialize)]
struct BondSpecFields {
    notional: f64,
    coupon_rate: f64,
    maturity: f64,
    payment_times: Vec<f64>,
}

impl TryFrom<BondSpecFields> for BondSpec {
    type Error = CreditError;

    fn try_from(fields: BondSpecFields) -> CreditResult<Self> {
        Self::new(
            fields.notional,
            fields.coupon_rate,
            fields.maturity,
            fields.payment_times,
        )
    }
}

impl BondSpec {
    /// Creates a bond from explicit terms.
    pub fn new(
        notional: f64,
        coupon_rate: f64,
        maturity: f64,
        payment_times: Vec<f64>,
    ) -> CreditResult<Self> {
        ensure_finite("notional", notional)?;
        if notional <= 0.0 {
            return Err(CreditError::invalid_parameter(
                "notional",
                notional,
                "must be positive",
            ));
        }

        ensure_finite("coupon_rate", coupon_rate)?;
        if coupon_rate < 0.0 {
            return Err(CreditError::invalid_parameter(
                "coupon_rate",
                coupon_rate,
                "must not be negative",
            ));
        }

        ensure_finite("maturity", maturity)?;
        if maturity <= 0.0 {
            return Err(CreditError::invalid_parameter(
                "maturity",
                maturity,
                "must be positive",
            ));
        }

        validate_schedule(&payment_times, maturity)?;

        Ok(Self {
            notional,
            coupon_rate,
            maturity,
            payment_times,
        })
    }

    /// Bond paying an annual coupon at `1, 2, ..., years`.
    pub fn annual(notional: f64, coupon_rate: f64, years: u32) -> CreditResult<Self> {
        if years == 0 {
            return Err(CreditError::invalid_parameter(
                "maturity",
                0.0,
                "must be positive",
            ));
        }
        let times = (1..=years).map(f64::from).collect();
        Self::new(notional, coupon_rate, f64::from(years), times)
    }

    /// Bond paying `per_year` coupons a year, rolled back from `maturity`.
    ///
    /// Payment times are `maturity - k / per_year` for `k = 0, 1, ...` while
    /// positive, so any stub period falls at the front of the schedule.
    pub fn with_frequency(
        notional: f64,
        coupon_rate: f64,
        maturity: f64,
        per_year: u32,
    ) -> CreditResult<Self> {
        if per_year == 0 {
            return Err(CreditError::invalid_parameter(
                "frequency",
                0.0,
                "at least one payment per year is required",
            ));
        }
        ensure_finite("maturity", maturity)?;
        if maturity <= 0.0 {
            return Err(CreditError::invalid_parameter(
                "maturity",
                maturity,
                "must be positive",
            ));
        }

        let period = 1.0 / f64::from(per_year);
        let mut times: Vec<f64> = (0u32..)
            .map(|k| maturity - f64::from(k) * period)
            .take_while(|&t| t > MIN_STUB)
            .collect();
        times.reverse();

        Self::new(notional, coupon_rate, maturity, times)
    }

    /// Zero-coupon bond repaying `notional` at `maturity`.
    pub fn zero_coupon(notional: f64, maturity: f64) -> CreditResult<Self> {
        Self::new(notional, 0.0, maturity, vec![maturity])
    }

    /// Face value.
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Annualized coupon rate.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Maturity in years.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Payment times in years, strictly increasing, ending at maturity.
    pub fn payment_times(&self) -> &[f64] {
        &self.payment_times
    }

    /// Scheduled `(time, amount)` pairs, principal included in the last.
    pub fn cash_flows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let last = self.payment_times.len() - 1;
        self.payment_times
            .iter()
            .enumerate()
            .map(move |(i, &t)| {
                let start = if i == 0 { 0.0 } else { self.payment_times[i - 1] };
                let coupon = self.notional * self.coupon_rate * (t - start);
                let amount = if i == last {
                    coupon + self.notional
                } else {
                    coupon
                };
                (t, amount)
            })
    }

    /// Copy of this bond with maturity and final payment moved to `maturity`.
    ///
    /// Fails when `maturity` does not fall strictly after the previous
    /// payment time.
    pub fn with_maturity(&self, maturity: f64) -> CreditResult<Self> {
        let mut times = self.payment_times.clone();
        if let Some(last) = times.last_mut() {
            *last = maturity;
        }
        Self::new(self.notional, self.coupon_rate, maturity, times)
    }
}

/// Payment times closer to zero than this are dropped from rolled schedules.
const MIN_STUB: f64 = 1e-9;

fn validate_schedule(times: &[f64], maturity: f64) -> CreditResult<()> {
    let Some(&last) = times.last() else {
        return Err(CreditError::invalid_parameter(
            "payment_times",
            f64::NAN,
            "schedule must contain at least one payment",
        ));
    };

    let mut previous = 0.0;
    for &t in times {
        ensure_finite("payment_times", t)?;
        if t <= previous {
            let reason = if t <= 0.0 {
                "payment times must be positive"
            } else {
                "payment times must be strictly increasing"
            };
            return Err(CreditError::invalid_parameter("payment_times", t, reason));
        }
        previous = t;
    }

    if last != maturity {
        return Err(CreditError::invalid_parameter(
            "payment_times",
            last,
            format!("last payment must fall on maturity {maturity}"),
        ));
    }

    Ok(())
}

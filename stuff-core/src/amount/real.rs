//! Real-valued stuff.
//!
//! Amounts are non-negative finite `f64`s. A remainder that is only floating-point noise
//! relative to the amount drawn from is snapped to zero by taking the whole amount, so
//! `taken + remainder == held` holds exactly and emptied quantities really are empty.

use crate::error::{Result, StuffError};
use crate::measure::{Measure, Portion};
use crate::policy::MinimumRule;
use approx::abs_diff_eq;

/// Relative tolerance below which a residue counts as zero.
pub(crate) const RESIDUE: f64 = 4.0 * f64::EPSILON;

/// Converts a request into a real amount.
///
/// Returns `None` for item selections, which the caller reports as a domain mismatch.
pub(crate) fn requested(portion: &Portion) -> Option<Result<f64>> {
    match portion {
        Portion::Count(n) if *n < 0 => Some(Err(StuffError::InvalidAmount(format!(
            "amount must be non-negative, got {n}"
        )))),
        Portion::Count(n) => Some(Ok(*n as f64)),
        Portion::Real(x) if !x.is_finite() || *x < 0.0 => Some(Err(StuffError::InvalidAmount(
            format!("amount must be finite and non-negative, got {x}"),
        ))),
        Portion::Real(x) => Some(Ok(*x)),
        Portion::Items(_) => None,
    }
}

fn check_minimum(x: f64, min_amount: f64) -> Result<()> {
    if x != 0.0 && x < min_amount {
        return Err(StuffError::below_minimum(
            Measure::Real(x),
            Measure::Real(min_amount),
        ));
    }
    Ok(())
}

/// Validates the initial amount handed to a kind's constructor.
pub(crate) fn validate_initial(x: f64, min_amount: f64) -> Result<()> {
    check_minimum(x, min_amount)
}

/// Returns `true` if `difference` is noise relative to `scale`.
pub(crate) fn is_residue(difference: f64, scale: f64) -> bool {
    abs_diff_eq!(difference, 0.0, epsilon = RESIDUE * scale)
}

/// Plans taking `x` out of `held` and returns `(taken, remainder)`.
///
/// The taken part is derived back from the rounded remainder, which makes
/// `taken + remainder == held` exact. It can differ from `x` by an ulp.
pub(crate) fn plan_take(
    held: f64,
    x: f64,
    min_amount: f64,
    rule: MinimumRule,
) -> Result<(f64, f64)> {
    let (taken, remainder) = if is_residue(held - x, held) {
        (held, 0.0)
    } else if x > held {
        return Err(StuffError::insufficient(Measure::Real(x), Measure::Real(held)));
    } else {
        let remainder = held - x;
        (held - remainder, remainder)
    };
    check_minimum(remainder, min_amount)?;
    if rule == MinimumRule::Strict {
        check_minimum(taken, min_amount)?;
    }
    Ok((taken, remainder))
}

pub(crate) fn checked_sum(a: f64, b: f64) -> Result<f64> {
    let sum = a + b;
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(StuffError::InvalidAmount(format!("{a} + {b} overflows")))
    }
}

/// Plans dividing `held` into `pieces` equal parts.
///
/// Only the first `pieces - 1` parts are returned; the last part is whatever remains, so
/// rounding never loses or creates amount.
pub(crate) fn plan_divide(held: f64, min_amount: f64, pieces: usize) -> Result<Vec<f64>> {
    let part = held / pieces as f64;
    if part == 0.0 || part < min_amount {
        return Err(StuffError::below_minimum(
            Measure::Real(part),
            Measure::Real(min_amount),
        ));
    }
    Ok(vec![part; pieces - 1])
}

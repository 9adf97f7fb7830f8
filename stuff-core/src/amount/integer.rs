//! Integer-counted stuff.
//!
//! Amounts are whole numbers and every amount that moves is a multiple of the kind's unit
//! size. Arithmetic is exact.

use crate::error::{Result, StuffError};
use crate::measure::{Measure, Portion};
use crate::policy::MinimumRule;

/// Converts a request into a whole-number amount.
///
/// Returns `None` for item selections, which the caller reports as a domain mismatch.
pub(crate) fn requested(portion: &Portion, unit_size: u64) -> Option<Result<u64>> {
    match portion {
        Portion::Count(n) if *n < 0 => Some(Err(StuffError::InvalidAmount(format!(
            "amount must be non-negative, got {n}"
        )))),
        Portion::Count(n) => Some(u64::try_from(*n).map_err(|_| {
            StuffError::InvalidAmount(format!("amount {n} exceeds the largest count {}", u64::MAX))
        })),
        Portion::Real(x) => Some(from_real(*x, unit_size)),
        Portion::Items(_) => None,
    }
}

fn from_real(x: f64, unit_size: u64) -> Result<u64> {
    if !x.is_finite() || x < 0.0 {
        return Err(StuffError::InvalidAmount(format!(
            "amount must be finite and non-negative, got {x}"
        )));
    }
    if x >= u64::MAX as f64 {
        return Err(StuffError::InvalidAmount(format!(
            "amount {x} exceeds the largest count {}",
            u64::MAX
        )));
    }
    if x.fract() != 0.0 {
        return Err(StuffError::GranularityViolation {
            requested: Measure::Real(x),
            unit_size,
        });
    }
    Ok(x as u64)
}

pub(crate) fn check_granularity(n: u64, unit_size: u64) -> Result<()> {
    if n % unit_size != 0 {
        return Err(StuffError::GranularityViolation {
            requested: Measure::Count(n),
            unit_size,
        });
    }
    Ok(())
}

fn check_minimum(n: u64, min_amount: u64) -> Result<()> {
    if n != 0 && n < min_amount {
        return Err(StuffError::below_minimum(
            Measure::Count(n),
            Measure::Count(min_amount),
        ));
    }
    Ok(())
}

/// Validates the initial amount handed to a kind's constructor.
pub(crate) fn validate_initial(n: u64, min_amount: u64, unit_size: u64) -> Result<()> {
    check_granularity(n, unit_size)?;
    check_minimum(n, min_amount)
}

/// Plans taking `n` out of `held` and returns the remainder.
pub(crate) fn plan_take(
    held: u64,
    n: u64,
    min_amount: u64,
    unit_size: u64,
    rule: MinimumRule,
) -> Result<u64> {
    check_granularity(n, unit_size)?;
    let remainder = held
        .checked_sub(n)
        .ok_or_else(|| StuffError::insufficient(Measure::Count(n), Measure::Count(held)))?;
    check_minimum(remainder, min_amount)?;
    if rule == MinimumRule::Strict {
        check_minimum(n, min_amount)?;
    }
    Ok(remainder)
}

pub(crate) fn checked_sum(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b)
        .ok_or_else(|| StuffError::InvalidAmount(format!("{a} + {b} overflows")))
}

/// Plans dividing `held` into `pieces` near-equal parts.
///
/// Whole units are spread as evenly as possible; the first `units % pieces` parts get one
/// extra unit. Every part must reach the kind's smallest allowed amount.
pub(crate) fn plan_divide(
    held: u64,
    min_amount: u64,
    unit_size: u64,
    pieces: usize,
) -> Result<Vec<u64>> {
    let pieces_u64 = pieces as u64;
    let units = held / unit_size;
    let base = units / pieces_u64;
    let extra = units % pieces_u64;
    let smallest = base * unit_size;
    if smallest == 0 || smallest < min_amount {
        return Err(StuffError::below_minimum(
            Measure::Count(smallest),
            Measure::Count(min_amount),
        ));
    }
    Ok((0..pieces_u64)
        .map(|i| (base + u64::from(i < extra)) * unit_size)
        .collect())
}

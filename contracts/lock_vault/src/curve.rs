//! Piecewise-linear multiplier curve.
//!
//! Control points sit at equal steps of `max_lock_duration / (len - 1)`
//! seconds. Point 0 is the multiplier for a zero-length lock and the last
//! point applies to every duration at or beyond the last step.

use soroban_sdk::Vec;

use crate::errors::ContractError;

/// Fixed-point unit: `SCALE` represents a 1.0× multiplier.
pub const SCALE: i128 = 1_000_000_000;

/// Minimum control points a curve must carry.
pub const MIN_CURVE_POINTS: u32 = 2;

/// Evaluate the curve at `duration` seconds.
///
/// Interpolation truncates toward zero, so rounding never inflates shares.
pub fn multiplier(
    points: &Vec<i128>,
    max_lock_duration: u64,
    duration: u64,
) -> Result<i128, ContractError> {
    let len = points.len();
    if len < MIN_CURVE_POINTS {
        return Err(ContractError::InvalidCurve);
    }
    let last_index = len - 1;
    let last = points.get(last_index).ok_or(ContractError::InvalidCurve)?;

    let step = max_lock_duration / u64::from(last_index);
    if step == 0 {
        return Ok(last);
    }

    let lower_index = duration / step;
    if lower_index >= u64::from(last_index) {
        return Ok(last);
    }
    // lower_index < last_index <= u32::MAX
    let lower_index = lower_index as u32;
    let lower = points.get(lower_index).ok_or(ContractError::InvalidCurve)?;
    let upper = points
        .get(lower_index + 1)
        .ok_or(ContractError::InvalidCurve)?;

    let offset = i128::from(duration - u64::from(lower_index) * step);
    let delta = upper
        .checked_sub(lower)
        .and_then(|d| d.checked_mul(offset))
        .ok_or(ContractError::MathOverflow)?;

    lower
        .checked_add(delta / i128::from(step))
        .ok_or(ContractError::MathOverflow)
}

/// Shares minted for `amount` at `multiplier`: `amount × multiplier / SCALE`.
pub fn share_amount(amount: i128, multiplier: i128) -> Result<i128, ContractError> {
    amount
        .checked_mul(multiplier)
        .map(|v| v / SCALE)
        .ok_or(ContractError::MathOverflow)
}

/// Reject curves that are too short or carry a point outside `[0, max_bonus]`.
pub fn validate(points: &Vec<i128>, max_bonus: i128) -> Result<(), ContractError> {
    if points.len() < MIN_CURVE_POINTS {
        return Err(ContractError::InvalidCurve);
    }
    for point in points.iter() {
        validate_point(point, max_bonus)?;
    }
    Ok(())
}

pub fn validate_point(point: i128, max_bonus: i128) -> Result<(), ContractError> {
    if point < 0 || point > max_bonus {
        return Err(ContractError::MultiplierTooHigh);
    }
    Ok(())
}

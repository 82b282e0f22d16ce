// crates/late-economics/src/math.rs
//
// Fixed-point helpers shared by every reward computation.
//
// Rates and accumulators are u128 values scaled by SCALE (10^18). Token
// amounts are u64. With a u64 budget, total_reward * SCALE stays below
// 1.9e37, which bounds every intermediate product in the engine. Every operation is checked; overflow surfaces as
// StakingError::ArithmeticOverflow and aborts the calling operation. Every
// division truncates toward zero, so rounding always favours the pool.

use late_core::StakingError;

/// Fixed-point scaling factor for reward rates and the accumulator.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// `a * b / denominator`, truncating. Zero denominators are reported as
/// overflow of the named quantity.
pub fn mul_div(a: u128, b: u128, denominator: u128, what: &'static str) -> Result<u128, StakingError> {
    if denominator == 0 {
        return Err(StakingError::ArithmeticOverflow(what));
    }
    a.checked_mul(b)
        .map(|product| product / denominator)
        .ok_or(StakingError::ArithmeticOverflow(what))
}

/// Narrow a fixed-point result back to a token amount.
pub fn to_amount(value: u128, what: &'static str) -> Result<u64, StakingError> {
    u64::try_from(value).map_err(|_| StakingError::ArithmeticOverflow(what))
}

pub fn add_amount(a: u64, b: u64, what: &'static str) -> Result<u64, StakingError> {
    a.checked_add(b).ok_or(StakingError::ArithmeticOverflow(what))
}

pub fn sub_amount(a: u64, b: u64, what: &'static str) -> Result<u64, StakingError> {
    a.checked_sub(b).ok_or(StakingError::ArithmeticOverflow(what))
}

use anchor_lang::prelude::*;
use primitive_types::U256;

use crate::{
    error::RewardSplitterError,
    state::{RewardSplit, Target, PERCENT_SCALE, TARGET_COUNT},
};

/// Mathematical utilities with overflow protection
pub struct MathUtil;

impl MathUtil {
    /// Safe addition with overflow check
    pub fn safe_add(a: u64, b: u64) -> Result<u64> {
        a.checked_add(b).ok_or(error!(RewardSplitterError::ArithmeticOverflow))
    }

    /// Safe subtraction with underflow check
    pub fn safe_sub(a: u64, b: u64) -> Result<u64> {
        a.checked_sub(b).ok_or(error!(RewardSplitterError::ArithmeticOverflow))
    }

    /// floor(amount * share / PERCENT_SCALE) with a 256-bit intermediate.
    ///
    /// `amount` is at most `u64::MAX` and `share` is a fixed-point
    /// percentage, so the product can exceed `u128` for large balances.
    pub fn percent_of(amount: u64, share: u128) -> Result<u64> {
        let product = U256::from(amount)
            .checked_mul(U256::from(share))
            .ok_or(error!(RewardSplitterError::ArithmeticOverflow))?;
        let result = product / U256::from(PERCENT_SCALE);

        if result > U256::from(u64::MAX) {
            return Err(error!(RewardSplitterError::ArithmeticOverflow));
        }
        Ok(result.low_u64())
    }

    /// Per-target amounts for `balance`, in `Target` order.
    /// Truncation leaves at most `TARGET_COUNT - 1` units unallocated.
    pub fn allocate(balance: u64, split: &RewardSplit) -> Result<[u64; TARGET_COUNT]> {
        let mut amounts = [0u64; TARGET_COUNT];
        let mut allocated = 0u64;

        for target in Target::ALL {
            let amount = Self::percent_of(balance, split.share(target))?;
            allocated = Self::safe_add(allocated, amount)?;
            amounts[target.index()] = amount;
        }

        // Never hand out more than was there
        Self::safe_sub(balance, allocated)?;

        Ok(amounts)
    }
}

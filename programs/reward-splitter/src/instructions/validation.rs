use anchor_lang::prelude::*;

use crate::error::RewardSplitterError;

/// Swap request validation, run before any token or router interaction
pub struct PathValidator;

impl PathValidator {
    /// Validate a swap path and its minimum output floor
    pub fn validate_swap_request(
        path: &[Pubkey],
        min_amount_out: u64,
        reward_mint: &Pubkey,
    ) -> Result<()> {
        require!(path.len() >= 2, RewardSplitterError::InvalidPath);
        require!(min_amount_out > 0, RewardSplitterError::InvalidMinAmount);

        Self::validate_path_ends(path, reward_mint)
    }

    fn validate_path_ends(path: &[Pubkey], reward_mint: &Pubkey) -> Result<()> {
        let last = path.last().ok_or(error!(RewardSplitterError::InvalidPath))?;
        require_keys_eq!(*last, *reward_mint, RewardSplitterError::PathMustEndInRewardAsset);
        Ok(())
    }
}

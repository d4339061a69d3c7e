use anchor_lang::prelude::*;

use crate::state::{RewardSplit, RouterIdentity, Target};

/// Event emitted when a splitter is created for a reward mint
#[event]
pub struct SplitterInitialized {
    pub config: Pubkey,
    pub authority: Pubkey,
    pub reward_mint: Pubkey,
    pub split: RewardSplit,
    pub router: RouterIdentity,
    pub timestamp: i64,
}

/// Event emitted when the split is replaced
#[event]
pub struct SplitUpdated {
    pub config: Pubkey,
    pub split: RewardSplit,
    pub timestamp: i64,
}

/// Event emitted when a target handle changes
#[event]
pub struct TargetChanged {
    pub config: Pubkey,
    pub target: Target,
    pub from: Pubkey,
    pub to: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AuthorityTransferred {
    pub config: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct RouterChanged {
    pub config: Pubkey,
    pub from: RouterIdentity,
    pub to: RouterIdentity,
    pub timestamp: i64,
}

/// Event emitted after a source balance is swapped into the reward mint
#[event]
pub struct SwapExecuted {
    pub config: Pubkey,
    pub source_mint: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub timestamp: i64,
}

/// Event emitted for each non-zero payout
#[event]
pub struct RewardDeposited {
    pub config: Pubkey,
    pub target: Target,
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted once per distribution, carrying the balance that was split
#[event]
pub struct RewardsDistributed {
    pub config: Pubkey,
    pub claimed: u64,
    pub distributed: u64,
    pub timestamp: i64,
}

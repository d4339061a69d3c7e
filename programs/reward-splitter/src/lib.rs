use anchor_lang::prelude::*;

mod state;
mod error;
mod events;
mod utils;
pub mod engine;
pub mod instructions;

pub use state::*;
pub use error::*;
pub use events::*;
pub use utils::*;
pub use engine::{ConfigStore, DistributionOutcome, RewardLedger, SwapOutcome, SwapRouter};
pub use instructions::*;

declare_id!("438mKr6ZghMeWdEpNtm84SGigWqhg3E3rpiVTPqNqQJi");

#[program]
pub mod reward_splitter {
    use super::*;

    /// Create the splitter for a reward mint with the default split
    pub fn initialize(
        ctx: Context<InitializeSplitter>,
        staking: Pubkey,
        treasury: Pubkey,
        vaults: Pubkey,
        router: RouterIdentity,
    ) -> Result<()> {
        instructions::initialize_splitter::handler(ctx, staking, treasury, vaults, router)
    }

    /// Replace the three-way split (authority only)
    pub fn set_split(ctx: Context<UpdateConfig>, split: RewardSplit) -> Result<()> {
        instructions::update_config::set_split_handler(ctx, split)
    }

    pub fn set_staking_target(ctx: Context<UpdateConfig>, new_target: Pubkey) -> Result<()> {
        instructions::update_config::set_target_handler(ctx, Target::Staking, new_target)
    }

    pub fn set_treasury_target(ctx: Context<UpdateConfig>, new_target: Pubkey) -> Result<()> {
        instructions::update_config::set_target_handler(ctx, Target::Treasury, new_target)
    }

    pub fn set_vaults_target(ctx: Context<UpdateConfig>, new_target: Pubkey) -> Result<()> {
        instructions::update_config::set_target_handler(ctx, Target::BeneficiaryVaults, new_target)
    }

    /// Hand the authority over to another key
    pub fn transfer_authority(ctx: Context<UpdateConfig>, new_authority: Pubkey) -> Result<()> {
        instructions::update_config::transfer_authority_handler(ctx, new_authority)
    }

    /// Point swaps at another router program and delegate
    pub fn set_router(ctx: Context<UpdateConfig>, router: RouterIdentity) -> Result<()> {
        instructions::update_config::set_router_handler(ctx, router)
    }

    /// Current split, returned through return data
    pub fn get_split(ctx: Context<ReadConfig>) -> Result<RewardSplit> {
        instructions::update_config::get_split_handler(ctx)
    }

    pub fn get_bounds(ctx: Context<ReadConfig>) -> Result<[AllocationBound; TARGET_COUNT]> {
        instructions::update_config::get_bounds_handler(ctx)
    }

    pub fn get_targets(ctx: Context<ReadConfig>) -> Result<[Pubkey; TARGET_COUNT]> {
        instructions::update_config::get_targets_handler(ctx)
    }

    /// Permissionless: swap the whole balance of `path[0]` into the reward mint
    pub fn swap_for_reward<'info>(
        ctx: Context<'_, '_, 'info, 'info, SwapForReward<'info>>,
        path: Vec<Pubkey>,
        min_amount_out: u64,
    ) -> Result<SwapOutcome> {
        instructions::swap_for_reward::handler(ctx, path, min_amount_out)
    }

    /// Permissionless: split the reward balance between the three targets
    pub fn distribute(ctx: Context<DistributeRewards>) -> Result<u64> {
        instructions::distribute_rewards::handler(ctx)
    }
}

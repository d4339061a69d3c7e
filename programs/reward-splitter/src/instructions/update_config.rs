use anchor_lang::prelude::*;
use crate::{
    state::*,
    events::{AuthorityTransferred, RouterChanged, SplitUpdated, TargetChanged},
};

/// Accounts shared by every authority-gated setter
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [SPLITTER_SEED, config.reward_mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, SplitterConfig>,
}

/// Read-only access to the configuration
#[derive(Accounts)]
pub struct ReadConfig<'info> {
    #[account(
        seeds = [SPLITTER_SEED, config.reward_mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, SplitterConfig>,
}

pub fn set_split_handler(ctx: Context<UpdateConfig>, split: RewardSplit) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;

    config.set_split(&caller, split)?;

    emit!(SplitUpdated {
        config: config.key(),
        split,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Split updated to {:?}", split.shares);

    Ok(())
}

pub fn set_target_handler(
    ctx: Context<UpdateConfig>,
    target: Target,
    new_handle: Pubkey,
) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;

    let previous = config.replace_target(&caller, target, new_handle)?;

    emit!(TargetChanged {
        config: config.key(),
        target,
        from: previous,
        to: new_handle,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("{:?} target changed from {} to {}", target, previous, new_handle);

    Ok(())
}

pub fn transfer_authority_handler(
    ctx: Context<UpdateConfig>,
    new_authority: Pubkey,
) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;

    let previous = config.replace_authority(&caller, new_authority)?;

    emit!(AuthorityTransferred {
        config: config.key(),
        from: previous,
        to: new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Authority transferred from {} to {}", previous, new_authority);

    Ok(())
}

pub fn set_router_handler(ctx: Context<UpdateConfig>, router: RouterIdentity) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    let config = &mut ctx.accounts.config;

    let previous = config.replace_router(&caller, router)?;

    emit!(RouterChanged {
        config: config.key(),
        from: previous,
        to: router,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Router changed from {} to {}", previous.program, router.program);

    Ok(())
}

pub fn get_split_handler(ctx: Context<ReadConfig>) -> Result<RewardSplit> {
    Ok(ctx.accounts.config.split)
}

pub fn get_bounds_handler(ctx: Context<ReadConfig>) -> Result<[AllocationBound; TARGET_COUNT]> {
    Ok(ctx.accounts.config.bounds)
}

pub fn get_targets_handler(ctx: Context<ReadConfig>) -> Result<[Pubkey; TARGET_COUNT]> {
    Ok(ctx.accounts.config.targets)
}

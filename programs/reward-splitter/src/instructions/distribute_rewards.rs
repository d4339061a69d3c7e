use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::{
    engine,
    error::RewardSplitterError,
    events::{RewardDeposited, RewardsDistributed},
    instructions::ledger::CpiLedger,
    state::*,
};

#[derive(Accounts)]
pub struct DistributeRewards<'info> {
    /// Anyone may crank a distribution
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [SPLITTER_SEED, config.reward_mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, SplitterConfig>,

    /// Reward vault owned by the config PDA
    #[account(
        mut,
        associated_token::mint = config.reward_mint,
        associated_token::authority = config,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = config.target(Target::Staking) @ RewardSplitterError::InvalidTokenAccount,
        constraint = staking_target.mint == config.reward_mint @ RewardSplitterError::InvalidTokenAccount
    )]
    pub staking_target: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = config.target(Target::Treasury) @ RewardSplitterError::InvalidTokenAccount,
        constraint = treasury_target.mint == config.reward_mint @ RewardSplitterError::InvalidTokenAccount
    )]
    pub treasury_target: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = config.target(Target::BeneficiaryVaults) @ RewardSplitterError::InvalidTokenAccount,
        constraint = vaults_target.mint == config.reward_mint @ RewardSplitterError::InvalidTokenAccount
    )]
    pub vaults_target: Account<'info, TokenAccount>,

    /// Token program
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<DistributeRewards>) -> Result<u64> {
    let timestamp = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let config_key = accounts.config.key();

    let mut ledger = CpiLedger::new(
        accounts.config.to_account_info(),
        accounts.config.reward_mint,
        accounts.config.bump,
        accounts.token_program.to_account_info(),
    )
    .with_vault(&accounts.reward_vault)
    .with_recipient(accounts.staking_target.to_account_info())
    .with_recipient(accounts.treasury_target.to_account_info())
    .with_recipient(accounts.vaults_target.to_account_info());

    let outcome = engine::distribute(&mut accounts.config, &mut ledger)?;

    // Events only once every transfer has gone through
    for (target, recipient, amount) in outcome.deposits() {
        emit!(RewardDeposited {
            config: config_key,
            target,
            recipient,
            amount,
            timestamp,
        });
    }

    let distributed = outcome.total_distributed();

    emit!(RewardsDistributed {
        config: config_key,
        claimed: outcome.claimed,
        distributed,
        timestamp,
    });

    msg!(
        "Distributed {} of {} reward tokens, {} retained",
        distributed,
        outcome.claimed,
        outcome.retained()
    );

    Ok(distributed)
}

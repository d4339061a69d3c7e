use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::{
    engine::{self, SwapOutcome},
    events::SwapExecuted,
    error::RewardSplitterError,
    instructions::{ledger::CpiLedger, router::CpiRouter},
    state::*,
};

#[derive(Accounts)]
pub struct SwapForReward<'info> {
    /// Anyone may trigger a swap; the minimum output bounds slippage
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [SPLITTER_SEED, config.reward_mint.as_ref()],
        bump = config.bump
    )]
    pub config: Account<'info, SplitterConfig>,

    /// Mint being sold, `path[0]`
    pub source_mint: Account<'info, Mint>,

    /// Source vault owned by the config PDA; a vault for any mint other than
    /// `path[0]` fails the balance lookup with `InvalidTokenAccount`
    #[account(
        mut,
        associated_token::mint = source_mint,
        associated_token::authority = config,
    )]
    pub source_vault: Account<'info, TokenAccount>,

    /// Reward vault owned by the config PDA, receives the swap output
    #[account(
        mut,
        associated_token::mint = config.reward_mint,
        associated_token::authority = config,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// External AMM router program
    /// CHECK: Pinned to the configured router and invoked by CPI
    #[account(
        executable,
        address = config.router.program @ RewardSplitterError::UnknownRouter
    )]
    pub router_program: UncheckedAccount<'info>,

    /// Router authority approved as delegate over the source vault
    /// CHECK: Pinned to the configured router authority
    #[account(address = config.router.authority @ RewardSplitterError::UnknownRouter)]
    pub router_authority: UncheckedAccount<'info>,

    /// Token program
    pub token_program: Program<'info, Token>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, SwapForReward<'info>>,
    path: Vec<Pubkey>,
    min_amount_out: u64,
) -> Result<SwapOutcome> {
    let now = Clock::get()?.unix_timestamp;
    let pools = ctx.remaining_accounts;
    let accounts = &mut *ctx.accounts;

    let config_info = accounts.config.to_account_info();
    let config_key = config_info.key();
    let reward_mint = accounts.config.reward_mint;
    let bump = accounts.config.bump;

    let mut ledger = CpiLedger::new(
        config_info.clone(),
        reward_mint,
        bump,
        accounts.token_program.to_account_info(),
    )
    .with_vault(&accounts.source_vault)
    .with_spender(accounts.router_authority.to_account_info());

    let mut router = CpiRouter {
        program: accounts.router_program.to_account_info(),
        authority: accounts.router_authority.to_account_info(),
        config: config_info,
        reward_mint,
        bump,
        source_vault: accounts.source_vault.to_account_info(),
        reward_vault: &mut accounts.reward_vault,
        token_program: accounts.token_program.to_account_info(),
        pools,
    };

    let outcome = engine::swap_for_reward(
        &mut accounts.config,
        &mut ledger,
        &mut router,
        &path,
        min_amount_out,
        now,
    )?;

    emit!(SwapExecuted {
        config: config_key,
        source_mint: outcome.source_mint,
        amount_in: outcome.amount_in,
        amount_out: outcome.amount_out,
        timestamp: now,
    });

    msg!(
        "Swapped {} of {} into {} reward tokens",
        outcome.amount_in,
        outcome.source_mint,
        outcome.amount_out
    );

    Ok(outcome)
}

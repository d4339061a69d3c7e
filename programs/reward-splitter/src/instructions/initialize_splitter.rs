use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};
use crate::{
    state::*,
    events::SplitterInitialized,
};

#[derive(Accounts)]
pub struct InitializeSplitter<'info> {
    /// Pays for the accounts and becomes the authority
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The mint being distributed
    pub reward_mint: Account<'info, Mint>,

    /// Splitter configuration
    #[account(
        init,
        payer = authority,
        space = SplitterConfig::LEN,
        seeds = [SPLITTER_SEED, reward_mint.key().as_ref()],
        bump
    )]
    pub config: Account<'info, SplitterConfig>,

    /// Reward vault owned by the config PDA
    #[account(
        init,
        payer = authority,
        associated_token::mint = reward_mint,
        associated_token::authority = config,
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    /// System program
    pub system_program: Program<'info, System>,

    /// Token program
    pub token_program: Program<'info, Token>,

    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(
    ctx: Context<InitializeSplitter>,
    staking: Pubkey,
    treasury: Pubkey,
    vaults: Pubkey,
    router: RouterIdentity,
) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let reward_mint = ctx.accounts.reward_mint.key();

    let config = &mut ctx.accounts.config;
    config.set_inner(SplitterConfig::new(
        authority,
        reward_mint,
        [staking, treasury, vaults],
        router,
        ctx.bumps.config,
    ));

    emit!(SplitterInitialized {
        config: config.key(),
        authority,
        reward_mint,
        split: config.split,
        router,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Initialized splitter {} for reward mint {} routing through {}",
        config.key(),
        reward_mint,
        router.program
    );

    Ok(())
}

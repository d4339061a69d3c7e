use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{self, Approve, TokenAccount, Transfer};
use crate::{
    engine::RewardLedger,
    error::RewardSplitterError,
    state::SPLITTER_SEED,
};

/// `RewardLedger` over the config PDA's token accounts, moving funds by SPL Token CPI
pub struct CpiLedger<'a, 'info> {
    config: AccountInfo<'info>,
    reward_mint: Pubkey,
    bump: u8,
    token_program: AccountInfo<'info>,
    vaults: Vec<&'a Account<'info, TokenAccount>>,
    recipients: Vec<AccountInfo<'info>>,
    spender: Option<AccountInfo<'info>>,
}

impl<'a, 'info> CpiLedger<'a, 'info> {
    pub fn new(
        config: AccountInfo<'info>,
        reward_mint: Pubkey,
        bump: u8,
        token_program: AccountInfo<'info>,
    ) -> Self {
        Self {
            config,
            reward_mint,
            bump,
            token_program,
            vaults: Vec::new(),
            recipients: Vec::new(),
            spender: None,
        }
    }

    pub fn with_vault(mut self, vault: &'a Account<'info, TokenAccount>) -> Self {
        self.vaults.push(vault);
        self
    }

    pub fn with_recipient(mut self, recipient: AccountInfo<'info>) -> Self {
        self.recipients.push(recipient);
        self
    }

    pub fn with_spender(mut self, spender: AccountInfo<'info>) -> Self {
        self.spender = Some(spender);
        self
    }

    fn vault(&self, mint: &Pubkey) -> Result<&'a Account<'info, TokenAccount>> {
        self.vaults
            .iter()
            .copied()
            .find(|vault| vault.mint == *mint)
            .ok_or(error!(RewardSplitterError::InvalidTokenAccount))
    }
}

impl<'a, 'info> RewardLedger for CpiLedger<'a, 'info> {
    fn holder(&self) -> Pubkey {
        self.config.key()
    }

    fn balance_of(&self, mint: &Pubkey) -> Result<u64> {
        Ok(self.vault(mint)?.amount)
    }

    fn allowance(&self, mint: &Pubkey, spender: &Pubkey) -> Result<u64> {
        let vault = self.vault(mint)?;
        match &vault.delegate {
            COption::Some(delegate) if delegate == spender => Ok(vault.delegated_amount),
            _ => Ok(0),
        }
    }

    fn increase_allowance(&mut self, mint: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        let vault = self.vault(mint)?;
        let delegate = self
            .spender
            .clone()
            .filter(|info| info.key == spender)
            .ok_or(error!(RewardSplitterError::InvalidTokenAccount))?;

        // SPL approve overwrites, so approve the existing allowance plus the increase
        let total = self
            .allowance(mint, spender)?
            .checked_add(amount)
            .ok_or(error!(RewardSplitterError::ArithmeticOverflow))?;

        let bump = [self.bump];
        let seeds: [&[u8]; 3] = [SPLITTER_SEED, self.reward_mint.as_ref(), &bump];
        let signer = &[&seeds[..]];

        let cpi_accounts = Approve {
            to: vault.to_account_info(),
            delegate,
            authority: self.config.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(self.token_program.clone(), cpi_accounts, signer);

        token::approve(cpi_ctx, total)?;

        msg!("Approved {} of mint {} for {}", total, mint, spender);

        Ok(())
    }

    fn transfer(&mut self, mint: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let vault = self.vault(mint)?;
        let recipient = self
            .recipients
            .iter()
            .find(|info| info.key == to)
            .cloned()
            .ok_or(error!(RewardSplitterError::InvalidTokenAccount))?;

        let bump = [self.bump];
        let seeds: [&[u8]; 3] = [SPLITTER_SEED, self.reward_mint.as_ref(), &bump];
        let signer = &[&seeds[..]];

        let cpi_accounts = Transfer {
            from: vault.to_account_info(),
            to: recipient,
            authority: self.config.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(self.token_program.clone(), cpi_accounts, signer);

        token::transfer(cpi_ctx, amount).map_err(|err| {
            msg!("Transfer of {} to {} failed: {}", amount, to, err);
            error!(RewardSplitterError::TransferFailed)
        })?;

        msg!("Transferred {} tokens to {}", amount, to);

        Ok(())
    }
}

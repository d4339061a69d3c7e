use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_spl::token::TokenAccount;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};
use crate::{
    engine::SwapRouter,
    error::RewardSplitterError,
    state::SPLITTER_SEED,
};

/// Instruction name of the router's exact-input swap
pub const ROUTER_SWAP_IX: &str = "swap_exact_input";

/// Arguments of the router's `swap_exact_input` instruction
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SwapExactInputArgs {
    pub amount_in: u64,
    pub min_amount_out: u64,
    pub path: Vec<Pubkey>,
    pub deadline: i64,
}

impl SwapExactInputArgs {
    /// Anchor-style 8 byte instruction discriminator
    pub fn discriminator() -> [u8; 8] {
        let preimage = format!("global:{}", ROUTER_SWAP_IX);
        let mut discriminator = [0u8; 8];
        discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
        discriminator
    }

    pub fn data(&self) -> Result<Vec<u8>> {
        let mut data = Self::discriminator().to_vec();
        let args = self
            .try_to_vec()
            .map_err(|_| error!(RewardSplitterError::SwapFailed))?;
        data.extend_from_slice(&args);
        Ok(data)
    }
}

/// `SwapRouter` that invokes an external constant-product router by CPI.
///
/// Account order handed to the router:
/// 0. `[signer]` config PDA (owner of both vaults)
/// 1. `[]` router authority (delegate over the source vault)
/// 2. `[writable]` source vault
/// 3. `[writable]` reward vault (swap output)
/// 4. `[]` SPL Token program
/// 5.. pool accounts for every hop, as passed in remaining accounts
pub struct CpiRouter<'a, 'info> {
    pub program: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    pub config: AccountInfo<'info>,
    pub reward_mint: Pubkey,
    pub bump: u8,
    pub source_vault: AccountInfo<'info>,
    pub reward_vault: &'a mut Account<'info, TokenAccount>,
    pub token_program: AccountInfo<'info>,
    pub pools: &'a [AccountInfo<'info>],
}

impl<'a, 'info> CpiRouter<'a, 'info> {
    fn instruction(&self, args: &SwapExactInputArgs) -> Result<Instruction> {
        let mut accounts = vec![
            AccountMeta::new_readonly(self.config.key(), true),
            AccountMeta::new_readonly(self.authority.key(), false),
            AccountMeta::new(self.source_vault.key(), false),
            AccountMeta::new(self.reward_vault.key(), false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ];
        accounts.extend(self.pools.iter().map(|pool| {
            if pool.is_writable {
                AccountMeta::new(pool.key(), false)
            } else {
                AccountMeta::new_readonly(pool.key(), false)
            }
        }));

        Ok(Instruction {
            program_id: self.program.key(),
            accounts,
            data: args.data()?,
        })
    }
}

impl<'a, 'info> SwapRouter for CpiRouter<'a, 'info> {
    fn program(&self) -> Pubkey {
        self.program.key()
    }

    fn spender(&self) -> Pubkey {
        self.authority.key()
    }

    fn swap_exact_input(
        &mut self,
        amount_in: u64,
        min_amount_out: u64,
        path: &[Pubkey],
        recipient: &Pubkey,
        deadline: i64,
    ) -> Result<Vec<u64>> {
        // Output always lands in the config's reward vault
        require_keys_eq!(*recipient, self.config.key(), RewardSplitterError::InvalidTokenAccount);

        let args = SwapExactInputArgs {
            amount_in,
            min_amount_out,
            path: path.to_vec(),
            deadline,
        };
        let ix = self.instruction(&args)?;

        let mut account_infos = vec![
            self.config.clone(),
            self.authority.clone(),
            self.source_vault.clone(),
            self.reward_vault.to_account_info(),
            self.token_program.clone(),
        ];
        account_infos.extend(self.pools.iter().cloned());
        account_infos.push(self.program.clone());

        let bump = [self.bump];
        let seeds: [&[u8]; 3] = [SPLITTER_SEED, self.reward_mint.as_ref(), &bump];
        let signer = &[&seeds[..]];

        // A path starting at the reward mint spends from the reward vault itself
        let reward_before = if self.source_vault.key() == self.reward_vault.key() {
            self.reward_vault
                .amount
                .checked_sub(amount_in)
                .ok_or(error!(RewardSplitterError::ArithmeticOverflow))?
        } else {
            self.reward_vault.amount
        };

        msg!(
            "Swapping {} via router {} over {} hops, min out {}",
            amount_in,
            self.program.key(),
            path.len() - 1,
            min_amount_out
        );

        invoke_signed(&ix, &account_infos, signer).map_err(|err| {
            msg!("Router swap failed: {}", err);
            error!(RewardSplitterError::SwapFailed)
        })?;

        // Realised output is whatever reached the reward vault
        self.reward_vault.reload()?;
        let amount_out = self
            .reward_vault
            .amount
            .checked_sub(reward_before)
            .ok_or(error!(RewardSplitterError::SwapFailed))?;

        Ok(vec![amount_in, amount_out])
    }
}

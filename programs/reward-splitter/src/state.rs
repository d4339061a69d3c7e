use anchor_lang::prelude::*;

use crate::error::RewardSplitterError;

/// 100% in 18-decimal fixed point
pub const PERCENT_SCALE: u128 = 100 * ONE_PERCENT;
pub const ONE_PERCENT: u128 = 1_000_000_000_000_000_000;

/// Number of beneficiary targets
pub const TARGET_COUNT: usize = 3;

/// Split written at initialization: 33% / 33% / 34%
pub const DEFAULT_SPLIT: [u128; TARGET_COUNT] = [33 * ONE_PERCENT, 33 * ONE_PERCENT, 34 * ONE_PERCENT];

/// Per-target bounds, in `Target` order
pub const SPLIT_BOUNDS: [AllocationBound; TARGET_COUNT] = [
    AllocationBound { min: 20 * ONE_PERCENT, max: 80 * ONE_PERCENT },
    AllocationBound { min: 10 * ONE_PERCENT, max: 80 * ONE_PERCENT },
    AllocationBound { min: 20 * ONE_PERCENT, max: 90 * ONE_PERCENT },
];

/// Seconds a router swap stays valid after submission
pub const SWAP_DEADLINE_SECS: i64 = 600;

/// Beneficiary targets, in distribution order
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Staking,
    Treasury,
    BeneficiaryVaults,
}

impl Target {
    pub const ALL: [Target; TARGET_COUNT] = [
        Target::Staking,
        Target::Treasury,
        Target::BeneficiaryVaults,
    ];

    pub fn index(self) -> usize {
        match self {
            Target::Staking => 0,
            Target::Treasury => 1,
            Target::BeneficiaryVaults => 2,
        }
    }
}

/// Inclusive (min, max) bound for one split entry
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocationBound {
    pub min: u128,
    pub max: u128,
}

impl AllocationBound {
    pub fn contains(&self, share: u128) -> bool {
        self.min <= share && share <= self.max
    }
}

/// Three-way split in 18-decimal fixed point, indexed by `Target`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardSplit {
    pub shares: [u128; TARGET_COUNT],
}

impl RewardSplit {
    pub fn new(staking: u128, treasury: u128, vaults: u128) -> Self {
        Self { shares: [staking, treasury, vaults] }
    }

    pub fn share(&self, target: Target) -> u128 {
        self.shares[target.index()]
    }

    /// Sum of all entries, `None` on overflow
    pub fn total(&self) -> Option<u128> {
        self.shares
            .iter()
            .try_fold(0u128, |acc, share| acc.checked_add(*share))
    }
}

impl Default for RewardSplit {
    fn default() -> Self {
        Self { shares: DEFAULT_SPLIT }
    }
}

/// Router program allowed to swap the splitter's holdings, and the delegate it spends through
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouterIdentity {
    pub program: Pubkey,
    pub authority: Pubkey,
}

/// Splitter configuration, one per reward mint
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct SplitterConfig {
    /// Principal allowed to change the split and the targets
    pub authority: Pubkey,

    /// The mint being distributed
    pub reward_mint: Pubkey,

    /// Current split
    pub split: RewardSplit,

    /// Bounds fixed at initialization
    pub bounds: [AllocationBound; TARGET_COUNT],

    /// Recipient token accounts, indexed by `Target`
    pub targets: [Pubkey; TARGET_COUNT],

    /// Router allowed to swap the splitter's holdings
    pub router: RouterIdentity,

    /// Set while distribute or swap_for_reward is executing
    pub locked: bool,

    /// Bump for PDA derivation
    pub bump: u8,
}

impl SplitterConfig {
    pub const LEN: usize = 8 + // discriminator
        32 +                        // authority
        32 +                        // reward_mint
        16 * TARGET_COUNT +         // split
        32 * TARGET_COUNT +         // bounds
        32 * TARGET_COUNT +         // targets
        32 + 32 +                   // router
        1 +                         // locked
        1;                          // bump

    pub fn new(
        authority: Pubkey,
        reward_mint: Pubkey,
        targets: [Pubkey; TARGET_COUNT],
        router: RouterIdentity,
        bump: u8,
    ) -> Self {
        Self {
            authority,
            reward_mint,
            split: RewardSplit::default(),
            bounds: SPLIT_BOUNDS,
            targets,
            router,
            locked: false,
            bump,
        }
    }

    pub fn authorize(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.authority, RewardSplitterError::Unauthorized);
        Ok(())
    }

    pub fn target(&self, target: Target) -> Pubkey {
        self.targets[target.index()]
    }

    pub fn bound(&self, target: Target) -> AllocationBound {
        self.bounds[target.index()]
    }

    /// Check every entry against its bound, then the total
    pub fn validate_split(&self, split: &RewardSplit) -> Result<()> {
        for target in Target::ALL {
            require!(
                self.bound(target).contains(split.share(target)),
                RewardSplitterError::InvalidSplitBounds
            );
        }

        require!(
            split.total() == Some(PERCENT_SCALE),
            RewardSplitterError::InvalidSplitTotal
        );

        Ok(())
    }

    /// Replace the whole split after validation
    pub fn set_split(&mut self, caller: &Pubkey, split: RewardSplit) -> Result<()> {
        self.authorize(caller)?;
        self.validate_split(&split)?;
        self.split = split;
        Ok(())
    }

    /// Swap one target handle, returning the previous one
    pub fn replace_target(
        &mut self,
        caller: &Pubkey,
        target: Target,
        new_handle: Pubkey,
    ) -> Result<Pubkey> {
        self.authorize(caller)?;

        let slot = &mut self.targets[target.index()];
        require_keys_neq!(*slot, new_handle, RewardSplitterError::NoOpChange);

        Ok(std::mem::replace(slot, new_handle))
    }

    pub fn replace_authority(&mut self, caller: &Pubkey, new_authority: Pubkey) -> Result<Pubkey> {
        self.authorize(caller)?;
        require_keys_neq!(self.authority, new_authority, RewardSplitterError::NoOpChange);

        Ok(std::mem::replace(&mut self.authority, new_authority))
    }

    pub fn replace_router(
        &mut self,
        caller: &Pubkey,
        router: RouterIdentity,
    ) -> Result<RouterIdentity> {
        self.authorize(caller)?;
        require!(self.router != router, RewardSplitterError::NoOpChange);

        Ok(std::mem::replace(&mut self.router, router))
    }

    /// The router handed to a swap must be the configured one
    pub fn check_router(&self, program: &Pubkey, spender: &Pubkey) -> Result<()> {
        require_keys_eq!(*program, self.router.program, RewardSplitterError::UnknownRouter);
        require_keys_eq!(*spender, self.router.authority, RewardSplitterError::UnknownRouter);
        Ok(())
    }

    pub fn enter(&mut self) -> Result<()> {
        require!(!self.locked, RewardSplitterError::Reentrancy);
        self.locked = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.locked = false;
    }
}

/// Seeds for PDA derivation
pub const SPLITTER_SEED: &[u8] = b"splitter";

pub fn get_config_pda(reward_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SPLITTER_SEED, reward_mint.as_ref()], program_id)
}

/// Token account the config PDA holds for `mint`
pub fn get_vault_address(config: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(config, mint)
}

use anchor_lang::prelude::*;

use crate::{
    error::RewardSplitterError,
    state::{SplitterConfig, Target, SWAP_DEADLINE_SECS, TARGET_COUNT},
    utils::MathUtil,
    instructions::validation::PathValidator,
};

/// Token balances and transfers as seen by the splitter
pub trait RewardLedger {
    /// Account that owns the splitter's holdings
    fn holder(&self) -> Pubkey;

    fn balance_of(&self, mint: &Pubkey) -> Result<u64>;

    fn allowance(&self, mint: &Pubkey, spender: &Pubkey) -> Result<u64>;

    fn increase_allowance(&mut self, mint: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()>;

    fn transfer(&mut self, mint: &Pubkey, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Exact-input multi-hop swap facility
pub trait SwapRouter {
    /// Program executing the swap
    fn program(&self) -> Pubkey;

    /// Account that pulls the input tokens
    fn spender(&self) -> Pubkey;

    /// Returns the amount at every hop; the last entry is the output
    fn swap_exact_input(
        &mut self,
        amount_in: u64,
        min_amount_out: u64,
        path: &[Pubkey],
        recipient: &Pubkey,
        deadline: i64,
    ) -> Result<Vec<u64>>;
}

/// Where the splitter configuration lives between calls
pub trait ConfigStore {
    fn config(&self) -> &SplitterConfig;

    fn config_mut(&mut self) -> &mut SplitterConfig;

    /// Write the in-memory configuration back so nested calls observe it
    fn persist(&mut self) -> Result<()>;
}

impl ConfigStore for SplitterConfig {
    fn config(&self) -> &SplitterConfig {
        self
    }

    fn config_mut(&mut self) -> &mut SplitterConfig {
        self
    }

    fn persist(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<'info> ConfigStore for Account<'info, SplitterConfig> {
    fn config(&self) -> &SplitterConfig {
        self
    }

    fn config_mut(&mut self) -> &mut SplitterConfig {
        self
    }

    fn persist(&mut self) -> Result<()> {
        self.exit(&crate::ID)
    }
}

/// Run `call` with the guard flag set and stored, releasing it on every path
fn guarded<S: ConfigStore, T>(
    store: &mut S,
    call: impl FnOnce(&SplitterConfig) -> Result<T>,
) -> Result<T> {
    store.config_mut().enter()?;
    let result = store.persist().and_then(|_| call(store.config()));

    store.config_mut().leave();
    let released = store.persist();

    let value = result?;
    released?;
    Ok(value)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistributionOutcome {
    /// Reward balance at the start of the call
    pub claimed: u64,
    pub amounts: [u64; TARGET_COUNT],
    pub recipients: [Pubkey; TARGET_COUNT],
}

impl DistributionOutcome {
    pub fn total_distributed(&self) -> u64 {
        self.amounts.iter().sum()
    }

    /// Rounding dust left in the vault for the next round
    pub fn retained(&self) -> u64 {
        self.claimed - self.total_distributed()
    }

    /// Non-zero payouts, in distribution order
    pub fn deposits(&self) -> impl Iterator<Item = (Target, Pubkey, u64)> + '_ {
        Target::ALL
            .into_iter()
            .map(|t| (t, self.recipients[t.index()], self.amounts[t.index()]))
            .filter(|(_, _, amount)| *amount > 0)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapOutcome {
    pub source_mint: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
}

/// Split the whole reward balance between the three targets
pub fn distribute<S: ConfigStore, L: RewardLedger>(
    store: &mut S,
    ledger: &mut L,
) -> Result<DistributionOutcome> {
    guarded(store, |config| distribute_inner(config, ledger))
}

fn distribute_inner<L: RewardLedger>(
    config: &SplitterConfig,
    ledger: &mut L,
) -> Result<DistributionOutcome> {
    let claimed = ledger.balance_of(&config.reward_mint)?;
    require!(claimed > 0, RewardSplitterError::NoBalance);

    // Snapshot once; nothing below re-reads the config
    let split = config.split;
    let recipients = config.targets;
    let amounts = MathUtil::allocate(claimed, &split)?;

    for target in Target::ALL {
        let amount = amounts[target.index()];
        if amount == 0 {
            continue;
        }
        ledger.transfer(&config.reward_mint, &recipients[target.index()], amount)?;
    }

    Ok(DistributionOutcome {
        claimed,
        amounts,
        recipients,
    })
}

/// Convert the full balance of `path[0]` into the reward mint
pub fn swap_for_reward<S: ConfigStore, L: RewardLedger, R: SwapRouter>(
    store: &mut S,
    ledger: &mut L,
    router: &mut R,
    path: &[Pubkey],
    min_amount_out: u64,
    now: i64,
) -> Result<SwapOutcome> {
    guarded(store, |config| {
        swap_inner(config, ledger, router, path, min_amount_out, now)
    })
}

fn swap_inner<L: RewardLedger, R: SwapRouter>(
    config: &SplitterConfig,
    ledger: &mut L,
    router: &mut R,
    path: &[Pubkey],
    min_amount_out: u64,
    now: i64,
) -> Result<SwapOutcome> {
    PathValidator::validate_swap_request(path, min_amount_out, &config.reward_mint)?;

    let spender = router.spender();
    config.check_router(&router.program(), &spender)?;

    let source_mint = path[0];
    let amount_in = ledger.balance_of(&source_mint)?;
    require!(amount_in > 0, RewardSplitterError::NoSwappableBalance);

    let allowance = ledger.allowance(&source_mint, &spender)?;
    if allowance < amount_in {
        ledger.increase_allowance(&source_mint, &spender, amount_in - allowance)?;
    }

    let deadline = now
        .checked_add(SWAP_DEADLINE_SECS)
        .ok_or(error!(RewardSplitterError::ArithmeticOverflow))?;
    let recipient = ledger.holder();

    let amounts = router.swap_exact_input(amount_in, min_amount_out, path, &recipient, deadline)?;
    let amount_out = *amounts
        .last()
        .ok_or(error!(RewardSplitterError::SwapFailed))?;
    require!(
        amount_out >= min_amount_out,
        RewardSplitterError::SlippageExceeded
    );

    Ok(SwapOutcome {
        source_mint,
        amount_in,
        amount_out,
    })
}

//! In-memory collaborators for driving the splitter engine off-chain.
//!
//! `MockLedger` and `MockRouter` share one `TokenState`, so a swap pulls from
//! and pays into the same balances the ledger reports. `Splitter::atomically`
//! restores every piece of state when a call fails, the way a rejected
//! transaction leaves nothing behind on-chain.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use reward_splitter::{
    engine, ConfigStore, DistributionOutcome, RewardLedger, RewardSplitterError, RouterIdentity,
    SplitterConfig, SwapOutcome, SwapRouter, Target,
};

/// 9-decimal token unit
pub const TOKEN: u64 = 1_000_000_000;

pub const NOW: i64 = 1_700_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRecord {
    pub mint: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenState {
    /// (mint, owner) -> amount
    pub balances: HashMap<(Pubkey, Pubkey), u64>,
    /// (mint, owner, spender) -> amount
    pub allowances: HashMap<(Pubkey, Pubkey, Pubkey), u64>,
    pub transfers: Vec<TransferRecord>,
    pub approvals: Vec<(Pubkey, Pubkey, u64)>,
    pub failing_recipients: HashSet<Pubkey>,
}

impl TokenState {
    pub fn balance(&self, mint: &Pubkey, owner: &Pubkey) -> u64 {
        self.balances.get(&(*mint, *owner)).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) {
        *self.balances.entry((*mint, *owner)).or_default() += amount;
    }

    pub fn debit(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.balances.entry((*mint, *owner)).or_default();
        *balance = balance
            .checked_sub(amount)
            .ok_or::<Error>(RewardSplitterError::TransferFailed.into())?;
        Ok(())
    }
}

pub type SharedTokens = Rc<RefCell<TokenState>>;

pub struct MockLedger {
    pub holder: Pubkey,
    pub tokens: SharedTokens,
}

impl RewardLedger for MockLedger {
    fn holder(&self) -> Pubkey {
        self.holder
    }

    fn balance_of(&self, mint: &Pubkey) -> Result<u64> {
        Ok(self.tokens.borrow().balance(mint, &self.holder))
    }

    fn allowance(&self, mint: &Pubkey, spender: &Pubkey) -> Result<u64> {
        let tokens = self.tokens.borrow();
        Ok(tokens
            .allowances
            .get(&(*mint, self.holder, *spender))
            .copied()
            .unwrap_or(0))
    }

    fn increase_allowance(&mut self, mint: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        let mut tokens = self.tokens.borrow_mut();
        *tokens
            .allowances
            .entry((*mint, self.holder, *spender))
            .or_default() += amount;
        tokens.approvals.push((*mint, *spender, amount));
        Ok(())
    }

    fn transfer(&mut self, mint: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let mut tokens = self.tokens.borrow_mut();
        if tokens.failing_recipients.contains(to) {
            return Err(RewardSplitterError::TransferFailed.into());
        }

        tokens.debit(mint, &self.holder, amount)?;
        tokens.credit(mint, to, amount);
        tokens.transfers.push(TransferRecord {
            mint: *mint,
            from: self.holder,
            to: *to,
            amount,
        });
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pool {
    pub reserve_in: u64,
    pub reserve_out: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapCall {
    pub amount_in: u64,
    pub min_amount_out: u64,
    pub path: Vec<Pubkey>,
    pub recipient: Pubkey,
    pub deadline: i64,
}

/// Configuration kept in a shared "account", written back on `persist`
/// the way an Anchor account is serialized on exit
pub struct PersistedConfig {
    pub live: SplitterConfig,
    pub stored: Rc<RefCell<SplitterConfig>>,
}

impl PersistedConfig {
    /// Deserialize a fresh copy, as a new instruction would
    pub fn load(stored: &Rc<RefCell<SplitterConfig>>) -> Self {
        Self {
            live: stored.borrow().clone(),
            stored: stored.clone(),
        }
    }
}

impl ConfigStore for PersistedConfig {
    fn config(&self) -> &SplitterConfig {
        &self.live
    }

    fn config_mut(&mut self) -> &mut SplitterConfig {
        &mut self.live
    }

    fn persist(&mut self) -> Result<()> {
        *self.stored.borrow_mut() = self.live.clone();
        Ok(())
    }
}

/// Constant-product router without fees
pub struct MockRouter {
    pub program: Pubkey,
    pub spender: Pubkey,
    pub tokens: SharedTokens,
    /// (mint in, mint out) -> reserves
    pub pools: HashMap<(Pubkey, Pubkey), Pool>,
    pub calls: Vec<SwapCall>,
}

impl MockRouter {
    pub fn quote(&self, amount_in: u64, path: &[Pubkey]) -> Result<Vec<u64>> {
        let mut amounts = vec![amount_in];
        for hop in path.windows(2) {
            let pool = self
                .pools
                .get(&(hop[0], hop[1]))
                .ok_or::<Error>(RewardSplitterError::SwapFailed.into())?;
            let current = *amounts.last().unwrap() as u128;
            let out = pool.reserve_out as u128 * current / (pool.reserve_in as u128 + current);
            amounts.push(out as u64);
        }
        Ok(amounts)
    }
}

impl SwapRouter for MockRouter {
    fn program(&self) -> Pubkey {
        self.program
    }

    fn spender(&self) -> Pubkey {
        self.spender
    }

    fn swap_exact_input(
        &mut self,
        amount_in: u64,
        min_amount_out: u64,
        path: &[Pubkey],
        recipient: &Pubkey,
        deadline: i64,
    ) -> Result<Vec<u64>> {
        self.calls.push(SwapCall {
            amount_in,
            min_amount_out,
            path: path.to_vec(),
            recipient: *recipient,
            deadline,
        });

        let amounts = self.quote(amount_in, path)?;
        let amount_out = *amounts.last().unwrap();
        if amount_out < min_amount_out {
            return Err(RewardSplitterError::SwapFailed.into());
        }

        let source = path[0];
        let output = path[path.len() - 1];
        let mut tokens = self.tokens.borrow_mut();

        // Pull the input through the allowance
        let allowance = tokens
            .allowances
            .entry((source, *recipient, self.spender))
            .or_default();
        *allowance = allowance
            .checked_sub(amount_in)
            .ok_or::<Error>(RewardSplitterError::SwapFailed.into())?;
        tokens.debit(&source, recipient, amount_in)?;
        tokens.credit(&output, recipient, amount_out);

        for (hop, window) in path.windows(2).enumerate() {
            let pool = self.pools.get_mut(&(window[0], window[1])).unwrap();
            pool.reserve_in += amounts[hop];
            pool.reserve_out -= amounts[hop + 1];
        }

        Ok(amounts)
    }
}

/// A splitter plus its collaborators
pub struct Splitter {
    pub config: SplitterConfig,
    pub authority: Pubkey,
    pub holder: Pubkey,
    pub reward_mint: Pubkey,
    pub tokens: SharedTokens,
    pub ledger: MockLedger,
    pub router: MockRouter,
}

impl Splitter {
    pub fn new() -> Self {
        let authority = Pubkey::new_unique();
        let holder = Pubkey::new_unique();
        let reward_mint = Pubkey::new_unique();
        let targets = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let tokens: SharedTokens = Rc::new(RefCell::new(TokenState::default()));
        let router = RouterIdentity {
            program: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
        };

        Self {
            config: SplitterConfig::new(authority, reward_mint, targets, router, 254),
            authority,
            holder,
            reward_mint,
            ledger: MockLedger {
                holder,
                tokens: tokens.clone(),
            },
            router: MockRouter {
                program: router.program,
                spender: router.authority,
                tokens: tokens.clone(),
                pools: HashMap::new(),
                calls: Vec::new(),
            },
            tokens,
        }
    }

    pub fn target(&self, target: Target) -> Pubkey {
        self.config.target(target)
    }

    pub fn fund(&self, mint: &Pubkey, amount: u64) {
        self.tokens.borrow_mut().credit(mint, &self.holder, amount);
    }

    pub fn fund_reward(&self, amount: u64) {
        self.fund(&self.reward_mint.clone(), amount);
    }

    pub fn held(&self, mint: &Pubkey) -> u64 {
        self.tokens.borrow().balance(mint, &self.holder)
    }

    pub fn reward_held(&self) -> u64 {
        self.held(&self.reward_mint)
    }

    pub fn received(&self, target: Target) -> u64 {
        self.tokens
            .borrow()
            .balance(&self.reward_mint, &self.target(target))
    }

    pub fn add_pool(&mut self, mint_in: Pubkey, mint_out: Pubkey, reserve_in: u64, reserve_out: u64) {
        self.router.pools.insert(
            (mint_in, mint_out),
            Pool {
                reserve_in,
                reserve_out,
            },
        );
    }

    /// Run `call`, rolling every piece of state back if it fails
    pub fn atomically<T>(
        &mut self,
        call: impl FnOnce(&mut SplitterConfig, &mut MockLedger, &mut MockRouter) -> Result<T>,
    ) -> Result<T> {
        let config = self.config.clone();
        let tokens = self.tokens.borrow().clone();
        let pools = self.router.pools.clone();

        let result = call(&mut self.config, &mut self.ledger, &mut self.router);

        if result.is_err() {
            self.config = config;
            *self.tokens.borrow_mut() = tokens;
            self.router.pools = pools;
        }
        result
    }

    pub fn distribute(&mut self) -> Result<DistributionOutcome> {
        self.atomically(|config, ledger, _| engine::distribute(config, ledger))
    }

    pub fn swap(&mut self, path: &[Pubkey], min_amount_out: u64) -> Result<SwapOutcome> {
        self.atomically(|config, ledger, router| {
            engine::swap_for_reward(config, ledger, router, path, min_amount_out, NOW)
        })
    }
}

pub fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: RewardSplitterError) {
    let err = result.expect_err("call should fail");
    assert_eq!(err, expected.into());
}

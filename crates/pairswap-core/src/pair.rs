// SPDX-License-Identifier: AGPL-3.0-only
//! # Constant-Product Pair
//!
//! The reserve state machine for one canonically ordered asset pair.
//!
//! ## Transitions
//!
//! | Transition | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `mint`     | Credit shares for tokens deposited since the last snapshot  |
//! | `burn`     | Redeem shares held by the pair itself for both tokens       |
//! | `swap`     | Send outputs, optionally call back, then check invariant    |
//! | `sync`     | Force reserves to match custodial balances                  |
//! | `skim`     | Send balances above reserves to a recipient                 |
//!
//! Depositors move tokens into the pair's custody with the token primitive
//! *before* calling `mint` or `swap`; the pair only ever pushes tokens out.
//!
//! ## Atomicity
//!
//! Every transition holds the pair's transition lock for its full duration
//! and runs inside a host checkpoint against a working copy of the pair
//! state. Queries from other threads read the last committed copy, which is
//! replaced only when a transition succeeds. On any error the checkpoint is
//! reverted (token movements and events disappear) and the working copy is
//! reset to the committed one.
//!
//! Other pairs a flash-swap callback transitions on stay held by the calling
//! thread until the outermost transition settles, then commit or roll back
//! together with it.
//!
//! A thread that is not inside any transition waits for the lock. A thread
//! that already is never waits: re-entering a running transition, or entering
//! a pair another thread holds, fails with `ReentrancyRejected`.

use crate::error::{AmmError, Result};
use crate::events::Event;
use crate::factory::FeeSwitch;
use crate::host::Host;
use crate::ledger::ShareLedger;
use crate::oracle;
use crate::{MINIMUM_LIQUIDITY, PROTOCOL_FEE_FACTOR, SWAP_FEE_DENOMINATOR, SWAP_FEE_NUMERATOR};
use alloy_primitives::{Address, U256};
use log::debug;
use pairswap_math::{sqrt, to_uint112, SafeMath};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::sync::{
    Arc, Condvar, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak,
};
use std::thread::{self, ThreadId};

// ─────────────────────────────────────────────────────────────
// STATE
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct PairState {
    reserve0: u128,
    reserve1: u128,
    block_timestamp_last: u32,
    price0_cumulative_last: U256,
    price1_cumulative_last: U256,
    /// `reserve0 * reserve1` as of the last fee-bearing mint or burn.
    /// `None` while the protocol fee is off.
    k_last: Option<U256>,
    shares: ShareLedger,
}

/// Serializable snapshot of a pair, for listing and inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairInfo {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    #[serde(with = "crate::events::u128_str")]
    pub reserve0: u128,
    #[serde(with = "crate::events::u128_str")]
    pub reserve1: u128,
    pub block_timestamp_last: u32,
    pub total_supply: U256,
    pub price0_cumulative_last: U256,
    pub price1_cumulative_last: U256,
    #[serde(default)]
    pub k_last: Option<U256>,
}

// ─────────────────────────────────────────────────────────────
// FLASH SWAPS
// ─────────────────────────────────────────────────────────────

/// Handler invoked by `swap` after the optimistic transfers when the request
/// carries non-empty data. By the time it returns, the pair's balances must
/// satisfy the fee-adjusted invariant or the whole swap is rolled back.
pub trait FlashSwapCallee {
    fn on_flash_swap(
        &mut self,
        host: &mut dyn Host,
        pair: &Pair,
        sender: Address,
        amount0_out: U256,
        amount1_out: U256,
        data: &[u8],
    ) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub amount0_out: U256,
    pub amount1_out: U256,
    pub to: Address,
    pub data: Vec<u8>,
}

impl SwapRequest {
    pub fn new(amount0_out: U256, amount1_out: U256, to: Address) -> Self {
        SwapRequest {
            amount0_out,
            amount1_out,
            to,
            data: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────
// TRANSITION LOCK
// ─────────────────────────────────────────────────────────────

thread_local! {
    /// Transitions, on any pair, the current thread is inside.
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    /// Pairs claimed since the outermost transition began. They stay locked
    /// until it settles and then commit or roll back together with it.
    static HELD: RefCell<Vec<Arc<Pair>>> = const { RefCell::new(Vec::new()) };
    /// Working state of each pair as it was before a nested step touched it.
    static UNDO: RefCell<Vec<(Arc<Pair>, PairState)>> = const { RefCell::new(Vec::new()) };
}

fn inside_any_transition() -> bool {
    DEPTH.with(Cell::get) > 0
}

#[derive(Debug, Default)]
struct LockOwner {
    thread: Option<ThreadId>,
    /// A transition body is running, as opposed to the pair only being held
    /// until the enclosing transition settles.
    active: bool,
}

/// Serializes transitions on one pair.
#[derive(Debug, Default)]
struct TransitionLock {
    owner: Mutex<LockOwner>,
    released: Condvar,
}

impl TransitionLock {
    fn owner(&self) -> MutexGuard<'_, LockOwner> {
        self.owner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn held_by_current_thread(&self) -> bool {
        self.owner().thread == Some(thread::current().id())
    }

    fn is_held(&self) -> bool {
        self.owner().thread.is_some()
    }

    /// Claim the pair for the current thread. Returns `true` when the claim
    /// is new. Outside any transition this waits for another owner to
    /// finish; inside one it never waits, so callbacks crossing into each
    /// other's pairs are rejected instead of deadlocking.
    fn claim(&self, activate: bool) -> Result<bool> {
        let me = thread::current().id();
        let mut owner = self.owner();
        loop {
            match owner.thread {
                None => {
                    owner.thread = Some(me);
                    owner.active = activate;
                    return Ok(true);
                }
                Some(thread) if thread == me => {
                    if activate {
                        if owner.active {
                            return Err(AmmError::ReentrancyRejected);
                        }
                        owner.active = true;
                    }
                    return Ok(false);
                }
                Some(_) if inside_any_transition() => return Err(AmmError::ReentrancyRejected),
                Some(_) => {
                    owner = self
                        .released
                        .wait(owner)
                        .unwrap_or_else(|e| e.into_inner());
                }
            }
        }
    }

    fn deactivate(&self) {
        self.owner().active = false;
    }

    fn release(&self) {
        *self.owner() = LockOwner::default();
        self.released.notify_all();
    }
}

/// One level of transition nesting. Dropped without `finish` (a panicking
/// body) it rolls back.
struct TransitionFrame<'a> {
    pair: &'a Pair,
    mark: usize,
    finished: bool,
}

impl TransitionFrame<'_> {
    fn finish(mut self, ok: bool) {
        self.finished = true;
        self.pair.end(self.mark, ok);
    }
}

impl Drop for TransitionFrame<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.pair.end(self.mark, false);
        }
    }
}

// ─────────────────────────────────────────────────────────────
// PAIR
// ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Pair {
    this: Weak<Pair>,
    address: Address,
    factory: Address,
    token0: Address,
    token1: Address,
    fee_switch: Arc<RwLock<FeeSwitch>>,
    lock: TransitionLock,
    /// Working copy, only touched while `lock` is held.
    state: Mutex<PairState>,
    /// Last committed state, what other threads observe.
    committed: RwLock<PairState>,
}

impl Pair {
    /// Pairs are only instantiated by their factory; `token0 < token1`.
    pub(crate) fn new(
        address: Address,
        factory: Address,
        token0: Address,
        token1: Address,
        fee_switch: Arc<RwLock<FeeSwitch>>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Pair {
            this: this.clone(),
            address,
            factory,
            token0,
            token1,
            fee_switch,
            lock: TransitionLock::default(),
            state: Mutex::new(PairState::default()),
            committed: RwLock::new(PairState::default()),
        })
    }

    // ── Read-only queries ──

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    pub fn token0(&self) -> Address {
        self.token0
    }

    pub fn token1(&self) -> Address {
        self.token1
    }

    /// `(reserve0, reserve1, block_timestamp_last)`
    pub fn get_reserves(&self) -> (u128, u128, u32) {
        self.view(|state| (state.reserve0, state.reserve1, state.block_timestamp_last))
    }

    pub fn price0_cumulative_last(&self) -> U256 {
        self.view(|state| state.price0_cumulative_last)
    }

    pub fn price1_cumulative_last(&self) -> U256 {
        self.view(|state| state.price1_cumulative_last)
    }

    pub fn k_last(&self) -> Option<U256> {
        self.view(|state| state.k_last)
    }

    pub fn total_supply(&self) -> U256 {
        self.view(|state| state.shares.total_supply())
    }

    pub fn balance_of(&self, holder: &Address) -> U256 {
        self.view(|state| state.shares.balance_of(holder))
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.view(|state| state.shares.allowance(owner, spender))
    }

    /// True while some thread holds this pair inside a transition.
    pub fn is_locked(&self) -> bool {
        self.lock.is_held()
    }

    pub fn info(&self) -> PairInfo {
        self.view(|state| PairInfo {
            address: self.address,
            token0: self.token0,
            token1: self.token1,
            reserve0: state.reserve0,
            reserve1: state.reserve1,
            block_timestamp_last: state.block_timestamp_last,
            total_supply: state.shares.total_supply(),
            price0_cumulative_last: state.price0_cumulative_last,
            price1_cumulative_last: state.price1_cumulative_last,
            k_last: state.k_last,
        })
    }

    // ── Liquidity share ledger ──

    pub fn approve(
        &self,
        host: &mut dyn Host,
        owner: Address,
        spender: Address,
        value: U256,
    ) -> Result<()> {
        self.ledger_op(host, |shares| Ok(shares.approve(&owner, &spender, value)))
    }

    pub fn transfer(
        &self,
        host: &mut dyn Host,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<()> {
        self.ledger_op(host, |shares| shares.transfer(&from, &to, value))
    }

    pub fn transfer_from(
        &self,
        host: &mut dyn Host,
        spender: Address,
        from: Address,
        to: Address,
        value: U256,
    ) -> Result<()> {
        self.ledger_op(host, |shares| shares.transfer_from(&spender, &from, &to, value))
    }

    // ── Transitions ──

    /// Mint shares to `to` for the tokens deposited since the last snapshot.
    /// Returns the number of shares minted.
    pub fn mint(&self, host: &mut dyn Host, sender: Address, to: Address) -> Result<U256> {
        self.transition(host, "mint", |host| {
            let mut state = self.state();
            let balance0 = host.balance_of(&self.token0, &self.address)?;
            let balance1 = host.balance_of(&self.token1, &self.address)?;
            let amount0 = balance0.safe_sub(U256::from(state.reserve0))?;
            let amount1 = balance1.safe_sub(U256::from(state.reserve1))?;

            let fee_on = self.mint_fee(host, &mut state)?;
            let total_supply = state.shares.total_supply();
            let liquidity = if total_supply.is_zero() {
                let root = sqrt(amount0.safe_mul(amount1)?);
                if root <= MINIMUM_LIQUIDITY {
                    return Err(AmmError::InsufficientLiquidityMinted);
                }
                let locked = state.shares.mint(&Address::ZERO, MINIMUM_LIQUIDITY)?;
                host.emit(self.address, locked);
                root - MINIMUM_LIQUIDITY
            } else {
                let by0 = amount0
                    .safe_mul(total_supply)?
                    .safe_div(U256::from(state.reserve0))?;
                let by1 = amount1
                    .safe_mul(total_supply)?
                    .safe_div(U256::from(state.reserve1))?;
                by0.min(by1)
            };
            if liquidity.is_zero() {
                return Err(AmmError::InsufficientLiquidityMinted);
            }
            let minted = state.shares.mint(&to, liquidity)?;
            host.emit(self.address, minted);

            self.update(host, &mut state, balance0, balance1)?;
            if fee_on {
                state.k_last = Some(reserve_product(&state)?);
            }
            host.emit(
                self.address,
                Event::Mint {
                    sender,
                    amount0,
                    amount1,
                },
            );
            Ok(liquidity)
        })
    }

    /// Burn the shares the pair holds in its own custody and send the
    /// proportional amounts of both tokens to `to`.
    pub fn burn(&self, host: &mut dyn Host, sender: Address, to: Address) -> Result<(U256, U256)> {
        self.transition(host, "burn", |host| {
            let mut state = self.state();
            let balance0 = host.balance_of(&self.token0, &self.address)?;
            let balance1 = host.balance_of(&self.token1, &self.address)?;
            let liquidity = state.shares.balance_of(&self.address);

            let fee_on = self.mint_fee(host, &mut state)?;
            let total_supply = state.shares.total_supply();
            if total_supply.is_zero() {
                return Err(AmmError::InsufficientLiquidityBurned);
            }
            let amount0 = liquidity.safe_mul(balance0)? / total_supply;
            let amount1 = liquidity.safe_mul(balance1)? / total_supply;
            if amount0.is_zero() || amount1.is_zero() {
                return Err(AmmError::InsufficientLiquidityBurned);
            }
            let burned = state.shares.burn(&self.address, liquidity)?;
            host.emit(self.address, burned);
            host.transfer(&self.token0, &self.address, &to, amount0)?;
            host.transfer(&self.token1, &self.address, &to, amount1)?;

            let balance0 = host.balance_of(&self.token0, &self.address)?;
            let balance1 = host.balance_of(&self.token1, &self.address)?;
            self.update(host, &mut state, balance0, balance1)?;
            if fee_on {
                state.k_last = Some(reserve_product(&state)?);
            }
            host.emit(
                self.address,
                Event::Burn {
                    sender,
                    amount0,
                    amount1,
                    to,
                },
            );
            Ok((amount0, amount1))
        })
    }

    /// Send the requested outputs to `request.to`, run the flash-swap
    /// callback if `request.data` is non-empty, then require that the inputs
    /// observed in custody pay for the outputs plus the 0.3% fee.
    pub fn swap(
        &self,
        host: &mut dyn Host,
        sender: Address,
        request: SwapRequest,
        callee: Option<&mut dyn FlashSwapCallee>,
    ) -> Result<()> {
        self.transition(host, "swap", |host| {
            let SwapRequest {
                amount0_out,
                amount1_out,
                to,
                data,
            } = request;
            if amount0_out.is_zero() && amount1_out.is_zero() {
                return Err(AmmError::InsufficientOutputAmount);
            }
            let (reserve0, reserve1, _) = self.get_reserves();
            let reserve0 = U256::from(reserve0);
            let reserve1 = U256::from(reserve1);
            if amount0_out >= reserve0 || amount1_out >= reserve1 {
                return Err(AmmError::InsufficientOutputReserve);
            }
            if to == self.token0 || to == self.token1 {
                return Err(AmmError::InvalidRecipient(to));
            }

            // Optimistic transfers: outputs leave before anything is paid in
            if !amount0_out.is_zero() {
                host.transfer(&self.token0, &self.address, &to, amount0_out)?;
            }
            if !amount1_out.is_zero() {
                host.transfer(&self.token1, &self.address, &to, amount1_out)?;
            }
            if !data.is_empty() {
                let callee = callee.ok_or(AmmError::MissingCallee(to))?;
                callee.on_flash_swap(host, self, sender, amount0_out, amount1_out, &data)?;
            }

            let balance0 = host.balance_of(&self.token0, &self.address)?;
            let balance1 = host.balance_of(&self.token1, &self.address)?;
            let amount0_in = balance0.saturating_sub(reserve0 - amount0_out);
            let amount1_in = balance1.saturating_sub(reserve1 - amount1_out);
            if amount0_in.is_zero() && amount1_in.is_zero() {
                return Err(AmmError::InsufficientInputAmount);
            }

            let fee_denominator = U256::from(SWAP_FEE_DENOMINATOR);
            let fee_numerator = U256::from(SWAP_FEE_NUMERATOR);
            let adjusted0 = balance0
                .safe_mul(fee_denominator)?
                .safe_sub(amount0_in.safe_mul(fee_numerator)?)?;
            let adjusted1 = balance1
                .safe_mul(fee_denominator)?
                .safe_sub(amount1_in.safe_mul(fee_numerator)?)?;
            let k_after = adjusted0.safe_mul(adjusted1)?;
            let k_before = reserve0
                .safe_mul(reserve1)?
                .safe_mul(fee_denominator.safe_mul(fee_denominator)?)?;
            if k_after < k_before {
                return Err(AmmError::InvariantViolation);
            }

            let mut state = self.state();
            self.update(host, &mut state, balance0, balance1)?;
            host.emit(
                self.address,
                Event::Swap {
                    sender,
                    amount0_in,
                    amount1_in,
                    amount0_out,
                    amount1_out,
                    to,
                },
            );
            Ok(())
        })
    }

    /// Force reserves to match custodial balances.
    pub fn sync(&self, host: &mut dyn Host) -> Result<()> {
        self.transition(host, "sync", |host| {
            let mut state = self.state();
            let balance0 = host.balance_of(&self.token0, &self.address)?;
            let balance1 = host.balance_of(&self.token1, &self.address)?;
            self.update(host, &mut state, balance0, balance1)
        })
    }

    /// Send custodial balances above the reserves to `to`.
    pub fn skim(&self, host: &mut dyn Host, to: Address) -> Result<(U256, U256)> {
        self.transition(host, "skim", |host| {
            let state = self.state();
            let excess0 = host
                .balance_of(&self.token0, &self.address)?
                .safe_sub(U256::from(state.reserve0))?;
            let excess1 = host
                .balance_of(&self.token1, &self.address)?
                .safe_sub(U256::from(state.reserve1))?;
            if !excess0.is_zero() {
                host.transfer(&self.token0, &self.address, &to, excess0)?;
            }
            if !excess1.is_zero() {
                host.transfer(&self.token1, &self.address, &to, excess1)?;
            }
            Ok((excess0, excess1))
        })
    }

    // ─────────────────────────────────────────────────────────
    // INTERNALS
    // ─────────────────────────────────────────────────────────

    fn state(&self) -> MutexGuard<'_, PairState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn committed(&self) -> RwLockReadGuard<'_, PairState> {
        self.committed.read().unwrap_or_else(|e| e.into_inner())
    }

    fn committed_mut(&self) -> RwLockWriteGuard<'_, PairState> {
        self.committed.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Read the working copy from inside this pair's own transition (a
    /// flash-swap callback), the committed copy from anywhere else.
    fn view<R>(&self, read: impl FnOnce(&PairState) -> R) -> R {
        if self.lock.held_by_current_thread() {
            read(&self.state())
        } else {
            read(&self.committed())
        }
    }

    /// Only fails while the pair is being dropped.
    fn handle(&self) -> Result<Arc<Pair>> {
        self.this.upgrade().ok_or(AmmError::ReentrancyRejected)
    }

    /// Record the working state so a failing enclosing step can restore it.
    fn journal(&self, this: Arc<Pair>) {
        let prior = self.state().clone();
        UNDO.with(|undo| undo.borrow_mut().push((this, prior)));
    }

    /// Run `body` as one all-or-nothing transition.
    fn transition<T>(
        &self,
        host: &mut dyn Host,
        name: &str,
        body: impl FnOnce(&mut dyn Host) -> Result<T>,
    ) -> Result<T> {
        let frame = self.begin()?;
        let checkpoint = host.checkpoint();
        let result = body(host);
        match &result {
            Ok(_) => {
                host.commit(checkpoint);
                debug!("pair {} {} committed", self.address, name);
            }
            Err(err) => {
                host.revert(checkpoint);
                debug!("pair {} {} rolled back: {}", self.address, name, err);
            }
        }
        frame.finish(result.is_ok());
        result
    }

    fn begin(&self) -> Result<TransitionFrame<'_>> {
        let this = self.handle()?;
        if self.lock.claim(true)? {
            HELD.with(|held| held.borrow_mut().push(this.clone()));
        }
        let mark = UNDO.with(|undo| undo.borrow().len());
        self.journal(this);
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        Ok(TransitionFrame {
            pair: self,
            mark,
            finished: false,
        })
    }

    fn end(&self, mark: usize, ok: bool) {
        self.lock.deactivate();
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
        if !ok {
            let undone = UNDO.with(|undo| undo.borrow_mut().split_off(mark));
            for (pair, prior) in undone.into_iter().rev() {
                *pair.state() = prior;
            }
        }
        if inside_any_transition() {
            return;
        }
        UNDO.with(|undo| undo.borrow_mut().clear());
        let held = HELD.with(|held| std::mem::take(&mut *held.borrow_mut()));
        for pair in held {
            pair.settle(ok);
        }
    }

    /// Publish (or discard) the working state and unlock.
    fn settle(&self, ok: bool) {
        if ok {
            let working = self.state().clone();
            *self.committed_mut() = working;
        } else {
            let committed = self.committed().clone();
            *self.state() = committed;
        }
        self.lock.release();
    }

    /// Share ledger mutation outside the transition machinery. From inside a
    /// transition it joins it and settles with it; otherwise it commits on
    /// its own.
    fn ledger_op(
        &self,
        host: &mut dyn Host,
        op: impl FnOnce(&mut ShareLedger) -> Result<Event>,
    ) -> Result<()> {
        let event = if inside_any_transition() {
            let this = self.handle()?;
            if self.lock.claim(false)? {
                HELD.with(|held| held.borrow_mut().push(this.clone()));
            }
            self.journal(this);
            op(&mut self.state().shares)?
        } else {
            self.lock.claim(false)?;
            let result = op(&mut self.state().shares);
            if result.is_ok() {
                let shares = self.state().shares.clone();
                self.committed_mut().shares = shares;
            }
            self.lock.release();
            result?
        };
        host.emit(self.address, event);
        Ok(())
    }

    /// Settle reserves to `balance0`/`balance1` and advance the price
    /// accumulators over the time elapsed since the previous snapshot.
    fn update(
        &self,
        host: &mut dyn Host,
        state: &mut PairState,
        balance0: U256,
        balance1: U256,
    ) -> Result<()> {
        let reserve0 = to_uint112(balance0)?;
        let reserve1 = to_uint112(balance1)?;
        let block_timestamp = (host.block_timestamp() % (1u64 << 32)) as u32;
        // Wraps at 2^32 so the difference is correct across the boundary
        let elapsed = block_timestamp.wrapping_sub(state.block_timestamp_last);
        if elapsed > 0 && state.reserve0 != 0 && state.reserve1 != 0 {
            state.price0_cumulative_last = oracle::accumulate(
                state.price0_cumulative_last,
                state.reserve1,
                state.reserve0,
                elapsed,
            )?;
            state.price1_cumulative_last = oracle::accumulate(
                state.price1_cumulative_last,
                state.reserve0,
                state.reserve1,
                elapsed,
            )?;
        }
        state.reserve0 = reserve0;
        state.reserve1 = reserve1;
        state.block_timestamp_last = block_timestamp;
        host.emit(self.address, Event::Sync { reserve0, reserve1 });
        Ok(())
    }

    /// Mint the protocol's share of fee growth since `k_last` to `fee_to`.
    /// Returns whether the fee switch is on.
    fn mint_fee(&self, host: &mut dyn Host, state: &mut PairState) -> Result<bool> {
        let fee_to = self
            .fee_switch
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .fee_to;
        let Some(fee_to) = fee_to else {
            state.k_last = None;
            return Ok(false);
        };
        if let Some(k_last) = state.k_last.filter(|k| !k.is_zero()) {
            let root_k = sqrt(reserve_product(state)?);
            let root_k_last = sqrt(k_last);
            if root_k > root_k_last {
                let numerator = state.shares.total_supply().safe_mul(root_k - root_k_last)?;
                let denominator = root_k
                    .safe_mul(U256::from(PROTOCOL_FEE_FACTOR))?
                    .safe_add(root_k_last)?;
                let liquidity = numerator.safe_div(denominator)?;
                if !liquidity.is_zero() {
                    let minted = state.shares.mint(&fee_to, liquidity)?;
                    host.emit(self.address, minted);
                }
            }
        }
        Ok(true)
    }
}

fn reserve_product(state: &PairState) -> Result<U256> {
    Ok(U256::from(state.reserve0).safe_mul(U256::from(state.reserve1))?)
}

// ─────────────────────────────────────────────────────────────
// TESTS
// ─────────────────────────────────────────────────────────────

// SPDX-License-Identifier: AGPL-3.0-only
//! # Pair Host Interface
//!
//! The environment a pair executes against: the fungible-token primitive its
//! reserves are denominated in, the block clock, and the event log.
//!
//! ## Host ABI
//!
//! | Function          | Description                                          |
//! |-------------------|------------------------------------------------------|
//! | `block_timestamp` | Current block time (seconds)                         |
//! | `balance_of`      | Token balance of a holder                            |
//! | `transfer`        | Move tokens `from → to` (pairs only push outwards)   |
//! | `emit`            | Append an event to the log                           |
//! | `checkpoint`      | Open a revertible scope                              |
//! | `commit`          | Close a scope, keeping its effects                   |
//! | `revert`          | Close a scope, undoing transfers and events          |
//!
//! Every pair transition runs inside a checkpoint. A failure anywhere in the
//! transition (including inside a flash-swap callback) reverts every token
//! movement and event the transition produced.

use crate::error::{AmmError, Result};
use crate::events::{EmittedEvent, Event};
use alloy_primitives::{Address, U256};
use pairswap_math::SafeMath;
use std::collections::BTreeMap;

/// Opaque marker for a revertible scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub journal_len: usize,
    pub log_len: usize,
}

pub trait Host {
    fn block_timestamp(&self) -> u64;

    fn balance_of(&self, token: &Address, holder: &Address) -> Result<U256>;

    fn transfer(&mut self, token: &Address, from: &Address, to: &Address, amount: U256)
        -> Result<()>;

    fn emit(&mut self, emitter: Address, event: Event);

    fn checkpoint(&mut self) -> Checkpoint;

    fn commit(&mut self, checkpoint: Checkpoint);

    fn revert(&mut self, checkpoint: Checkpoint);
}

// ─────────────────────────────────────────────────────────────
// REFERENCE IMPLEMENTATION (in-process, for tests and simulation)
// ─────────────────────────────────────────────────────────────

/// In-memory token state.
#[derive(Debug, Clone, Default)]
pub struct TokenAccounts {
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
    pub balances: BTreeMap<Address, U256>,
}

#[derive(Debug, Clone)]
enum JournalEntry {
    Balance {
        token: Address,
        holder: Address,
        previous: U256,
    },
    Supply {
        token: Address,
        previous: U256,
    },
}

/// In-memory host: a set of tokens, a settable clock and an event log.
#[derive(Debug, Default)]
pub struct MemoryHost {
    tokens: BTreeMap<Address, TokenAccounts>,
    timestamp: u64,
    log: Vec<EmittedEvent>,
    journal: Vec<JournalEntry>,
    depth: usize,
    deploy_nonce: u64,
}

impl MemoryHost {
    pub fn new(timestamp: u64) -> Self {
        MemoryHost {
            timestamp,
            ..Default::default()
        }
    }

    /// Deploy a token with zero supply. The address is
    /// blake3(`symbol:nonce`) truncated to 20 bytes.
    pub fn deploy_token(&mut self, symbol: &str, decimals: u8) -> Address {
        let input = format!("token:{}:{}", symbol, self.deploy_nonce);
        self.deploy_nonce = self.deploy_nonce.saturating_add(1);
        let hash = blake3::hash(input.as_bytes());
        let address = Address::from_slice(&hash.as_bytes()[12..32]);
        self.tokens.insert(
            address,
            TokenAccounts {
                symbol: symbol.to_string(),
                decimals,
                ..Default::default()
            },
        );
        address
    }

    /// Faucet: credit `amount` new tokens to `to`.
    pub fn mint(&mut self, token: &Address, to: &Address, amount: U256) -> Result<()> {
        let accounts = self
            .tokens
            .get(token)
            .ok_or(AmmError::UnknownToken(*token))?;
        let new_supply = accounts.total_supply.safe_add(amount)?;
        let new_balance = accounts
            .balances
            .get(to)
            .copied()
            .unwrap_or_default()
            .safe_add(amount)?;
        self.record_supply(token);
        self.record_balance(token, to);
        let accounts = self
            .tokens
            .get_mut(token)
            .ok_or(AmmError::UnknownToken(*token))?;
        accounts.total_supply = new_supply;
        accounts.balances.insert(*to, new_balance);
        self.emit(
            *token,
            Event::Transfer {
                from: Address::ZERO,
                to: *to,
                value: amount,
            },
        );
        Ok(())
    }

    pub fn token(&self, token: &Address) -> Option<&TokenAccounts> {
        self.tokens.get(token)
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    pub fn advance(&mut self, seconds: u64) {
        self.timestamp = self.timestamp.saturating_add(seconds);
    }

    pub fn events(&self) -> &[EmittedEvent] {
        &self.log
    }

    pub fn events_from(&self, emitter: &Address) -> impl Iterator<Item = &Event> + '_ {
        let emitter = *emitter;
        self.log
            .iter()
            .filter(move |e| e.emitter == emitter)
            .map(|e| &e.event)
    }

    pub fn clear_events(&mut self) {
        self.log.clear();
    }

    fn record_balance(&mut self, token: &Address, holder: &Address) {
        if self.depth == 0 {
            return;
        }
        let previous = self
            .tokens
            .get(token)
            .and_then(|t| t.balances.get(holder))
            .copied()
            .unwrap_or_default();
        self.journal.push(JournalEntry::Balance {
            token: *token,
            holder: *holder,
            previous,
        });
    }

    fn record_supply(&mut self, token: &Address) {
        if self.depth == 0 {
            return;
        }
        let previous = self
            .tokens
            .get(token)
            .map(|t| t.total_supply)
            .unwrap_or_default();
        self.journal.push(JournalEntry::Supply {
            token: *token,
            previous,
        });
    }
}

impl Host for MemoryHost {
    fn block_timestamp(&self) -> u64 {
        self.timestamp
    }

    fn balance_of(&self, token: &Address, holder: &Address) -> Result<U256> {
        let accounts = self
            .tokens
            .get(token)
            .ok_or(AmmError::UnknownToken(*token))?;
        Ok(accounts.balances.get(holder).copied().unwrap_or_default())
    }

    fn transfer(
        &mut self,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<()> {
        let have = self.balance_of(token, from)?;
        if have < amount {
            return Err(AmmError::InsufficientBalance { have, need: amount });
        }
        if from != to {
            let credited = self.balance_of(token, to)?.safe_add(amount)?;
            self.record_balance(token, from);
            self.record_balance(token, to);
            let accounts = self
                .tokens
                .get_mut(token)
                .ok_or(AmmError::UnknownToken(*token))?;
            accounts.balances.insert(*from, have - amount);
            accounts.balances.insert(*to, credited);
        }
        self.emit(
            *token,
            Event::Transfer {
                from: *from,
                to: *to,
                value: amount,
            },
        );
        Ok(())
    }

    fn emit(&mut self, emitter: Address, event: Event) {
        self.log.push(EmittedEvent {
            emitter,
            timestamp: self.timestamp,
            event,
        });
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.depth += 1;
        Checkpoint {
            journal_len: self.journal.len(),
            log_len: self.log.len(),
        }
    }

    fn commit(&mut self, checkpoint: Checkpoint) {
        self.depth = self.depth.saturating_sub(1);
        // Outermost scope closed: nothing left that could revert these entries
        if self.depth == 0 {
            self.journal.clear();
        } else {
            debug_assert!(self.journal.len() >= checkpoint.journal_len);
        }
    }

    fn revert(&mut self, checkpoint: Checkpoint) {
        while self.journal.len() > checkpoint.journal_len {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            match entry {
                JournalEntry::Balance {
                    token,
                    holder,
                    previous,
                } => {
                    if let Some(accounts) = self.tokens.get_mut(&token) {
                        accounts.balances.insert(holder, previous);
                    }
                }
                JournalEntry::Supply { token, previous } => {
                    if let Some(accounts) = self.tokens.get_mut(&token) {
                        accounts.total_supply = previous;
                    }
                }
            }
        }
        self.log.truncate(checkpoint.log_len);
        self.depth = self.depth.saturating_sub(1);
    }
}

// SPDX-License-Identifier: AGPL-3.0-only
//! # Liquidity Share Ledger
//!
//! Fungible accounting for a pair's liquidity shares: balances, allowances and
//! total supply. Each mutating operation returns the [`Event`] it produced so
//! the owning pair can forward it to the host log.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  ShareLedger                             │
//! │  ┌──────────┐  ┌──────────────────────┐  │
//! │  │ Balances │  │ Allowances           │  │
//! │  │ addr→U256│  │ (owner,spender)→U256 │  │
//! │  └──────────┘  └──────────────────────┘  │
//! │  total_supply == Σ balances              │
//! └──────────────────────────────────────────┘
//! ```
//!
//! An allowance of `U256::MAX` is infinite and is never decremented.

use crate::error::{AmmError, Result};
use crate::events::Event;
use alloy_primitives::{Address, U256};
use pairswap_math::SafeMath;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareLedger {
    total_supply: U256,
    balances: BTreeMap<Address, U256>,
    allowances: BTreeMap<(Address, Address), U256>,
}

impl ShareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    pub fn balance_of(&self, holder: &Address) -> U256 {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Holders with a non-zero balance.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.balances.iter().filter(|(_, v)| !v.is_zero())
    }

    pub fn mint(&mut self, to: &Address, value: U256) -> Result<Event> {
        let supply = self.total_supply.safe_add(value)?;
        let balance = self.balance_of(to).safe_add(value)?;
        self.total_supply = supply;
        self.balances.insert(*to, balance);
        Ok(Event::Transfer {
            from: Address::ZERO,
            to: *to,
            value,
        })
    }

    pub fn burn(&mut self, from: &Address, value: U256) -> Result<Event> {
        let have = self.balance_of(from);
        if have < value {
            return Err(AmmError::InsufficientBalance { have, need: value });
        }
        let supply = self.total_supply.safe_sub(value)?;
        self.set_balance(from, have - value);
        self.total_supply = supply;
        Ok(Event::Transfer {
            from: *from,
            to: Address::ZERO,
            value,
        })
    }

    pub fn transfer(&mut self, from: &Address, to: &Address, value: U256) -> Result<Event> {
        let have = self.balance_of(from);
        if have < value {
            return Err(AmmError::InsufficientBalance { have, need: value });
        }
        if from != to {
            let credited = self.balance_of(to).safe_add(value)?;
            self.set_balance(from, have - value);
            self.set_balance(to, credited);
        }
        Ok(Event::Transfer {
            from: *from,
            to: *to,
            value,
        })
    }

    pub fn approve(&mut self, owner: &Address, spender: &Address, value: U256) -> Event {
        self.allowances.insert((*owner, *spender), value);
        Event::Approval {
            owner: *owner,
            spender: *spender,
            value,
        }
    }

    /// Spend `spender`'s allowance over `from` and move the shares.
    pub fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        value: U256,
    ) -> Result<Event> {
        let allowed = self.allowance(from, spender);
        if allowed < value {
            return Err(AmmError::InsufficientAllowance {
                have: allowed,
                need: value,
            });
        }
        let event = self.transfer(from, to, value)?;
        if allowed != U256::MAX {
            self.allowances.insert((*from, *spender), allowed - value);
        }
        Ok(event)
    }

    fn set_balance(&mut self, holder: &Address, value: U256) {
        if value.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, value);
        }
    }
}

// ─────────────────────────────────────────────────────────────
// TESTS
// ─────────────────────────────────────────────────────────────

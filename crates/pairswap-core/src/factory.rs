// SPDX-License-Identifier: AGPL-3.0-only
//! # Pair Factory
//!
//! Creates at most one [`Pair`] per unordered asset pair, at an address any
//! party can predict with [`crate::address::pair_for`], and owns the
//! protocol fee switch shared by every pair it creates.
//!
//! ## Registry layout
//! - `by_assets[(token0, token1)]` and `by_assets[(token1, token0)]` → pair address
//! - `all_pairs[i]`                → i-th pair created (append-only)
//! - `instances[pair address]`     → live pair
//!
//! `create_pair` holds the registry lock across the existence check and the
//! insert, so two concurrent calls for the same assets cannot both succeed.

use crate::address::{derive_pair_address, sort_tokens};
use crate::config::FactoryConfig;
use crate::error::{AmmError, Result};
use crate::events::Event;
use crate::host::Host;
use crate::pair::{Pair, PairInfo};
use alloy_primitives::Address;
use log::info;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Protocol fee recipient and the authority allowed to change it.
/// `fee_to_setter == None` means authority has been revoked for good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeSwitch {
    pub fee_to: Option<Address>,
    pub fee_to_setter: Option<Address>,
}

#[derive(Debug, Default)]
struct PairRegistry {
    by_assets: BTreeMap<(Address, Address), Address>,
    all_pairs: Vec<Address>,
    instances: BTreeMap<Address, Arc<Pair>>,
}

#[derive(Debug)]
pub struct Factory {
    address: Address,
    fee_switch: Arc<RwLock<FeeSwitch>>,
    registry: Mutex<PairRegistry>,
}

fn non_null(address: Option<Address>) -> Option<Address> {
    address.filter(|a| *a != Address::ZERO)
}

impl Factory {
    pub fn new(address: Address, fee_to_setter: Address) -> Self {
        info!(
            "factory {} created, fee setter {}",
            address, fee_to_setter
        );
        Factory {
            address,
            fee_switch: Arc::new(RwLock::new(FeeSwitch {
                fee_to: None,
                fee_to_setter: non_null(Some(fee_to_setter)),
            })),
            registry: Mutex::new(PairRegistry::default()),
        }
    }

    /// Build a factory from validated deployment settings.
    pub fn from_config(config: &FactoryConfig) -> Result<Self> {
        config.validate()?;
        let factory = Factory::new(config.factory_address, config.fee_to_setter);
        factory.fee_switch_mut().fee_to = non_null(config.fee_to);
        if let Some(fee_to) = factory.fee_to() {
            info!("factory {} protocol fee on, recipient {}", factory.address, fee_to);
        }
        Ok(factory)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    // ── Pair creation ──

    pub fn create_pair(
        &self,
        host: &mut dyn Host,
        token_a: Address,
        token_b: Address,
    ) -> Result<Arc<Pair>> {
        let (token0, token1) = sort_tokens(token_a, token_b)?;
        let mut registry = self.registry();
        if registry.by_assets.contains_key(&(token0, token1)) {
            return Err(AmmError::PairExists { token0, token1 });
        }
        let address = derive_pair_address(&self.address, &token0, &token1);
        if registry.instances.contains_key(&address) {
            return Err(AmmError::AddressCollision(address));
        }

        let pair = Pair::new(
            address,
            self.address,
            token0,
            token1,
            Arc::clone(&self.fee_switch),
        );
        registry.by_assets.insert((token0, token1), address);
        registry.by_assets.insert((token1, token0), address);
        registry.all_pairs.push(address);
        registry.instances.insert(address, Arc::clone(&pair));
        let pair_count = registry.all_pairs.len() as u64;
        drop(registry);

        host.emit(
            self.address,
            Event::PairCreated {
                token0,
                token1,
                pair: address,
                pair_count,
            },
        );
        info!(
            "pair {} created for {}/{} ({} total)",
            address, token0, token1, pair_count
        );
        Ok(pair)
    }

    // ── Registry queries ──

    /// Pair address for the assets in either order.
    pub fn get_pair(&self, token_a: &Address, token_b: &Address) -> Option<Address> {
        self.registry().by_assets.get(&(*token_a, *token_b)).copied()
    }

    pub fn pair(&self, address: &Address) -> Option<Arc<Pair>> {
        self.registry().instances.get(address).cloned()
    }

    pub fn pair_by_assets(&self, token_a: &Address, token_b: &Address) -> Option<Arc<Pair>> {
        let registry = self.registry();
        let address = registry.by_assets.get(&(*token_a, *token_b))?;
        registry.instances.get(address).cloned()
    }

    pub fn all_pairs(&self, index: usize) -> Option<Address> {
        self.registry().all_pairs.get(index).copied()
    }

    pub fn all_pairs_length(&self) -> usize {
        self.registry().all_pairs.len()
    }

    /// Snapshot of every pair in creation order.
    pub fn list_pairs(&self) -> Vec<PairInfo> {
        let pairs: Vec<Arc<Pair>> = {
            let registry = self.registry();
            registry
                .all_pairs
                .iter()
                .filter_map(|a| registry.instances.get(a).cloned())
                .collect()
        };
        pairs.iter().map(|p| p.info()).collect()
    }

    // ── Fee switch ──

    pub fn fee_to(&self) -> Option<Address> {
        self.fee_switch().fee_to
    }

    pub fn fee_to_setter(&self) -> Option<Address> {
        self.fee_switch().fee_to_setter
    }

    /// Turn the protocol fee on (`Some`) or off (`None`).
    pub fn set_fee_to(&self, caller: Address, fee_to: Option<Address>) -> Result<()> {
        let mut switch = self.fee_switch_mut();
        if switch.fee_to_setter != Some(caller) {
            return Err(AmmError::Unauthorized { caller });
        }
        switch.fee_to = non_null(fee_to);
        match switch.fee_to {
            Some(to) => info!("factory {} protocol fee on, recipient {}", self.address, to),
            None => info!("factory {} protocol fee off", self.address),
        }
        Ok(())
    }

    /// Hand authority to another setter. `None` revokes it permanently.
    pub fn set_fee_to_setter(&self, caller: Address, setter: Option<Address>) -> Result<()> {
        let mut switch = self.fee_switch_mut();
        if switch.fee_to_setter != Some(caller) {
            return Err(AmmError::Unauthorized { caller });
        }
        switch.fee_to_setter = non_null(setter);
        match switch.fee_to_setter {
            Some(to) => info!("factory {} fee setter is now {}", self.address, to),
            None => info!("factory {} fee setter revoked", self.address),
        }
        Ok(())
    }

    fn registry(&self) -> MutexGuard<'_, PairRegistry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fee_switch(&self) -> RwLockReadGuard<'_, FeeSwitch> {
        self.fee_switch.read().unwrap_or_else(|e| e.into_inner())
    }

    fn fee_switch_mut(&self) -> RwLockWriteGuard<'_, FeeSwitch> {
        self.fee_switch.write().unwrap_or_else(|e| e.into_inner())
    }
}

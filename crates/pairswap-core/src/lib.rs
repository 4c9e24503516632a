// SPDX-License-Identifier: AGPL-3.0-only
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PAIRSWAP - CONSTANT-PRODUCT PAIR ENGINE
//
// Two-asset liquidity pairs and the factory that creates them.
// - Reserve state machine: mint, burn, swap (with flash swaps), sync, skim
// - Liquidity share ledger with allowances
// - Time-weighted price accumulators
// - Protocol fee switch and deterministic pair addresses
//
// Token custody, the block clock and the event log live behind `Host`.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub mod address;
pub mod config;
pub mod error;
pub mod events;
pub mod factory;
pub mod host;
pub mod ledger;
pub mod library;
pub mod oracle;
pub mod pair;

pub use alloy_primitives::{Address, U256};
pub use pairswap_math::{UQ112x112, Q112, UINT112_MAX};

pub use config::FactoryConfig;
pub use error::{AmmError, ErrorKind, Result};
pub use events::{EmittedEvent, Event};
pub use factory::{Factory, FeeSwitch};
pub use host::{Checkpoint, Host, MemoryHost};
pub use ledger::ShareLedger;
pub use oracle::PriceObservation;
pub use pair::{FlashSwapCallee, Pair, PairInfo, SwapRequest};

/// Shares locked to `Address::ZERO` by the first mint of every pair.
pub const MINIMUM_LIQUIDITY: U256 = U256::from_limbs([1_000, 0, 0, 0]);

/// Swap fee is `SWAP_FEE_NUMERATOR / SWAP_FEE_DENOMINATOR` of the input (0.3%).
pub const SWAP_FEE_NUMERATOR: u64 = 3;
pub const SWAP_FEE_DENOMINATOR: u64 = 1_000;

/// Protocol takes `1 / (PROTOCOL_FEE_FACTOR + 1)` of fee growth when on.
pub const PROTOCOL_FEE_FACTOR: u64 = 5;

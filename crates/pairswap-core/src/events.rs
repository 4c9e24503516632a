// SPDX-License-Identifier: AGPL-3.0-only
//! # Observable events
//!
//! Append-only log entries emitted by tokens, pairs and the factory. Indexers
//! reconstruct reserves, share balances and pair enumeration from these alone.
//!
//! | Event         | Emitter        |
//! |---------------|----------------|
//! | `Transfer`    | token / pair   |
//! | `Approval`    | pair           |
//! | `Mint`        | pair           |
//! | `Burn`        | pair           |
//! | `Swap`        | pair           |
//! | `Sync`        | pair           |
//! | `PairCreated` | factory        |

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────
// u128 ↔ String serialization (JSON doesn't support 128-bit integers)
// ─────────────────────────────────────────────────────────────

pub(crate) mod u128_str {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(val: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&val.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>().map_err(serde::de::Error::custom)
    }
}

// ─────────────────────────────────────────────────────────────
// EVENTS
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    /// Share or token movement. `from == ZERO` is a mint, `to == ZERO` a burn.
    Transfer {
        from: Address,
        to: Address,
        value: U256,
    },
    Approval {
        owner: Address,
        spender: Address,
        value: U256,
    },
    Mint {
        sender: Address,
        amount0: U256,
        amount1: U256,
    },
    Burn {
        sender: Address,
        amount0: U256,
        amount1: U256,
        to: Address,
    },
    Swap {
        sender: Address,
        amount0_in: U256,
        amount1_in: U256,
        amount0_out: U256,
        amount1_out: U256,
        to: Address,
    },
    Sync {
        #[serde(with = "u128_str")]
        reserve0: u128,
        #[serde(with = "u128_str")]
        reserve1: u128,
    },
    PairCreated {
        token0: Address,
        token1: Address,
        pair: Address,
        pair_count: u64,
    },
}

/// An event as recorded in the host log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedEvent {
    pub emitter: Address,
    pub timestamp: u64,
    pub event: Event,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_json_uses_decimal_strings() {
        let event = Event::Sync {
            reserve0: 5_192_296_858_534_827_628_530_496_329_220_095,
            reserve1: 1,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"Sync\""));
        assert!(json.contains("\"reserve0\":\"5192296858534827628530496329220095\""));
        let decoded: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_pair_created_json_roundtrip() {
        let event = EmittedEvent {
            emitter: Address::repeat_byte(0xfa),
            timestamp: 1_700_000_000,
            event: Event::PairCreated {
                token0: Address::repeat_byte(0x01),
                token1: Address::repeat_byte(0x02),
                pair: Address::repeat_byte(0x03),
                pair_count: 1,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        let decoded: EmittedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, event);
    }
}

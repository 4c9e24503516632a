// SPDX-License-Identifier: AGPL-3.0-only
use crate::error::{AmmError, Result};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Deployment settings for a pair factory.
///
/// ```toml
/// factory_address = "0xfafafafafafafafafafafafafafafafafafafafa"
/// fee_to_setter   = "0x5e5e5e5e5e5e5e5e5e5e5e5e5e5e5e5e5e5e5e5e"
/// # optional; protocol fee is off when absent
/// fee_to          = "0xfefefefefefefefefefefefefefefefefefefefe"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    pub factory_address: Address,
    pub fee_to_setter: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_to: Option<Address>,
}

impl FactoryConfig {
    /// Load factory config from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AmmError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AmmError::Config(e.to_string()))
    }

    /// Load factory config from environment variables
    pub fn load_from_env() -> Result<Self> {
        Self::load_from_vars(|name| std::env::var(name).ok())
    }

    /// Same as `load_from_env`, reading variables through `lookup`.
    pub fn load_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let factory_address = var_address(&lookup, "PAIRSWAP_FACTORY_ADDRESS")?
            .ok_or_else(|| AmmError::Config("PAIRSWAP_FACTORY_ADDRESS not set".to_string()))?;
        let fee_to_setter = var_address(&lookup, "PAIRSWAP_FEE_TO_SETTER")?
            .ok_or_else(|| AmmError::Config("PAIRSWAP_FEE_TO_SETTER not set".to_string()))?;
        let fee_to = var_address(&lookup, "PAIRSWAP_FEE_TO")?;
        Ok(Self {
            factory_address,
            fee_to_setter,
            fee_to,
        })
    }

    /// Save factory config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AmmError::Config(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| AmmError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.factory_address == Address::ZERO {
            return Err(AmmError::Config("factory_address cannot be null".to_string()));
        }
        if self.fee_to_setter == Address::ZERO {
            return Err(AmmError::Config("fee_to_setter cannot be null".to_string()));
        }
        Ok(())
    }
}

fn var_address(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<Address>> {
    match lookup(name) {
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<Address>()
            .map(Some)
            .map_err(|e| AmmError::Config(format!("{}: {}", name, e))),
        None => Ok(None),
    }
}

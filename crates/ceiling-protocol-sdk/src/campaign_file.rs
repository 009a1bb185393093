use std::fs;
use std::path::Path;
use std::str::FromStr;

use ceiling_protocol::{
    Amount, BlockHeight, Identity, PoolAccounts, SECONDS_PER_DAY, SaleConfig,
    TRANSFER_LOCK_SECONDS, Timestamp, VESTING_STEP_SECONDS,
};
use serde::{Deserialize, Serialize};

use crate::errors::{SdkError, SdkResult};
use crate::hidden_schedule::{HiddenSchedule, PlannedPoint, amount_string};
use crate::share_planner::SharePlan;

/// Identities of the pools, as base58 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolsFile {
    pub exchange_pool: String,
    pub vesting_vault: String,
    pub vesting_recipient: String,
    pub secondary_pool: String,
}

/// Campaign definition as an operator writes it.
///
/// ```yaml
/// start_height: 1000000
/// stop_height: 1003000
/// rate: 1000
/// shares: { contributors: 46, exchange: 5, vesting: 20, secondary: 29 }
/// controller: <base58>
/// pools:
///   exchange_pool: <base58>
///   vesting_vault: <base58>
///   vesting_recipient: <base58>
///   secondary_pool: <base58>
/// points:
///   - { height: 1000000, cap: 3 }
///   - { height: 1001000, cap: 13 }
///   - { height: 1002000, cap: 15 }
/// decoys: 4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignFile {
    pub start_height: BlockHeight,
    pub stop_height: BlockHeight,
    #[serde(with = "amount_string")]
    pub rate: Amount,
    #[serde(default)]
    pub shares: SharePlan,
    pub controller: String,
    pub pools: PoolsFile,
    pub points: Vec<PlannedPoint>,
    #[serde(default)]
    pub decoys: usize,
    /// Defaults to 14 days.
    #[serde(default)]
    pub transfer_lock_days: Option<i64>,
    /// Defaults to 360 days.
    #[serde(default)]
    pub vesting_step_days: Option<i64>,
}

impl CampaignFile {
    pub fn load(path: &Path) -> SdkResult<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> SdkResult<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn save(&self, path: &Path) -> SdkResult<()> {
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn hidden_schedule(&self) -> HiddenSchedule {
        HiddenSchedule::new(self.points.clone()).with_decoys(self.decoys)
    }

    pub fn to_sale_config(&self) -> SdkResult<SaleConfig> {
        let pools = PoolAccounts {
            exchange_pool: parse_identity(&self.pools.exchange_pool)?,
            vesting_vault: parse_identity(&self.pools.vesting_vault)?,
            vesting_recipient: parse_identity(&self.pools.vesting_recipient)?,
            secondary_pool: parse_identity(&self.pools.secondary_pool)?,
        };
        let mut config = SaleConfig::new(
            self.start_height,
            self.stop_height,
            self.rate,
            pools,
            parse_identity(&self.controller)?,
        );
        config.shares = self.shares.to_pool_shares()?;
        config.transfer_lock_seconds = days_to_seconds(
            "transfer_lock_days",
            self.transfer_lock_days,
            TRANSFER_LOCK_SECONDS,
        )?;
        config.vesting_step_seconds = days_to_seconds(
            "vesting_step_days",
            self.vesting_step_days,
            VESTING_STEP_SECONDS,
        )?;

        config.validate()?;
        Ok(config)
    }
}

fn days_to_seconds(field: &str, days: Option<i64>, default: Timestamp) -> SdkResult<Timestamp> {
    let Some(days) = days else {
        return Ok(default);
    };
    days.checked_mul(SECONDS_PER_DAY)
        .filter(|seconds| *seconds >= 0)
        .ok_or_else(|| SdkError::InvalidConfig(format!("{field}: {days} days out of range")))
}

pub fn parse_identity(value: &str) -> SdkResult<Identity> {
    Identity::from_str(value.trim()).map_err(|_| SdkError::InvalidIdentity(value.to_string()))
}

//! Runtime configuration.
//!
//! Precedence is CLI flags, then environment (`.env` is loaded first), then
//! defaults.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding [`LedgerConfig::header_group_name_index`].
pub const ENV_HEADER_GROUP_INDEX: &str = "PAYSHEET_HEADER_GROUP_INDEX";

/// Environment variable overriding [`LedgerConfig::cost_centre_index`].
pub const ENV_COST_CENTRE_INDEX: &str = "PAYSHEET_COST_CENTRE_INDEX";

/// Column indices the ledger reconstructor reads that vary between exports.
///
/// Both are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Column holding the header group name on context rows.
    pub header_group_name_index: usize,
    /// Column holding the cost centre on transaction rows.
    pub cost_centre_index: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            header_group_name_index: 1,
            cost_centre_index: 1,
        }
    }
}

impl LedgerConfig {
    /// Defaults overridden by `PAYSHEET_*` environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            header_group_name_index: read_index(
                &lookup,
                ENV_HEADER_GROUP_INDEX,
                defaults.header_group_name_index,
            )?,
            cost_centre_index: read_index(&lookup, ENV_COST_CENTRE_INDEX, defaults.cost_centre_index)?,
        })
    }

    pub fn with_header_group_name_index(mut self, index: usize) -> Self {
        self.header_group_name_index = index;
        self
    }

    pub fn with_cost_centre_index(mut self, index: usize) -> Self {
        self.cost_centre_index = index;
        self
    }
}

fn read_index<F>(lookup: &F, key: &str, default: usize) -> ConfigResult<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

/// Options shared by the pipeline entry points.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOptions {
    /// Sheet to read. Missing names fall back to the engine's default sheet.
    pub sheet_name: Option<String>,
    /// Replaces the month label derived from the sheet name (payslips only).
    pub month_label: Option<String>,
}

impl PipelineOptions {
    pub fn with_sheet(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    pub fn with_month_label(mut self, month_label: impl Into<String>) -> Self {
        self.month_label = Some(month_label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_indices() {
        let config = LedgerConfig::default();
        assert_eq!(config.header_group_name_index, 1);
        assert_eq!(config.cost_centre_index, 1);
    }

    #[test]
    fn test_env_overrides() {
        let config = LedgerConfig::from_lookup(lookup(&[
            (ENV_HEADER_GROUP_INDEX, "5"),
            (ENV_COST_CENTRE_INDEX, " 6 "),
        ]))
        .unwrap();
        assert_eq!(config.header_group_name_index, 5);
        assert_eq!(config.cost_centre_index, 6);
    }

    #[test]
    fn test_blank_env_keeps_default() {
        let config = LedgerConfig::from_lookup(lookup(&[(ENV_COST_CENTRE_INDEX, "")])).unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn test_invalid_env_value() {
        let err = LedgerConfig::from_lookup(lookup(&[(ENV_HEADER_GROUP_INDEX, "B")])).unwrap_err();
        assert_eq!(err.code(), "INVALID_CONFIG");
        assert!(err.to_string().contains(ENV_HEADER_GROUP_INDEX));
    }

    #[test]
    fn test_builder_overrides() {
        let config = LedgerConfig::default()
            .with_header_group_name_index(2)
            .with_cost_centre_index(7);
        assert_eq!(config.header_group_name_index, 2);
        assert_eq!(config.cost_centre_index, 7);
    }

    #[test]
    fn test_pipeline_options() {
        let options = PipelineOptions::default()
            .with_sheet("Payroll")
            .with_month_label("Feb 26");
        assert_eq!(options.sheet_name.as_deref(), Some("Payroll"));
        assert_eq!(options.month_label.as_deref(), Some("Feb 26"));
    }
}

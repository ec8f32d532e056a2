// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration (§6.3): the original keys (`root`, `multigraph`,
//! `db`, `rulebase`, `dumprules`) plus the ambient keys any runnable host
//! needs, grounded in `aoide-storage-sqlite::connection::pool::Config` and
//! `aoide-backend-embedded::storage::DatabaseConfig`.

use std::num::NonZeroU32;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{SpindleError, SpindleResult};

/// What to do about pending Diesel migrations at start-up, mirroring
/// `DatabaseSchemaMigrationMode`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigrationMode {
    /// Assume the schema is already current; fail if it isn't.
    DontTouch,
    /// Apply whatever migrations haven't run yet.
    #[default]
    ApplyPending,
    /// Drop and recreate the schema from scratch. Only sensible against an
    /// in-memory or scratch database.
    ReapplyAll,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// `SpindleConfig` (§6.3): everything `Engine::open` needs to start.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// The local proxy URI prefix (§3.1); every minted proxy is
    /// `<root>/<uuid32>#id`.
    pub root: String,
    /// Whether incoming graphs may legitimately touch more than one named
    /// graph in the quad-store (§6.3). The core doesn't enforce this; it's
    /// surfaced for a host's ingestion layer to honour.
    #[serde(default)]
    pub multigraph: bool,
    /// SQLite storage target: a file path, or `:memory:`.
    pub db: String,
    /// Path to the RON-encoded rule base file (§4.1).
    pub rulebase: PathBuf,
    /// Log the resolved rule base at start-up (§6.3, §4.1 `dump`).
    #[serde(default)]
    pub dumprules: bool,
    #[serde(default = "default_pool_size")]
    pub db_pool_max_size: NonZeroU32,
    #[serde(default)]
    pub migrate_schema: MigrationMode,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_pool_size() -> NonZeroU32 {
    NonZeroU32::new(4).expect("4 is non-zero")
}

impl Config {
    /// Parse a RON-encoded configuration. Failure here is fatal at
    /// start-up (§7).
    pub fn load_ron(text: &str) -> SpindleResult<Self> {
        ron::from_str(text).map_err(|err| SpindleError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_config_applying_defaults() {
        let config = Config::load_ron(
            r#"(
                root: "http://example.com/things",
                db: ":memory:",
                rulebase: "rulebase.ron",
            )"#,
        )
        .unwrap();
        assert!(!config.multigraph);
        assert!(!config.dumprules);
        assert_eq!(config.db_pool_max_size.get(), 4);
        assert_eq!(config.migrate_schema, MigrationMode::ApplyPending);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn rejects_malformed_ron_as_a_config_error() {
        let err = Config::load_ron("not valid ron (").unwrap_err();
        assert!(matches!(err, SpindleError::Config(_)));
    }
}

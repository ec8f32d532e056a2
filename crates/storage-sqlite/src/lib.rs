// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![warn(rustdoc::broken_intra_doc_links)]

//! SQLite storage plumbing shared by `spindle-repo-sqlite`: where the
//! database file lives, how its connection pool is configured, and the
//! maintenance operations (`VACUUM`, `ANALYZE`) that don't belong to any
//! single repository.

use diesel::{RunQueryDsl as _, SqliteConnection};
use thiserror::Error;

pub mod connection;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] diesel::result::Error),

    #[error(transparent)]
    DatabaseConnection(#[from] diesel::ConnectionError),

    #[error(transparent)]
    DatabaseConnectionPool(#[from] r2d2::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Apply the `PRAGMA`s Spindle relies on for a single-writer, WAL-mode
/// database. Some of these can only be changed once, right after the file
/// is created.
pub fn initialize_database(connection: &mut SqliteConnection) -> Result<()> {
    diesel::sql_query(
        r"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA wal_autocheckpoint = 1000;
PRAGMA wal_checkpoint(TRUNCATE);
PRAGMA foreign_keys = 1;
PRAGMA defer_foreign_keys = 1;
PRAGMA recursive_triggers = 1;
PRAGMA encoding = 'UTF-8';
",
    )
    .execute(connection)?;
    Ok(())
}

pub fn vacuum_database(connection: &mut SqliteConnection) -> Result<()> {
    diesel::dsl::sql_query("VACUUM")
        .execute(connection)
        .map(|count| debug_assert_eq!(0, count))
        .map_err(Into::into)
}

/// Refresh the query planner's statistics. Not automatic: SQLite only
/// gathers this on request (<https://www.sqlite.org/lang_analyze.html>).
pub fn analyze_and_optimize_database_stats(connection: &mut SqliteConnection) -> Result<()> {
    diesel::dsl::sql_query("ANALYZE")
        .execute(connection)
        .map(|_| ())
        .map_err(Into::into)
}

pub fn cleanse_database(connection: &mut SqliteConnection, vacuum: bool) -> Result<()> {
    if vacuum {
        log::info!("rebuilding database storage before analysis and optimization");
        vacuum_database(connection)?;
    }
    log::info!("analyzing and optimizing database statistics");
    analyze_and_optimize_database_stats(connection)?;
    Ok(())
}

// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::explicit_deref_methods)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]
// recursion_limit was required for diesel
#![recursion_limit = "256"]

//! The SQLite-backed proxy store (C3): the database schema, Diesel models,
//! and the [`spindle_repo::proxy::ProxyRepo`] / [`spindle_repo::query::QueryRepo`]
//! implementations that back it.

use diesel::migration::{MigrationVersion, Result as MigrationResult};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness as _};

pub type DbBackend = diesel::sqlite::Sqlite;
pub type DbConnection = diesel::sqlite::SqliteConnection;

pub mod prelude {
    pub(crate) use diesel::{prelude::*, result::Error as DieselError};
    use std::ops::{Deref, DerefMut};

    pub(crate) use spindle_repo::{OptionalRepoResult as _, RepoError, RepoResult};

    pub use crate::{DbBackend, DbConnection};
    pub use diesel::Connection as _;

    /// Wraps a raw Diesel connection together with the configured proxy-URI
    /// `root` (§3.1), since every `locate`/`create`/`relate` call needs to
    /// reconstitute a full `ProxyUri` from a bare ID.
    #[allow(missing_debug_implementations)]
    pub struct Connection<'db> {
        inner: &'db mut DbConnection,
        root: String,
    }

    impl<'db> Connection<'db> {
        pub fn new(inner: &'db mut DbConnection, root: impl Into<String>) -> Self {
            Self {
                inner,
                root: root.into(),
            }
        }

        pub(crate) fn root(&self) -> &str {
            &self.root
        }
    }

    impl AsRef<DbConnection> for Connection<'_> {
        fn as_ref(&self) -> &DbConnection {
            self.inner
        }
    }

    impl AsMut<DbConnection> for Connection<'_> {
        fn as_mut(&mut self) -> &mut DbConnection {
            self.inner
        }
    }

    impl Deref for Connection<'_> {
        type Target = DbConnection;

        fn deref(&self) -> &Self::Target {
            self.as_ref()
        }
    }

    impl DerefMut for Connection<'_> {
        fn deref_mut(&mut self) -> &mut Self::Target {
            self.as_mut()
        }
    }

    /// A `UNIQUE` violation on `moved.from_id` means a concurrent
    /// `migrate` already claimed that row; the caller is expected to
    /// retry the whole `create` call (REDESIGN FLAGS).
    pub(crate) fn repo_error(err: DieselError) -> RepoError {
        match err {
            DieselError::NotFound => RepoError::NotFound,
            DieselError::DatabaseError(diesel::result::DatabaseErrorKind::UniqueViolation, _) => {
                RepoError::Conflict
            }
            err => anyhow::Error::from(err).into(),
        }
    }

    /// Satisfies Diesel's `E: From<diesel::result::Error>` bound on
    /// `Connection::transaction` without implementing a foreign trait on a
    /// foreign type. Wraps whatever error type the transaction body uses.
    #[derive(Debug)]
    pub struct DieselTransactionError<E>(E);

    impl<E> DieselTransactionError<E> {
        pub const fn new(inner: E) -> Self {
            Self(inner)
        }

        pub fn into_inner(self) -> E {
            let Self(inner) = self;
            inner
        }
    }

    impl<E> From<DieselError> for DieselTransactionError<E>
    where
        E: From<RepoError>,
    {
        fn from(err: DieselError) -> Self {
            Self(repo_error(err).into())
        }
    }

    impl<E> From<RepoError> for DieselTransactionError<E>
    where
        E: From<RepoError>,
    {
        fn from(err: RepoError) -> Self {
            Self(err.into())
        }
    }

    pub type RepoTransactionError = DieselTransactionError<RepoError>;

    #[cfg(test)]
    pub(crate) mod tests {
        use diesel::Connection as _;

        use super::DbConnection;

        pub(crate) fn establish_connection() -> DbConnection {
            let mut connection =
                DbConnection::establish(":memory:").expect("in-memory database connection");
            crate::run_migrations(&mut connection).expect("pending migrations applied");
            connection
        }
    }
}

pub mod db;
pub mod repo;
mod util;

const EMBEDDED_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn run_migrations(connection: &mut DbConnection) -> MigrationResult<Vec<MigrationVersion<'_>>> {
    connection.run_pending_migrations(EMBEDDED_MIGRATIONS)
}

// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use diesel::{r2d2, Connection as _};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Storage;
use crate::Result;

pub type ConnectionManager = r2d2::ConnectionManager<diesel::SqliteConnection>;
pub type ConnectionPool = r2d2::Pool<ConnectionManager>;
pub type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub max_size: NonZeroU32,
}

/// Build a connection pool for `storage`. Establishes (and immediately
/// drops) one test connection first: r2d2 otherwise retries silently on a
/// bad path instead of failing fast.
pub fn create_connection_pool(storage: &Storage, max_size: NonZeroU32) -> Result<ConnectionPool> {
    let address = storage.as_ref();
    drop(diesel::SqliteConnection::establish(address)?);
    let manager = ConnectionManager::new(address);
    let pool = ConnectionPool::builder().max_size(max_size.get()).build(manager)?;
    Ok(pool)
}

pub fn get_pooled_connection(pool: &ConnectionPool) -> Result<PooledConnection> {
    pool.get().map_err(Into::into)
}

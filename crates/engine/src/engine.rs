// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The top-level engine: wires the rule base, the SQLite-backed proxy
//! store and the correlator together, grounded on
//! `twine/correlate/processor.c`'s `spindle_correlate`, the per-graph
//! driver that discards any cached copy of the graph, extracts
//! co-references, and asserts them into the proxy store.

use std::cell::RefCell;

use spindle_core::{ChangeSet, CorefPair, RuleBase};
use spindle_rdf::{GraphCache, Model};
use spindle_repo::proxy::ProxyRepo as _;
use spindle_repo::RepoError;
use spindle_repo_sqlite::prelude::Connection;
use spindle_repo_sqlite::run_migrations;
use spindle_storage_sqlite::connection::pool::{
    create_connection_pool, get_pooled_connection, ConnectionPool, PooledConnection,
};
use spindle_storage_sqlite::connection::Storage;
use spindle_storage_sqlite::initialize_database;

use crate::config::{Config, MigrationMode};
use crate::correlator;
use crate::error::SpindleResult;

/// One graph's before/after state (§6.4): `old` is the graph's previous
/// content if any, `new` is what's being asserted now.
#[derive(Debug)]
pub struct GraphUpdate<M> {
    pub uri: String,
    pub old: Option<M>,
    pub new: M,
}

/// Bounded retries for the `moved.from_id` race (REDESIGN FLAGS): the
/// losing side of a concurrent migration re-observes the winner's proxy on
/// retry rather than failing the whole ingest.
const MAX_CREATE_ATTEMPTS: u32 = 3;

/// The engine, generic over the host's concrete [`Model`] implementation.
pub struct Engine<M> {
    config: Config,
    rulebase: RuleBase,
    pool: ConnectionPool,
    graph_cache: RefCell<GraphCache<M>>,
}

impl<M> std::fmt::Debug for Engine<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("config", &self.config).finish_non_exhaustive()
    }
}

impl<M: Model> Engine<M> {
    /// Load the rule base, connect the pool, and apply migrations per
    /// `config.migrate_schema`. Any failure here is fatal at start-up
    /// (§7).
    pub fn open(config: Config) -> SpindleResult<Self> {
        let rulebase = RuleBase::load(&config.rulebase)?;
        if config.dumprules {
            rulebase.dump();
        }

        let storage: Storage = config.db.parse().expect("PathBuf parsing is infallible");
        let pool = create_connection_pool(&storage, config.db_pool_max_size)?;

        {
            let mut connection = get_pooled_connection(&pool)?;
            initialize_database(&mut connection)?;
            match config.migrate_schema {
                MigrationMode::DontTouch => {}
                MigrationMode::ApplyPending | MigrationMode::ReapplyAll => {
                    run_migrations(&mut connection).map_err(anyhow::Error::from)?;
                }
            }
        }

        Ok(Self {
            config,
            rulebase,
            pool,
            graph_cache: RefCell::new(GraphCache::new()),
        })
    }

    #[must_use]
    pub fn rulebase(&self) -> &RuleBase {
        &self.rulebase
    }

    #[must_use]
    pub(crate) fn root(&self) -> &str {
        &self.config.root
    }

    pub(crate) fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Correlate one graph update and assert the resulting co-references
    /// into the proxy store, returning the resulting change-set (§4.4).
    pub fn ingest(&self, update: GraphUpdate<M>) -> SpindleResult<ChangeSet> {
        self.graph_cache.borrow_mut().discard(&update.uri);

        if let Some(old) = &update.old {
            let old_set = correlator::extract(old, &self.rulebase);
            tracing::debug!(
                uri = %update.uri,
                pairs = old_set.len(),
                "extracted references from previous graph state"
            );
        }

        let new_set = correlator::extract(&update.new, &self.rulebase);
        tracing::debug!(
            uri = %update.uri,
            pairs = new_set.len(),
            "extracted references from new graph state"
        );

        let mut changeset = ChangeSet::new();
        let mut pooled = get_pooled_connection(&self.pool)?;
        for pair in &new_set {
            self.create_with_retry(&mut pooled, pair, &mut changeset)?;
        }

        tracing::info!(uri = %update.uri, changes = changeset.len(), "processing complete");
        Ok(changeset)
    }

    fn create_with_retry(
        &self,
        pooled: &mut PooledConnection,
        pair: &CorefPair,
        changeset: &mut ChangeSet,
    ) -> SpindleResult<()> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut conn = Connection::new(&mut **pooled, self.config.root.as_str());
            match conn.create(&self.config.root, &pair.left, pair.right.as_deref(), changeset) {
                Ok(_) => return Ok(()),
                Err(RepoError::Conflict) if attempt < MAX_CREATE_ATTEMPTS => {
                    tracing::debug!(left = %pair.left, attempt, "retrying after a concurrent migration");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

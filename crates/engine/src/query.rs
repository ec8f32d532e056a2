// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The read-only query facade (C8), a thin pooled-connection wrapper
//! around [`QueryRepo`] so a host never has to reach into
//! `spindle-repo-sqlite` directly.

use spindle_core::{ProxyId, ProxyUri};
use spindle_repo::query::{MediaDescriptor, ProxyItem, QueryRepo as _};
use spindle_repo_sqlite::prelude::Connection;
use spindle_rdf::Model;
use spindle_storage_sqlite::connection::pool::get_pooled_connection;

use crate::engine::Engine;
use crate::error::SpindleResult;

impl<M: Model> Engine<M> {
    pub fn lookup(&self, external_uri: &str) -> SpindleResult<Option<ProxyUri>> {
        let mut pooled = get_pooled_connection(self.pool())?;
        let mut conn = Connection::new(&mut pooled, self.root());
        Ok(conn.lookup(external_uri)?)
    }

    pub fn refs(&self, id: ProxyId) -> SpindleResult<Vec<String>> {
        let mut pooled = get_pooled_connection(self.pool())?;
        let mut conn = Connection::new(&mut pooled, self.root());
        Ok(conn.refs(id)?)
    }

    pub fn fetch_item(&self, id: ProxyId) -> SpindleResult<ProxyItem> {
        let mut pooled = get_pooled_connection(self.pool())?;
        let mut conn = Connection::new(&mut pooled, self.root());
        Ok(conn.fetch_item(id)?)
    }

    pub fn enumerate_memberships(&self, id: ProxyId, limit: Option<u32>) -> SpindleResult<Vec<ProxyId>> {
        let mut pooled = get_pooled_connection(self.pool())?;
        let mut conn = Connection::new(&mut pooled, self.root());
        Ok(conn.enumerate_memberships(id, limit)?)
    }

    pub fn about(&self, id: ProxyId) -> SpindleResult<Vec<ProxyId>> {
        let mut pooled = get_pooled_connection(self.pool())?;
        let mut conn = Connection::new(&mut pooled, self.root());
        Ok(conn.about(id)?)
    }

    pub fn media(&self, id: ProxyId) -> SpindleResult<Vec<MediaDescriptor>> {
        let mut pooled = get_pooled_connection(self.pool())?;
        let mut conn = Connection::new(&mut pooled, self.root());
        Ok(conn.media(id)?)
    }
}

// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Read-only query contract (C8): lookups over the proxy table for
//! presentation layers. Everything here is read-only over the store
//! maintained by [`crate::proxy::ProxyRepo`].

use jiff::Timestamp;
use spindle_core::{ProxyId, ProxyUri};

use crate::error::RepoResult;

/// Denormalised search-index columns relevant to the core (§3.2 `index`).
/// Language-specific tsvectors and search ranking are out of scope; only
/// the plain descriptive columns are surfaced.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProxyIndexSummary {
    pub classes: Vec<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub coordinates: Option<(f64, f64)>,
    pub modified: Timestamp,
    pub score: f64,
}

/// A structured view of a proxy's `proxy` and `index` rows (§4.8).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProxyItem {
    pub id: ProxyId,
    pub sameas: Vec<String>,
    /// `None` when the proxy has no matching `index` row yet; this is
    /// *not* a not-found condition (§4.8).
    pub index: Option<ProxyIndexSummary>,
}

/// A digital-asset descriptor attached to a proxy (§3.2 `media`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaDescriptor {
    pub uri: String,
    pub class: Option<String>,
    pub media_type: Option<String>,
    pub audience_id: Option<ProxyId>,
}

/// Storage-agnostic read path over the proxy store (C8).
pub trait QueryRepo {
    /// Alias of `locate`; surfacing this as an HTTP redirect is the
    /// caller's concern (§4.8).
    fn lookup(&mut self, external_uri: &str) -> RepoResult<Option<ProxyUri>>;

    fn refs(&mut self, id: ProxyId) -> RepoResult<Vec<String>>;

    /// Returns `Err(RepoError::NotFound)` only when the `proxy` row itself
    /// is missing (§4.8).
    fn fetch_item(&mut self, id: ProxyId) -> RepoResult<ProxyItem>;

    /// Project `membership` for `id`, i.e. the collections this proxy
    /// belongs to.
    fn enumerate_memberships(&mut self, id: ProxyId, limit: Option<u32>) -> RepoResult<Vec<ProxyId>>;

    /// Proxies this proxy's description is "about" (`about` table, §3.2).
    fn about(&mut self, id: ProxyId) -> RepoResult<Vec<ProxyId>>;

    /// Digital-asset descriptors attached to this proxy (`media` table,
    /// §3.2).
    fn media(&mut self, id: ProxyId) -> RepoResult<Vec<MediaDescriptor>>;
}

// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Proxy store contract (C3): the operations a backend must provide so
//! that the correlator (C4) can maintain the proxy/sameas/state/moved
//! relational model under transactional semantics.

use spindle_core::{ChangeSet, ProxyId, ProxyUri};

use crate::error::RepoResult;

/// Outcome of a state-row update (§4.3.3).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StateUpdateOutcome {
    /// No `state` row existed; one was inserted as `DIRTY`.
    Created,
    /// A `state` row existed and was marked `DIRTY`.
    Dirtied,
    /// A `state` row existed and `changed` was `false`; no write happened.
    Unchanged,
}

/// Mint a fresh proxy URI.
///
/// `hint_uri` plays no part in the generated ID; it exists purely so a
/// backend can log provenance ("minted a proxy while processing
/// `hint_uri`"), per §4.3.
#[must_use]
pub fn generate(root: &str, hint_uri: &str) -> ProxyUri {
    let uri = ProxyUri::from_id(root, ProxyId::new());
    tracing::debug!(hint = %hint_uri, proxy = %uri, "minted a new proxy");
    uri
}

/// Storage-agnostic contract for the proxy store (C3).
///
/// Implementations are expected to run [`ProxyRepo::create`] and
/// [`ProxyRepo::migrate`] inside a single RDBMS transaction at
/// consistent-read isolation or stronger (§5); everything else is a single
/// statement and needs no explicit transaction of its own.
pub trait ProxyRepo {
    /// `locate(uri) -> Option<proxy_uri>` (§4.3): single indexed query
    /// `sameas ∋ uri`.
    fn locate(&mut self, external_uri: &str) -> RepoResult<Option<ProxyUri>>;

    /// Ensure a `proxy` row for `id` exists, append `external_uri` to its
    /// `sameas`, and re-point any `triggers`/`audiences`/
    /// `licenses_audiences` rows that referenced `external_uri` by URI
    /// (§4.3).
    fn relate(&mut self, external_uri: &str, id: ProxyId) -> RepoResult<()>;

    /// `refs(proxy_uri) -> Vec<external_uri>` (§4.3): `sameas` unnested.
    fn refs(&mut self, id: ProxyId) -> RepoResult<Vec<String>>;

    /// Merge `from` into `to`: record the redirect in `moved`, union
    /// `sameas`, delete `from`'s `proxy`/`index`/`state` rows, and
    /// re-point every dependent table (§4.3.2). Runs inside the same
    /// transaction as the `create` call that triggered it.
    fn migrate(&mut self, from: ProxyId, to: ProxyId) -> RepoResult<()>;

    /// Idempotent state-row update, applied *after* the enclosing
    /// transaction commits (§4.3.3).
    fn touch_state(&mut self, id: ProxyId, changed: bool) -> RepoResult<StateUpdateOutcome>;

    /// The correlation primitive (§4.3.1): given one or two external URIs,
    /// ensure they share exactly one proxy, applying the tie-break rule
    /// when both already have distinct proxies, and report every touched
    /// proxy into `changeset`. Returns the resulting proxy ID, or `None`
    /// only if the whole call rolled back without touching anything (which
    /// cannot currently happen per the state table in §4.3.1, but the
    /// return type leaves room for a backend that detects a lost race and
    /// asks the caller to retry).
    fn create(
        &mut self,
        root: &str,
        uri1: &str,
        uri2: Option<&str>,
        changeset: &mut ChangeSet,
    ) -> RepoResult<Option<ProxyId>>;
}

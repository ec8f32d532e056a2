// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! SQLite implementation of the proxy store (C3), grounded on the
//! original's `db-correlate.c`: `locate` is an indexed lookup over
//! `proxy_sameas`, `relate` inserts-or-appends and re-points dependent
//! tables, `migrate` folds one proxy's rows into another, and `create` is
//! the §4.3.1 state machine run inside a single transaction.

use diesel::OptionalExtension as _;
use spindle_core::{ChangeFlags, ChangeSet, ProxyId, ProxyUri};
use spindle_repo::proxy::{generate, ProxyRepo, StateUpdateOutcome};

use crate::db::{models::*, schema::*};
use crate::prelude::*;
use crate::util::clock::now_utc_sql;

impl ProxyRepo for Connection<'_> {
    fn locate(&mut self, external_uri: &str) -> RepoResult<Option<ProxyUri>> {
        let root = self.root().to_owned();
        let proxy_id = proxy_sameas::table
            .filter(proxy_sameas::uri.eq(external_uri))
            .select(proxy_sameas::proxy_id)
            .first::<String>(self.as_mut())
            .optional()
            .map_err(repo_error)?;
        Ok(proxy_id
            .and_then(|id| ProxyId::parse(&id))
            .map(|id| ProxyUri::from_id(&root, id)))
    }

    fn relate(&mut self, external_uri: &str, id: ProxyId) -> RepoResult<()> {
        let id_str = id.as_str();

        let exists = diesel::select(diesel::dsl::exists(
            proxy::table.filter(proxy::id.eq(id_str)),
        ))
        .get_result::<bool>(self.as_mut())
        .map_err(repo_error)?;
        if !exists {
            diesel::insert_into(proxy::table)
                .values(NewProxyRecord { id: id_str })
                .execute(self.as_mut())
                .map_err(repo_error)?;
        }

        diesel::insert_into(proxy_sameas::table)
            .values(NewProxySameasRecord {
                proxy_id: id_str,
                uri: external_uri,
            })
            .execute(self.as_mut())
            .map_err(repo_error)?;

        diesel::update(triggers::table.filter(triggers::uri.eq(external_uri)))
            .set(triggers::triggerid.eq(id_str))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        diesel::update(audiences::table.filter(audiences::uri.eq(external_uri)))
            .set(audiences::id.eq(id_str))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        diesel::update(licenses_audiences::table.filter(licenses_audiences::uri.eq(external_uri)))
            .set(licenses_audiences::audienceid.eq(id_str))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        tracing::debug!(%id, uri = %external_uri, "related external uri to proxy");
        Ok(())
    }

    fn refs(&mut self, id: ProxyId) -> RepoResult<Vec<String>> {
        proxy_sameas::table
            .filter(proxy_sameas::proxy_id.eq(id.as_str()))
            .select(proxy_sameas::uri)
            .load(self.as_mut())
            .map_err(repo_error)
    }

    fn migrate(&mut self, from: ProxyId, to: ProxyId) -> RepoResult<()> {
        let from_id = from.as_str();
        let to_id = to.as_str();

        let already_moved = moved::table
            .filter(moved::from_id.eq(from_id))
            .select(moved::from_id)
            .first::<String>(self.as_mut())
            .optional()
            .map_err(repo_error)?
            .is_some();
        if already_moved {
            diesel::update(moved::table.filter(moved::from_id.eq(from_id)))
                .set(moved::to_id.eq(to_id))
                .execute(self.as_mut())
                .map_err(repo_error)?;
        } else {
            diesel::insert_into(moved::table)
                .values((moved::from_id.eq(from_id), moved::to_id.eq(to_id)))
                .execute(self.as_mut())
                .map_err(repo_error)?;
        }

        // Union `sameas`: re-own the old proxy's rows instead of appending
        // an array, the join-table equivalent of the original's
        // `sameas || sameas`.
        diesel::update(proxy_sameas::table.filter(proxy_sameas::proxy_id.eq(from_id)))
            .set(proxy_sameas::proxy_id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        diesel::delete(proxy::table.filter(proxy::id.eq(from_id)))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        diesel::delete(search_index::table.filter(search_index::id.eq(from_id)))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        diesel::update(triggers::table.filter(triggers::triggerid.eq(from_id)))
            .set(triggers::triggerid.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        diesel::update(triggers::table.filter(triggers::id.eq(from_id)))
            .set(triggers::id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        diesel::update(audiences::table.filter(audiences::id.eq(from_id)))
            .set(audiences::id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        diesel::update(licenses_audiences::table.filter(licenses_audiences::id.eq(from_id)))
            .set(licenses_audiences::id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        diesel::update(
            licenses_audiences::table.filter(licenses_audiences::audienceid.eq(from_id)),
        )
        .set(licenses_audiences::audienceid.eq(to_id))
        .execute(self.as_mut())
        .map_err(repo_error)?;

        diesel::update(media::table.filter(media::id.eq(from_id)))
            .set(media::id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        diesel::update(membership::table.filter(membership::id.eq(from_id)))
            .set(membership::id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        diesel::update(membership::table.filter(membership::collection.eq(from_id)))
            .set(membership::collection.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        diesel::update(search_index_media::table.filter(search_index_media::index_id.eq(from_id)))
            .set(search_index_media::index_id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        diesel::update(search_index_media::table.filter(search_index_media::media_id.eq(from_id)))
            .set(search_index_media::media_id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        diesel::update(about::table.filter(about::id.eq(from_id)))
            .set(about::id.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        diesel::update(about::table.filter(about::about.eq(from_id)))
            .set(about::about.eq(to_id))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        self.touch_state(to, true)?;
        diesel::delete(state::table.filter(state::id.eq(from_id)))
            .execute(self.as_mut())
            .map_err(repo_error)?;

        tracing::info!(%from, %to, "migrated proxy references");
        Ok(())
    }

    fn touch_state(&mut self, id: ProxyId, changed: bool) -> RepoResult<StateUpdateOutcome> {
        let id_str = id.as_str();
        let existing = state::table
            .filter(state::id.eq(id_str))
            .select(state::id)
            .first::<String>(self.as_mut())
            .optional()
            .map_err(repo_error)?;

        match existing {
            None => {
                let modified = now_utc_sql();
                let new_row = NewStateRecord {
                    id: id_str,
                    shorthash: i64::from(id.short_hash()),
                    tinyhash: i16::from(id.tiny_hash()),
                    status: "DIRTY",
                    modified: &modified,
                    flags: 0,
                };
                diesel::insert_into(state::table)
                    .values(&new_row)
                    .execute(self.as_mut())
                    .map_err(repo_error)?;
                Ok(StateUpdateOutcome::Created)
            }
            Some(_) if changed => {
                let modified = now_utc_sql();
                let changeset = DirtyStateChangeset {
                    status: "DIRTY",
                    modified: &modified,
                    flags: 0,
                };
                diesel::update(state::table.filter(state::id.eq(id_str)))
                    .set(&changeset)
                    .execute(self.as_mut())
                    .map_err(repo_error)?;
                Ok(StateUpdateOutcome::Dirtied)
            }
            Some(_) => Ok(StateUpdateOutcome::Unchanged),
        }
    }

    fn create(
        &mut self,
        root: &str,
        uri1: &str,
        uri2: Option<&str>,
        changeset: &mut ChangeSet,
    ) -> RepoResult<Option<ProxyId>> {
        let root = root.to_owned();
        let uri1_owned = uri1.to_owned();
        let uri2_owned = uri2.map(str::to_owned);
        let mut touched: Vec<(ProxyUri, ChangeFlags)> = Vec::new();

        let resolved_id = self
            .as_mut()
            .transaction::<_, RepoTransactionError, _>(|raw| {
                let mut conn = Connection::new(raw, root.clone());
                let uri2_ref = uri2_owned.as_deref();

                let u1 = conn.locate(&uri1_owned)?;
                let u2 = match uri2_ref {
                    Some(uri2) => conn.locate(uri2)?,
                    None => None,
                };

                let (proxy, flags) = match (u1, u2) {
                    (Some(p1), Some(p2)) if p1 == p2 => (p1, ChangeFlags::REFRESHED),
                    (Some(p1), None) if uri2_ref.is_none() => (p1, ChangeFlags::REFRESHED),
                    (None, None) => {
                        let p = generate(&root, &uri1_owned);
                        let id = p.id().expect("freshly minted proxy uri parses");
                        conn.relate(&uri1_owned, id)?;
                        if let Some(uri2) = uri2_ref {
                            conn.relate(uri2, id)?;
                        }
                        (p, ChangeFlags::REFRESHED | ChangeFlags::MOVED)
                    }
                    (Some(p1), None) => {
                        let id = p1.id().expect("valid stored proxy id");
                        conn.relate(
                            uri2_ref.expect("uri2 is present whenever u2 was looked up"),
                            id,
                        )?;
                        (p1, ChangeFlags::REFRESHED | ChangeFlags::MOVED)
                    }
                    (None, Some(p2)) => {
                        let id = p2.id().expect("valid stored proxy id");
                        conn.relate(&uri1_owned, id)?;
                        (p2, ChangeFlags::REFRESHED | ChangeFlags::MOVED)
                    }
                    (Some(p1), Some(p2)) => {
                        // Tie-break rule (§4.3.1): uri1's proxy survives.
                        let keep = p1.id().expect("valid stored proxy id");
                        let drop = p2.id().expect("valid stored proxy id");
                        conn.migrate(drop, keep)?;
                        touched.push((p2, ChangeFlags::REFRESHED | ChangeFlags::MOVED));
                        (p1, ChangeFlags::REFRESHED | ChangeFlags::MOVED)
                    }
                };
                touched.push((proxy.clone(), flags));
                Ok(proxy.id())
            })
            .map_err(DieselTransactionError::into_inner)?;

        // The state-row update happens after the transaction has settled
        // (§4.3.1); every case above resolves an id, so this always runs.
        if let Some(id) = resolved_id {
            self.touch_state(id, true)?;
        }
        for (uri, flags) in touched {
            changeset.add_uri(&uri, flags);
        }
        Ok(resolved_id)
    }
}

#[cfg(test)]
mod tests {
    use spindle_core::ChangeSet;

    use super::*;
    use crate::prelude::tests::establish_connection;

    const ROOT: &str = "http://example.com/things";

    #[test]
    fn create_mints_a_fresh_proxy_for_two_unknown_uris() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let mut changeset = ChangeSet::new();

        let id = conn
            .create(ROOT, "http://a.example/1", Some("http://a.example/2"), &mut changeset)
            .unwrap()
            .expect("a proxy id is always resolved");

        assert_eq!(changeset.len(), 1);
        let flags = changeset
            .flags_for(ProxyUri::from_id(ROOT, id).as_str())
            .unwrap();
        assert!(flags.contains(ChangeFlags::MOVED));
        assert!(flags.contains(ChangeFlags::REFRESHED));

        let refs = conn.refs(id).unwrap();
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn create_is_idempotent_for_an_already_correlated_pair() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let mut changeset = ChangeSet::new();
        let first = conn
            .create(ROOT, "http://a.example/1", Some("http://a.example/2"), &mut changeset)
            .unwrap()
            .unwrap();

        let mut changeset2 = ChangeSet::new();
        let second = conn
            .create(ROOT, "http://a.example/1", Some("http://a.example/2"), &mut changeset2)
            .unwrap()
            .unwrap();

        assert_eq!(first, second);
        let flags = changeset2
            .flags_for(ProxyUri::from_id(ROOT, second).as_str())
            .unwrap();
        assert!(flags.contains(ChangeFlags::REFRESHED));
        assert!(!flags.contains(ChangeFlags::MOVED));
    }

    #[test]
    fn create_attaches_a_lone_subject_without_a_second_uri() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let mut changeset = ChangeSet::new();
        let id = conn
            .create(ROOT, "http://a.example/1", None, &mut changeset)
            .unwrap()
            .unwrap();
        assert_eq!(conn.refs(id).unwrap(), vec!["http://a.example/1"]);
    }

    #[test]
    fn create_attaches_the_unknown_side_to_the_existing_proxy() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let mut changeset = ChangeSet::new();
        let first = conn
            .create(ROOT, "http://a.example/1", None, &mut changeset)
            .unwrap()
            .unwrap();

        let mut changeset2 = ChangeSet::new();
        let second = conn
            .create(ROOT, "http://a.example/1", Some("http://a.example/2"), &mut changeset2)
            .unwrap()
            .unwrap();

        assert_eq!(first, second);
        let mut refs = conn.refs(second).unwrap();
        refs.sort();
        assert_eq!(refs, vec!["http://a.example/1", "http://a.example/2"]);
    }

    #[test]
    fn create_migrates_the_losing_proxy_per_the_tie_break_rule() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);

        let mut changeset = ChangeSet::new();
        let p1 = conn
            .create(ROOT, "http://a.example/1", None, &mut changeset)
            .unwrap()
            .unwrap();
        let mut changeset = ChangeSet::new();
        let p2 = conn
            .create(ROOT, "http://a.example/2", None, &mut changeset)
            .unwrap()
            .unwrap();
        assert_ne!(p1, p2);

        let mut changeset = ChangeSet::new();
        let survivor = conn
            .create(ROOT, "http://a.example/1", Some("http://a.example/2"), &mut changeset)
            .unwrap()
            .unwrap();

        // Tie-break: uri1's proxy (p1) survives.
        assert_eq!(survivor, p1);
        assert!(conn.locate("http://a.example/2").unwrap().is_some());
        assert_eq!(
            conn.locate("http://a.example/2").unwrap().unwrap().id(),
            Some(p1)
        );

        let mut refs = conn.refs(p1).unwrap();
        refs.sort();
        assert_eq!(refs, vec!["http://a.example/1", "http://a.example/2"]);
    }

    #[test]
    fn touch_state_transitions_through_created_dirtied_and_unchanged() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let id = ProxyId::new();

        assert_eq!(
            conn.touch_state(id, false).unwrap(),
            StateUpdateOutcome::Created
        );
        assert_eq!(
            conn.touch_state(id, false).unwrap(),
            StateUpdateOutcome::Unchanged
        );
        assert_eq!(
            conn.touch_state(id, true).unwrap(),
            StateUpdateOutcome::Dirtied
        );
    }
}

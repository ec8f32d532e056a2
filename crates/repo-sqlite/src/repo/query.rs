// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The read-only query path (C8), a thin projection over `proxy`,
//! `search_index` and its join tables, `membership`, `about` and `media`.

use diesel::OptionalExtension as _;
use spindle_core::{ProxyId, ProxyUri};
use spindle_repo::query::{MediaDescriptor, ProxyIndexSummary, ProxyItem, QueryRepo};

use crate::db::schema::*;
use crate::prelude::*;
use crate::util::clock::parse_modified;

fn parse_ids(raw: impl IntoIterator<Item = String>) -> Vec<ProxyId> {
    raw.into_iter().filter_map(|s| ProxyId::parse(&s)).collect()
}

impl QueryRepo for Connection<'_> {
    fn lookup(&mut self, external_uri: &str) -> RepoResult<Option<ProxyUri>> {
        spindle_repo::proxy::ProxyRepo::locate(self, external_uri)
    }

    fn refs(&mut self, id: ProxyId) -> RepoResult<Vec<String>> {
        spindle_repo::proxy::ProxyRepo::refs(self, id)
    }

    fn fetch_item(&mut self, id: ProxyId) -> RepoResult<ProxyItem> {
        let id_str = id.as_str();

        let exists = diesel::select(diesel::dsl::exists(
            proxy::table.filter(proxy::id.eq(id_str)),
        ))
        .get_result::<bool>(self.as_mut())
        .map_err(repo_error)?;
        if !exists {
            return Err(RepoError::NotFound);
        }

        let sameas = proxy_sameas::table
            .filter(proxy_sameas::proxy_id.eq(id_str))
            .select(proxy_sameas::uri)
            .load(self.as_mut())
            .map_err(repo_error)?;

        let index_row = search_index::table
            .filter(search_index::id.eq(id_str))
            .select((
                search_index::title,
                search_index::description,
                search_index::latitude,
                search_index::longitude,
                search_index::modified,
                search_index::score,
            ))
            .first::<(
                Option<String>,
                Option<String>,
                Option<f64>,
                Option<f64>,
                String,
                f64,
            )>(self.as_mut())
            .optional()
            .map_err(repo_error)?;

        let index = match index_row {
            None => None,
            Some((title, description, latitude, longitude, modified, score)) => {
                let classes = search_index_classes::table
                    .filter(search_index_classes::index_id.eq(id_str))
                    .select(search_index_classes::class)
                    .load(self.as_mut())
                    .map_err(repo_error)?;
                let coordinates = match (latitude, longitude) {
                    (Some(lat), Some(lon)) => Some((lat, lon)),
                    _ => None,
                };
                Some(ProxyIndexSummary {
                    classes,
                    title,
                    description,
                    coordinates,
                    modified: parse_modified(&modified),
                    score,
                })
            }
        };

        Ok(ProxyItem { id, sameas, index })
    }

    fn enumerate_memberships(&mut self, id: ProxyId, limit: Option<u32>) -> RepoResult<Vec<ProxyId>> {
        let id_str = id.as_str();
        let query = membership::table
            .filter(membership::id.eq(id_str))
            .select(membership::collection)
            .into_boxed();
        let query = match limit {
            Some(limit) => query.limit(i64::from(limit)),
            None => query,
        };
        let rows = query.load::<String>(self.as_mut()).map_err(repo_error)?;
        Ok(parse_ids(rows))
    }

    fn about(&mut self, id: ProxyId) -> RepoResult<Vec<ProxyId>> {
        let rows = about::table
            .filter(about::id.eq(id.as_str()))
            .select(about::about)
            .load::<String>(self.as_mut())
            .map_err(repo_error)?;
        Ok(parse_ids(rows))
    }

    fn media(&mut self, id: ProxyId) -> RepoResult<Vec<MediaDescriptor>> {
        let rows = media::table
            .filter(media::id.eq(id.as_str()))
            .select((
                media::uri,
                media::class,
                media::media_type,
                media::audienceid,
            ))
            .load::<(String, Option<String>, Option<String>, Option<String>)>(self.as_mut())
            .map_err(repo_error)?;

        Ok(rows
            .into_iter()
            .map(|(uri, class, media_type, audienceid)| MediaDescriptor {
                uri,
                class,
                media_type,
                audience_id: audienceid.as_deref().and_then(ProxyId::parse),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use spindle_core::ChangeSet;
    use spindle_repo::proxy::ProxyRepo as _;

    use super::*;
    use crate::prelude::tests::establish_connection;

    const ROOT: &str = "http://example.com/things";

    #[test]
    fn fetch_item_returns_not_found_for_an_unknown_id() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let err = conn.fetch_item(ProxyId::new()).unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[test]
    fn fetch_item_reports_no_index_summary_when_absent() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let mut changeset = ChangeSet::new();
        let id = conn
            .create(ROOT, "http://a.example/1", None, &mut changeset)
            .unwrap()
            .unwrap();

        let item = conn.fetch_item(id).unwrap();
        assert_eq!(item.id, id);
        assert_eq!(item.sameas, vec!["http://a.example/1".to_owned()]);
        assert!(item.index.is_none());
    }

    #[test]
    fn enumerate_memberships_respects_the_limit() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let mut changeset = ChangeSet::new();
        let id = conn
            .create(ROOT, "http://a.example/1", None, &mut changeset)
            .unwrap()
            .unwrap();
        let coll1 = ProxyId::new();
        let coll2 = ProxyId::new();
        diesel::insert_into(membership::table)
            .values(vec![
                (membership::id.eq(id.as_str()), membership::collection.eq(coll1.as_str())),
                (membership::id.eq(id.as_str()), membership::collection.eq(coll2.as_str())),
            ])
            .execute(conn.as_mut())
            .unwrap();

        let all = conn.enumerate_memberships(id, None).unwrap();
        assert_eq!(all.len(), 2);
        let limited = conn.enumerate_memberships(id, Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn about_and_media_project_their_tables() {
        let mut db = establish_connection();
        let mut conn = Connection::new(&mut db, ROOT);
        let mut changeset = ChangeSet::new();
        let id = conn
            .create(ROOT, "http://a.example/1", None, &mut changeset)
            .unwrap()
            .unwrap();
        let other = ProxyId::new();

        diesel::insert_into(about::table)
            .values((about::id.eq(id.as_str()), about::about.eq(other.as_str())))
            .execute(conn.as_mut())
            .unwrap();
        assert_eq!(conn.about(id).unwrap(), vec![other]);

        diesel::insert_into(media::table)
            .values((
                media::id.eq(id.as_str()),
                media::uri.eq("http://a.example/photo.jpg"),
                media::class.eq(Some("http://example.org/class/Image")),
                media::media_type.eq(Some("image/jpeg")),
            ))
            .execute(conn.as_mut())
            .unwrap();
        let media = conn.media(id).unwrap();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].uri, "http://a.example/photo.jpg");
        assert_eq!(media[0].media_type.as_deref(), Some("image/jpeg"));
    }
}

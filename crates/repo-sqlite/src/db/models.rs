// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::schema::*;

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = proxy, primary_key(row_id))]
pub struct ProxyRecord {
    pub row_id: i64,
    pub id: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = proxy)]
pub struct NewProxyRecord<'a> {
    pub id: &'a str,
}

#[derive(Debug, Queryable)]
pub struct ProxySameasRecord {
    pub row_id: i64,
    pub proxy_id: String,
    pub uri: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = proxy_sameas)]
pub struct NewProxySameasRecord<'a> {
    pub proxy_id: &'a str,
    pub uri: &'a str,
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = state, primary_key(id))]
pub struct StateRecord {
    pub id: String,
    pub shorthash: i64,
    pub tinyhash: i16,
    pub status: String,
    pub modified: String,
    pub flags: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = state)]
pub struct NewStateRecord<'a> {
    pub id: &'a str,
    pub shorthash: i64,
    pub tinyhash: i16,
    pub status: &'a str,
    pub modified: &'a str,
    pub flags: i32,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = state)]
pub struct DirtyStateChangeset<'a> {
    pub status: &'a str,
    pub modified: &'a str,
    pub flags: i32,
}

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = moved, primary_key(from_id))]
pub struct MovedRecord {
    pub from_id: String,
    pub to_id: String,
}

#[derive(Debug, Queryable)]
pub struct MediaRecord {
    pub row_id: i64,
    pub id: String,
    pub uri: String,
    pub class: Option<String>,
    pub media_type: Option<String>,
    pub audienceid: Option<String>,
}

#[derive(Debug, Queryable)]
pub struct SearchIndexRecord {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub modified: String,
    pub score: f64,
}

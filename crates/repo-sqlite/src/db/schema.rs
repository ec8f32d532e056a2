// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Diesel table definitions for the proxy store (§3.2). Multi-valued
//! Postgres-array columns of the original schema (`proxy.sameas`,
//! `index.classes`, `index.index_media`) are join tables here; `point`
//! becomes a pair of nullable `REAL` columns. `from`/`to`/`type`/`index`
//! are SQL keywords, so `moved`, `media` and the search-index table use
//! non-reserved column/table names instead.

diesel::table! {
    proxy (row_id) {
        row_id -> BigInt,
        id -> Text,
    }
}

diesel::table! {
    proxy_sameas (row_id) {
        row_id -> BigInt,
        proxy_id -> Text,
        uri -> Text,
    }
}

diesel::table! {
    state (id) {
        id -> Text,
        shorthash -> BigInt,
        tinyhash -> SmallInt,
        status -> Text,
        modified -> Text,
        flags -> Integer,
    }
}

diesel::table! {
    moved (from_id) {
        from_id -> Text,
        to_id -> Text,
    }
}

diesel::table! {
    triggers (row_id) {
        row_id -> BigInt,
        id -> Text,
        uri -> Text,
        triggerid -> Nullable<Text>,
        flags -> Integer,
    }
}

diesel::table! {
    about (id, about) {
        id -> Text,
        about -> Text,
    }
}

diesel::table! {
    media (row_id) {
        row_id -> BigInt,
        id -> Text,
        uri -> Text,
        class -> Nullable<Text>,
        media_type -> Nullable<Text>,
        audienceid -> Nullable<Text>,
    }
}

diesel::table! {
    membership (id, collection) {
        id -> Text,
        collection -> Text,
    }
}

diesel::table! {
    audiences (id) {
        id -> Text,
        uri -> Nullable<Text>,
    }
}

diesel::table! {
    licenses_audiences (row_id) {
        row_id -> BigInt,
        id -> Text,
        uri -> Nullable<Text>,
        audienceid -> Nullable<Text>,
    }
}

diesel::table! {
    search_index (id) {
        id -> Text,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        modified -> Text,
        score -> Double,
    }
}

diesel::table! {
    search_index_classes (row_id) {
        row_id -> BigInt,
        index_id -> Text,
        class -> Text,
    }
}

diesel::table! {
    search_index_media (row_id) {
        row_id -> BigInt,
        index_id -> Text,
        media_id -> Text,
    }
}

diesel::table! {
    _version (ident) {
        ident -> Text,
        version -> BigInt,
    }
}

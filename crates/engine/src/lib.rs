// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![warn(rustdoc::broken_intra_doc_links)]

//! Wires the rule base (C1), the correlator (C4) and the SQLite-backed
//! proxy store together into a single entry point (§2), and exposes the
//! read-only query facade (C8) over the same storage.

mod config;
mod correlator;
mod engine;
mod error;
mod query;

pub use config::{Config, LogConfig, LogFormat, MigrationMode};
pub use engine::{Engine, GraphUpdate};
pub use error::{SpindleError, SpindleResult};

#[cfg(test)]
mod tests {
    use spindle_rdf::memory::MemoryModel;
    use spindle_rdf::{Model as _, Statement, Term};

    use super::*;

    fn write_rulebase() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"(
                match_predicates: [(predicate: "http://www.w3.org/2002/07/owl#sameAs", kind: SameAs)],
                cache_predicates: ["http://purl.org/dc/terms/title"],
            )"#,
        )
        .unwrap();
        file
    }

    fn open_engine() -> (Engine<MemoryModel>, tempfile::NamedTempFile) {
        let rulebase_file = write_rulebase();
        let config = Config {
            root: "http://example.com/things".to_owned(),
            multigraph: false,
            db: ":memory:".to_owned(),
            rulebase: rulebase_file.path().to_path_buf(),
            dumprules: false,
            db_pool_max_size: std::num::NonZeroU32::new(1).unwrap(),
            migrate_schema: MigrationMode::ApplyPending,
            log: LogConfig::default(),
        };
        (Engine::open(config).unwrap(), rulebase_file)
    }

    #[test]
    fn ingest_creates_proxies_and_query_facade_reads_them_back() {
        let (engine, _rulebase_file) = open_engine();

        let mut model = MemoryModel::new();
        model.add_statement(Statement::new(
            Term::resource("http://a.example/1"),
            Term::resource("http://www.w3.org/2002/07/owl#sameAs"),
            Term::resource("http://a.example/2"),
        ));

        let changeset = engine
            .ingest(GraphUpdate {
                uri: "http://a.example/graph".to_owned(),
                old: None,
                new: model,
            })
            .unwrap();
        assert_eq!(changeset.len(), 1);

        let proxy_uri = engine.lookup("http://a.example/1").unwrap().unwrap();
        let item = engine.fetch_item(proxy_uri.id().unwrap()).unwrap();
        let mut sameas = item.sameas.clone();
        sameas.sort();
        assert_eq!(sameas, vec!["http://a.example/1", "http://a.example/2"]);
        assert!(item.index.is_none());
    }

    #[test]
    fn ingest_is_idempotent_across_repeated_graphs() {
        let (engine, _rulebase_file) = open_engine();
        let mut model = MemoryModel::new();
        model.add_statement(Statement::new(
            Term::resource("http://a.example/1"),
            Term::resource("http://www.w3.org/2002/07/owl#sameAs"),
            Term::resource("http://a.example/2"),
        ));

        let first = engine
            .ingest(GraphUpdate {
                uri: "http://a.example/graph".to_owned(),
                old: None,
                new: model.clone(),
            })
            .unwrap();
        let second = engine
            .ingest(GraphUpdate {
                uri: "http://a.example/graph".to_owned(),
                old: Some(model.clone()),
                new: model,
            })
            .unwrap();

        assert_eq!(first.len(), second.len());
    }
}

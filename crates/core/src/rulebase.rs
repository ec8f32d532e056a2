// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Rule base (C1): match predicates, cache predicates, and the opaque
//! class/predicate mapping descriptors consumed by the (out-of-scope)
//! indexer. Loaded once at start-up and read-only afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coref::CorefSet;

/// Hostname/path prefix the built-in `wikipedia` match callback rewrites.
const WIKIPEDIA_PREFIX: &str = "http://en.wikipedia.org/wiki/";
/// Target prefix the `wikipedia` match callback rewrites onto.
const DBPEDIA_PREFIX: &str = "http://dbpedia.org/resource/";

/// The behaviour bound to a match predicate (§4.1). `SameAs` and
/// `Wikipedia` are the two built-in callbacks; there is no extension point
/// for arbitrary callbacks because the core doesn't load plugin code, only
/// configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    SameAs,
    Wikipedia,
}

impl MatchKind {
    /// Apply this callback to `(subject, object)`, adding zero or more
    /// pairs to `set`.
    pub fn apply(self, set: &mut CorefSet, subject: &str, object: &str) {
        match self {
            Self::SameAs => set.insert(subject, Some(object.to_owned())),
            Self::Wikipedia => {
                if let Some(suffix) = object.strip_prefix(WIKIPEDIA_PREFIX) {
                    let mut rewritten = String::with_capacity(DBPEDIA_PREFIX.len() + suffix.len());
                    rewritten.push_str(DBPEDIA_PREFIX);
                    rewritten.push_str(suffix);
                    set.insert(subject, Some(rewritten));
                }
            }
        }
    }
}

/// A single `(predicate_uri, callback)` entry (§4.1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPredicate {
    pub predicate: String,
    pub kind: MatchKind,
}

/// Opaque class-mapping descriptor consumed by the (out-of-scope) search
/// indexer. The core only stores and returns these; it never interprets
/// `matches`, `score` or `prominence` itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMapping {
    pub uri: String,
    #[serde(default)]
    pub matches: Vec<String>,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub prominence: i32,
}

/// Opaque predicate-mapping descriptor, same status as [`ClassMapping`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredicateMapping {
    pub target: String,
    #[serde(default)]
    pub matches: Vec<String>,
    #[serde(default)]
    pub expect_literal: bool,
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub proxy_only: bool,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub prominence: i32,
    #[serde(default)]
    pub inverse: bool,
}

/// The on-disk shape of a rule base file, before finalisation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct RuleBaseConfig {
    #[serde(default)]
    match_predicates: Vec<MatchPredicate>,
    #[serde(default)]
    cache_predicates: Vec<String>,
    #[serde(default)]
    classes: Vec<ClassMapping>,
    #[serde(default)]
    predicates: Vec<PredicateMapping>,
}

/// The finalised, read-only rule base (C1).
#[derive(Clone, Debug, Default)]
pub struct RuleBase {
    match_predicates: Vec<MatchPredicate>,
    /// Lexicographically sorted; load-bearing for the stripper's ordered
    /// scan (§4.1, §4.5).
    cache_predicates: Vec<String>,
    classes: Vec<ClassMapping>,
    predicates: Vec<PredicateMapping>,
}

impl RuleBase {
    /// Load and finalise a rule base from a RON file. Failure here is
    /// fatal at start-up (§4.1, §7).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleBaseError> {
        let text = std::fs::read_to_string(path)?;
        let config: RuleBaseConfig = ron::from_str(&text)?;
        Ok(Self::finalise(config))
    }

    fn finalise(config: RuleBaseConfig) -> Self {
        let RuleBaseConfig {
            match_predicates,
            mut cache_predicates,
            classes,
            predicates,
        } = config;
        cache_predicates.sort_unstable();
        cache_predicates.dedup();
        Self {
            match_predicates,
            cache_predicates,
            classes,
            predicates,
        }
    }

    #[must_use]
    pub fn match_predicates(&self) -> &[MatchPredicate] {
        &self.match_predicates
    }

    /// Lexicographically sorted; the stripper relies on this ordering
    /// (§4.1).
    #[must_use]
    pub fn cache_predicates(&self) -> &[String] {
        &self.cache_predicates
    }

    #[must_use]
    pub fn class_map(&self) -> &[ClassMapping] {
        &self.classes
    }

    #[must_use]
    pub fn predicate_map(&self) -> &[PredicateMapping] {
        &self.predicates
    }

    /// `true` iff `predicate` survives stripping (§4.5).
    #[must_use]
    pub fn is_cache_predicate(&self, predicate: &str) -> bool {
        self.cache_predicates.binary_search_by(|p| p.as_str().cmp(predicate)).is_ok()
    }

    /// Dump the resolved rule base, gated by the `dumprules` config key
    /// (§6.3).
    pub fn dump(&self) {
        tracing::info!(
            match_predicates = self.match_predicates.len(),
            cache_predicates = self.cache_predicates.len(),
            classes = self.classes.len(),
            predicates = self.predicates.len(),
            "resolved rule base"
        );
        for predicate in &self.cache_predicates {
            tracing::debug!(%predicate, "cache predicate");
        }
        for entry in &self.match_predicates {
            tracing::debug!(predicate = %entry.predicate, kind = ?entry.kind, "match predicate");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuleBaseError {
    #[error("failed to read rule base file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rule base: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rulebase() -> RuleBase {
        RuleBase::finalise(RuleBaseConfig {
            match_predicates: vec![
                MatchPredicate {
                    predicate: "http://www.w3.org/2002/07/owl#sameAs".to_owned(),
                    kind: MatchKind::SameAs,
                },
                MatchPredicate {
                    predicate: "http://dbpedia.org/ontology/wikiPageRedirects".to_owned(),
                    kind: MatchKind::Wikipedia,
                },
            ],
            cache_predicates: vec!["http://p/keep".to_owned(), "http://p/also-keep".to_owned()],
            classes: vec![],
            predicates: vec![],
        })
    }

    #[test]
    fn cache_predicates_end_up_sorted() {
        let rb = rulebase();
        assert_eq!(
            rb.cache_predicates(),
            ["http://p/also-keep", "http://p/keep"]
        );
    }

    #[test]
    fn sameas_callback_adds_the_pair_verbatim() {
        let mut set = CorefSet::new();
        MatchKind::SameAs.apply(&mut set, "http://a.example/x", "http://b.example/y");
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.iter().next().unwrap().right.as_deref(),
            Some("http://b.example/y")
        );
    }

    #[test]
    fn wikipedia_callback_rewrites_onto_dbpedia() {
        let mut set = CorefSet::new();
        MatchKind::Wikipedia.apply(
            &mut set,
            "http://a.example/x",
            "http://en.wikipedia.org/wiki/Rust_(programming_language)",
        );
        let pair = set.iter().next().unwrap();
        assert_eq!(
            pair.right.as_deref(),
            Some("http://dbpedia.org/resource/Rust_(programming_language)")
        );
    }

    #[test]
    fn wikipedia_callback_is_a_no_op_for_other_hosts() {
        let mut set = CorefSet::new();
        MatchKind::Wikipedia.apply(&mut set, "http://a.example/x", "http://example.org/other");
        assert!(set.is_empty());
    }
}

// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The stripper (C5): keep only the triples whose predicate survives the
//! rule base's cache-predicate list (§4.5).

use spindle_core::RuleBase;

use crate::model::Model;

/// Filter `model` in place, keeping only statements whose predicate is a
/// resource present in `rulebase.cache_predicates()`. Non-resource
/// predicates are dropped. The cache-predicate list is lexicographically
/// sorted (a rule base invariant, §4.1), so membership is a binary search
/// rather than the original's ordered linear scan; same contract, same
/// result.
pub fn strip_model(model: &mut dyn Model, rulebase: &RuleBase) {
    let kept: Vec<_> = model
        .iter_statements()
        .filter(|stmt| {
            stmt.predicate
                .uri()
                .is_some_and(|predicate| rulebase.is_cache_predicate(predicate))
        })
        .cloned()
        .collect();
    let kept_count = kept.len();
    let dropped = model.len() - kept_count;
    model.replace_all(kept);
    tracing::debug!(kept = kept_count, dropped, "stripped graph");
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use spindle_core::RuleBase;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::memory::MemoryModel;
    use crate::model::{Statement, Term};

    fn rulebase_with_cache_predicates(predicates: &[&str]) -> RuleBase {
        // RuleBase's constructor is private to the core crate; route
        // through its public RON loader using a throwaway temp file so
        // this test exercises the same code path a real rule base does.
        let mut ron = String::from("(match_predicates: [], cache_predicates: [");
        for (i, predicate) in predicates.iter().enumerate() {
            if i > 0 {
                ron.push(',');
            }
            ron.push('"');
            ron.push_str(predicate);
            ron.push('"');
        }
        ron.push_str("], classes: [], predicates: [])");
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ron.as_bytes()).unwrap();
        RuleBase::load(file.path()).unwrap()
    }

    #[test]
    fn keeps_only_statements_whose_predicate_is_cached() {
        let rulebase = rulebase_with_cache_predicates(&["http://p/keep"]);
        let mut model = MemoryModel::new();
        model.add_statement(Statement::new(
            Term::resource("s"),
            Term::resource("http://p/keep"),
            Term::resource("o"),
        ));
        model.add_statement(Statement::new(
            Term::resource("s"),
            Term::resource("http://p/drop"),
            Term::resource("o2"),
        ));
        strip_model(&mut model, &rulebase);
        assert_eq!(model.len(), 1);
        assert_eq!(
            model.iter_statements().next().unwrap().predicate.uri(),
            Some("http://p/keep")
        );
    }

    #[test]
    fn stripping_an_already_stripped_graph_is_a_no_op() {
        let rulebase = rulebase_with_cache_predicates(&["http://p/keep"]);
        let mut model = MemoryModel::new();
        model.add_statement(Statement::new(
            Term::resource("s"),
            Term::resource("http://p/keep"),
            Term::resource("o"),
        ));
        strip_model(&mut model, &rulebase);
        let first_pass: Vec<_> = model.iter_statements().cloned().collect();
        strip_model(&mut model, &rulebase);
        let second_pass: Vec<_> = model.iter_statements().cloned().collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn drops_statements_with_a_literal_predicate() {
        let rulebase = rulebase_with_cache_predicates(&["http://p/keep"]);
        let mut model = MemoryModel::new();
        model.add_statement(Statement::new(
            Term::resource("s"),
            Term::literal("not-a-predicate-uri"),
            Term::resource("o"),
        ));
        strip_model(&mut model, &rulebase);
        assert!(model.is_empty());
    }
}

// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The correlator (C4), grounded on `twine/correlate/coref.c`'s
//! `spindle_coref_extract`: for every configured match predicate, stream
//! the statements asserting it and feed matching resource pairs to the
//! predicate's callback; afterwards, every resource subject in the graph
//! is guaranteed a "lone subject" entry so it still gets a proxy.

use spindle_core::{CorefSet, RuleBase};
use spindle_rdf::{Model, Term};

/// Extract the co-reference set from `model` per the rule base's
/// configured match predicates (§4.4).
#[must_use]
pub fn extract(model: &dyn Model, rulebase: &RuleBase) -> CorefSet {
    let mut set = CorefSet::new();

    for entry in rulebase.match_predicates() {
        let predicate = Term::resource(entry.predicate.clone());
        for statement in model.find(None, Some(&predicate), None) {
            if let (Some(subject), Some(object)) =
                (statement.subject.uri(), statement.object.uri())
            {
                entry.kind.apply(&mut set, subject, object);
            }
        }
    }

    for statement in model.iter_statements() {
        if let Some(subject) = statement.subject.uri() {
            set.insert(subject, None);
        }
    }

    set
}

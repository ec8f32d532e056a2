// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A plain in-memory [`Model`] implementation. Not a general RDF store
//! (that's an explicit Non-goal), just the simplest thing that satisfies
//! the contract, used by the correlator/stripper test suites and usable by
//! a host as-is when it has no other triple store handy.

use crate::model::{Model, Statement, Term};

#[derive(Debug, Clone, Default)]
pub struct MemoryModel {
    statements: Vec<Statement>,
}

impl MemoryModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_statements(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

impl Model for MemoryModel {
    fn iter_statements<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Statement> + 'a> {
        Box::new(self.statements.iter())
    }

    fn find<'a>(
        &'a self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Box<dyn Iterator<Item = &'a Statement> + 'a> {
        Box::new(self.statements.iter().filter(move |stmt| {
            subject.is_none_or(|s| &stmt.subject == s)
                && predicate.is_none_or(|p| &stmt.predicate == p)
                && object.is_none_or(|o| &stmt.object == o)
        }))
    }

    fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    fn replace_all(&mut self, statements: Vec<Statement>) {
        self.statements = statements;
    }

    fn len(&self) -> usize {
        self.statements.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_filters_by_the_provided_pattern_components() {
        let mut model = MemoryModel::new();
        model.add_statement(Statement::new(
            Term::resource("http://a.example/x"),
            Term::resource("http://p/keep"),
            Term::resource("http://b.example/y"),
        ));
        model.add_statement(Statement::new(
            Term::resource("http://a.example/x"),
            Term::resource("http://p/drop"),
            Term::literal("ignored"),
        ));
        let found: Vec<_> = model
            .find(None, Some(&Term::resource("http://p/keep")), None)
            .collect();
        assert_eq!(found.len(), 1);
    }
}

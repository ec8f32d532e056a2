// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The opaque RDF model contract (§6.2). Spindle never picks a concrete
//! triple store or serialisation; it only needs to iterate statements,
//! filter by subject/predicate/object, add a statement to a named graph,
//! and inspect whether a node is a resource or a literal.

/// A single RDF term: either a resource (identified by URI) or a literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Resource(String),
    Literal {
        value: String,
        language: Option<String>,
    },
}

impl Term {
    #[must_use]
    pub fn resource(uri: impl Into<String>) -> Self {
        Self::Resource(uri.into())
    }

    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            language: None,
        }
    }

    #[must_use]
    pub fn literal_with_language(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            language: Some(language.into()),
        }
    }

    #[must_use]
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }

    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        match self {
            Self::Resource(uri) => Some(uri),
            Self::Literal { .. } => None,
        }
    }

    #[must_use]
    pub fn literal_value(&self) -> Option<&str> {
        match self {
            Self::Literal { value, .. } => Some(value),
            Self::Resource(_) => None,
        }
    }

    #[must_use]
    pub fn literal_language(&self) -> Option<&str> {
        match self {
            Self::Literal { language, .. } => language.as_deref(),
            Self::Resource(_) => None,
        }
    }
}

/// A single `(subject, predicate, object)` triple, optionally scoped to a
/// named graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub graph: Option<String>,
}

impl Statement {
    #[must_use]
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph: None,
        }
    }

    #[must_use]
    pub fn in_graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = Some(graph.into());
        self
    }
}

/// Object-safe contract every RDF model implementation must provide
/// (§6.2). Deliberately minimal: iterate, find-by-pattern, add, and
/// wholesale replace (used by the stripper to rewrite a model's store in
/// place).
pub trait Model: std::fmt::Debug {
    fn iter_statements<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Statement> + 'a>;

    fn find<'a>(
        &'a self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Box<dyn Iterator<Item = &'a Statement> + 'a>;

    fn add_statement(&mut self, statement: Statement);

    /// Replace this model's entire store with `statements`. Used by the
    /// stripper (§4.5: "The result replaces the input graph's store").
    fn replace_all(&mut self, statements: Vec<Statement>);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

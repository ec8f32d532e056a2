// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! String-set (C2): an insertion-ordered mapping from proxy URI to a flag
//! bitfield, used as the change-set a correlation call reports to its
//! caller.

use bitflags::bitflags;
use indexmap::IndexMap;

use crate::id::ProxyUri;

bitflags! {
    /// Flags recognised on a change-set entry (§4.2).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ChangeFlags: u8 {
        /// Proxy was newly minted or had references migrated in.
        const MOVED = 0b0001;
        /// Caller-controlled dirty flag.
        const UPDATED = 0b0010;
        /// Proxy touched by correlation even if unchanged.
        const REFRESHED = 0b0100;
        /// Processed by a downstream stage.
        const DONE = 0b1000;
    }
}

/// An insertion-ordered, unique-preserving set of proxy URIs tagged with
/// [`ChangeFlags`]. Adding an already-present key ORs the incoming flags
/// into its existing entry; there is no removal operation (§4.2).
#[derive(Debug, Clone, Default)]
pub struct ChangeSet(IndexMap<String, ChangeFlags>);

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Add `uri` with `flags`, merging into an existing entry if present.
    pub fn add(&mut self, uri: impl Into<String>, flags: ChangeFlags) {
        self.0
            .entry(uri.into())
            .and_modify(|existing| *existing |= flags)
            .or_insert(flags);
    }

    pub fn add_uri(&mut self, uri: &ProxyUri, flags: ChangeFlags) {
        self.add(uri.as_str(), flags);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn flags_for(&self, uri: &str) -> Option<ChangeFlags> {
        self.0.get(uri).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ChangeFlags)> {
        self.0.iter().map(|(uri, flags)| (uri.as_str(), *flags))
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<(String, ChangeFlags)> {
        self.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = (&'a str, ChangeFlags);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, ChangeFlags)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

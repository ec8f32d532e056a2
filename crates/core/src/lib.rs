// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::missing_errors_doc)]

//! Domain types shared by every other Spindle crate: proxy/external
//! identifiers (C7), the ordered change-set and co-reference set (C2), and
//! the rule base (C1). None of this module performs I/O beyond reading a
//! rule base file from disk.

pub mod changeset;
pub mod coref;
pub mod id;
pub mod rulebase;

pub use changeset::{ChangeFlags, ChangeSet};
pub use coref::{CorefPair, CorefSet};
pub use id::{ProxyId, ProxyUri, ProxyUriParseError};
pub use rulebase::{RuleBase, RuleBaseError};

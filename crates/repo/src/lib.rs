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

//! Storage-agnostic repository contracts for the proxy store (C3) and the
//! read-only query API (C8). The actual SQL lives in `spindle-repo-sqlite`;
//! this crate only describes the shape every backend must provide.

mod error;
pub mod proxy;
pub mod query;

pub use error::{OptionalRepoResult, RepoError, RepoResult};

pub mod prelude {
    pub use crate::{
        error::{OptionalRepoResult, RepoError, RepoResult},
        proxy::{ProxyRepo, StateUpdateOutcome},
        query::{MediaDescriptor, ProxyItem, ProxyIndexSummary, QueryRepo},
    };
    pub use spindle_core::{ChangeFlags, ChangeSet, ProxyId, ProxyUri};
}

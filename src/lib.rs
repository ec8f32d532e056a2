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

//! Facade crate that re-exports the Spindle co-reference aggregation engine
//! at the granularity a host application needs, gated by feature flags the
//! same way the workspace's sub-crates are wired together.

pub use spindle_core as core;

#[cfg(feature = "rdf")]
pub use spindle_rdf as rdf;

#[cfg(feature = "repo")]
pub use spindle_repo as repo;

#[cfg(feature = "sqlite")]
pub use spindle_repo_sqlite as repo_sqlite;

#[cfg(feature = "sqlite")]
pub use spindle_storage_sqlite as storage_sqlite;

#[cfg(feature = "engine")]
pub use spindle_engine as engine;

#[cfg(feature = "engine")]
pub use spindle_engine::{Config, Engine, SpindleError};

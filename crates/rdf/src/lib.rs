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

//! The RDF side of the engine: the opaque `Model` contract (§6.2), its
//! in-memory reference implementation, the strip filter (C5) and the
//! bounded graph cache (C6). None of this crate touches the proxy store.

pub mod cache;
pub mod memory;
pub mod model;
pub mod strip;

pub use cache::GraphCache;
pub use model::{Model, Statement, Term};
pub use strip::strip_model;

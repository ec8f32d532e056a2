// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("aborted")]
    Aborted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

pub trait OptionalRepoResult<T> {
    fn optional(self) -> RepoResult<Option<T>>;
}

impl<T> OptionalRepoResult<T> for RepoResult<T> {
    fn optional(self) -> RepoResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(RepoError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

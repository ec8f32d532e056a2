// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The public error surface (§6.5): six variants every lower-layer failure
//! funnels into, the way `aoide-usecases-sqlite::Error` collapses
//! repository/database errors for its own callers.

use spindle_repo::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum SpindleError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("rule base error: {0}")]
    RuleBase(#[from] spindle_core::RuleBaseError),

    #[error("database error: {0}")]
    Db(anyhow::Error),

    #[error("not a valid 32-character proxy id: {0}")]
    InvalidProxyId(String),

    #[error("not a local proxy uri: {0}")]
    InvalidUri(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type SpindleResult<T> = std::result::Result<T, SpindleError>;

impl From<RepoError> for SpindleError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::Db(anyhow::anyhow!("not found")),
            RepoError::Conflict | RepoError::Aborted | RepoError::Other(_) => {
                Self::Db(anyhow::Error::from(err))
            }
        }
    }
}

impl From<diesel::result::Error> for SpindleError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(err.into())
    }
}

impl From<r2d2::Error> for SpindleError {
    fn from(err: r2d2::Error) -> Self {
        Self::Db(err.into())
    }
}

impl From<spindle_storage_sqlite::Error> for SpindleError {
    fn from(err: spindle_storage_sqlite::Error) -> Self {
        Self::Db(err.into())
    }
}

impl From<std::io::Error> for SpindleError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub mod collect_cmd;
pub mod badges_cmd;
pub mod chart_cmd;
pub mod export_cmd;
pub mod show_cmd;

pub mod config;
pub mod core;
pub mod listing;
pub mod report;
pub mod storage;

use thiserror::Error;

use crate::core::schema::RepoId;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid release listing: {0}")]
    InvalidListing(String),
    #[error("stats file belongs to {found}, requested {expected}")]
    RepoMismatch { expected: RepoId, found: RepoId },
    #[error("sample at {sample} predates the last history entry at {last}")]
    SampleOutOfOrder { sample: i64, last: i64 },
    #[error("invalid window configuration: {0}")]
    InvalidWindows(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type StatsResult<T> = Result<T, StatsError>;

//! Batting statistics use-case service.
//!
//! # Responsibility
//! - Register players with an all-zero career record.
//! - Fold submitted sessions into the current player's record.
//! - Serve profile and leaderboard projections with derived metrics.
//!
//! # Invariants
//! - Every write is a whole-record save computed from a fresh read; on any
//!   failure the stored record is left as it was.
//! - Unauthenticated callers and unknown players surface as distinct errors,
//!   never as zero-valued stats.
//! - Counter fields are never edited directly; only sessions grow them.
//!
//! Two concurrent submissions for the same player can race between read and
//! save (last write wins). Callers must serialize submissions per player.

use crate::identity::IdentityProvider;
use crate::model::career::{normalize_username, CareerRecord, UserId};
use crate::model::session::SessionTotals;
use crate::model::validation::ModelValidationError;
use crate::repo::career_repo::{CareerRecordStore, RepoError};
use crate::stats::accumulate::merge;
use crate::stats::metrics::DerivedMetrics;
use crate::stats::ranking::{rank, RankedEntry, SortKey};
use crate::stats::StatsError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Leaderboard size used when the caller passes no limit.
pub const LEADERBOARD_DEFAULT_LIMIT: u32 = 100;
/// Upper bound for one leaderboard page.
pub const LEADERBOARD_LIMIT_MAX: u32 = 1000;

/// Errors from stats service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// No signed-in user.
    Unauthenticated,
    /// Signed-in user has no career record yet.
    RecordNotFound(UserId),
    /// Registration for a user id that already has a record.
    AlreadyRegistered(UserId),
    /// Input rejected before any accumulation or write.
    InvalidInput(ModelValidationError),
    /// Session would overflow a counter.
    Stats(StatsError),
    /// Record store failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "no authenticated user"),
            Self::RecordNotFound(id) => write!(f, "no career record for user {id}"),
            Self::AlreadyRegistered(id) => write!(f, "user {id} is already registered"),
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::Stats(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Stats(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<StatsError> for ServiceError {
    fn from(value: StatsError) -> Self {
        match value {
            StatsError::Invalid(err) => Self::InvalidInput(err),
            other => Self::Stats(other),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::RecordNotFound(id),
            RepoError::AlreadyExists(id) => Self::AlreadyRegistered(id),
            RepoError::Validation(err) => Self::InvalidInput(err),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Career record plus its derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub record: CareerRecord,
    pub metrics: DerivedMetrics,
}

impl PlayerProfile {
    fn from_record(record: CareerRecord) -> Self {
        let metrics = DerivedMetrics::from_record(&record);
        Self { record, metrics }
    }
}

/// Stats service facade over a record store and an identity provider.
pub struct StatsService<R: CareerRecordStore, I: IdentityProvider> {
    repo: R,
    identity: I,
}

impl<R: CareerRecordStore, I: IdentityProvider> StatsService<R, I> {
    /// Creates a service from its two collaborators.
    pub fn new(repo: R, identity: I) -> Self {
        Self { repo, identity }
    }

    /// Creates the all-zero career record for the signed-in user.
    pub fn register(&self, username: &str) -> ServiceResult<PlayerProfile> {
        let user_id = self.require_user()?;
        let record = CareerRecord::new(user_id, username)?;
        self.repo.create_career_record(&record)?;

        info!("event=player_register module=service status=ok");
        Ok(PlayerProfile::from_record(record))
    }

    /// Returns the signed-in user's record and derived metrics.
    pub fn profile(&self) -> ServiceResult<PlayerProfile> {
        let user_id = self.require_user()?;
        let record = self.load_existing(user_id)?;
        Ok(PlayerProfile::from_record(record))
    }

    /// Folds one session into the signed-in user's career record.
    ///
    /// # Contract
    /// - `games` grows by exactly one per accepted session.
    /// - Sessions containing a `none` outcome are rejected before any read.
    /// - Returns the saved record; on error nothing was written.
    pub fn submit_session(&self, session: &SessionTotals) -> ServiceResult<PlayerProfile> {
        let user_id = self.require_user()?;
        session.validate_for_submission()?;

        let prior = self.load_existing(user_id)?;
        let merged = merge(&prior, session)?;
        if let Err(err) = self.repo.save_career_record(user_id, &merged) {
            warn!(
                "event=session_submit module=service status=error error_code=save_failed error={}",
                err
            );
            return Err(err.into());
        }

        info!(
            "event=session_submit module=service status=ok events={} games={}",
            session.at_bat_events().len(),
            merged.games
        );
        Ok(PlayerProfile::from_record(merged))
    }

    /// Changes the signed-in user's display name. Counters are untouched.
    pub fn rename(&self, username: &str) -> ServiceResult<PlayerProfile> {
        let user_id = self.require_user()?;
        let username = normalize_username(username)?;

        let mut record = self.load_existing(user_id)?;
        record.username = username;
        self.repo.save_career_record(user_id, &record)?;

        info!("event=player_rename module=service status=ok");
        Ok(PlayerProfile::from_record(record))
    }

    /// Ranks all players by `key`. Does not require a signed-in user.
    ///
    /// `limit` is normalized by `normalize_leaderboard_limit`.
    pub fn leaderboard(&self, key: SortKey, limit: Option<u32>) -> ServiceResult<Vec<RankedEntry>> {
        let applied_limit = normalize_leaderboard_limit(limit);
        let records = self.repo.list_all_career_records()?;
        let total = records.len();
        let ranked = rank(records, key, Some(applied_limit as usize));

        info!(
            "event=leaderboard module=service status=ok key={} total={} returned={}",
            key,
            total,
            ranked.len()
        );
        Ok(ranked)
    }

    fn require_user(&self) -> ServiceResult<UserId> {
        self.identity
            .current_user_id()
            .ok_or(ServiceError::Unauthenticated)
    }

    fn load_existing(&self, user_id: UserId) -> ServiceResult<CareerRecord> {
        self.repo
            .load_career_record(user_id)?
            .ok_or(ServiceError::RecordNotFound(user_id))
    }
}

/// Normalizes a requested leaderboard size.
///
/// `None` and `Some(0)` fall back to the default; larger values are capped.
pub fn normalize_leaderboard_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => LEADERBOARD_DEFAULT_LIMIT,
        Some(value) if value > LEADERBOARD_LIMIT_MAX => LEADERBOARD_LIMIT_MAX,
        Some(value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_leaderboard_limit, LEADERBOARD_DEFAULT_LIMIT, LEADERBOARD_LIMIT_MAX};

    #[test]
    fn leaderboard_limit_defaults_and_caps() {
        assert_eq!(normalize_leaderboard_limit(None), LEADERBOARD_DEFAULT_LIMIT);
        assert_eq!(normalize_leaderboard_limit(Some(0)), LEADERBOARD_DEFAULT_LIMIT);
        assert_eq!(normalize_leaderboard_limit(Some(5)), 5);
        assert_eq!(
            normalize_leaderboard_limit(Some(LEADERBOARD_LIMIT_MAX + 1)),
            LEADERBOARD_LIMIT_MAX
        );
    }
}

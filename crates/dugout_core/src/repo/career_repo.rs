//! Career record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist exactly one `CareerRecord` per user id.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Writes validate the record before touching SQL.
//! - Saves replace the whole record in one statement; there are no partial
//!   patches, so a failed save leaves the stored record unchanged.
//! - Reads reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::career::{CareerRecord, CounterField, UserId};
use crate::model::validation::ModelValidationError;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CAREER_SELECT_SQL: &str = "SELECT
    id,
    username,
    games,
    atbat,
    four_ball,
    dead_ball,
    sacrifice,
    sacrifice_fly,
    stolen_base,
    caught_stealing,
    single,
    double,
    triple,
    homurun,
    k,
    rbi
FROM career_records";

pub type RepoResult<T> = Result<T, RepoError>;

/// Record store error for career persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound(UserId),
    AlreadyExists(UserId),
    /// `save_career_record` was called with a record owned by another id.
    IdMismatch { expected: UserId, actual: UserId },
    /// Connection schema is missing or older than this binary expects.
    SchemaNotReady { found: u32, expected: u32 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "career record not found: {id}"),
            Self::AlreadyExists(id) => write!(f, "career record already exists: {id}"),
            Self::IdMismatch { expected, actual } => write!(
                f,
                "career record id {actual} does not match target id {expected}"
            ),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "connection schema version {found} is not ready; expected {expected}"
            ),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted career record data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store interface consumed by the stats service.
pub trait CareerRecordStore {
    /// Inserts a new record; fails with `AlreadyExists` for a taken id.
    fn create_career_record(&self, record: &CareerRecord) -> RepoResult<UserId>;
    /// Loads the record for `id`, or `None` when the player is unknown.
    fn load_career_record(&self, id: UserId) -> RepoResult<Option<CareerRecord>>;
    /// Replaces the complete stored record for `id`.
    fn save_career_record(&self, id: UserId, record: &CareerRecord) -> RepoResult<()>;
    /// Lists every record ordered by `username ASC, id ASC`.
    fn list_all_career_records(&self) -> RepoResult<Vec<CareerRecord>>;
}

impl<T: CareerRecordStore + ?Sized> CareerRecordStore for &T {
    fn create_career_record(&self, record: &CareerRecord) -> RepoResult<UserId> {
        (**self).create_career_record(record)
    }

    fn load_career_record(&self, id: UserId) -> RepoResult<Option<CareerRecord>> {
        (**self).load_career_record(id)
    }

    fn save_career_record(&self, id: UserId, record: &CareerRecord) -> RepoResult<()> {
        (**self).save_career_record(id, record)
    }

    fn list_all_career_records(&self) -> RepoResult<Vec<CareerRecord>> {
        (**self).list_all_career_records()
    }
}

/// SQLite-backed career record store.
pub struct SqliteCareerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCareerRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `SchemaNotReady` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let found = current_version(conn)?;
        let expected = latest_version();
        if found != expected {
            return Err(RepoError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }
}

impl CareerRecordStore for SqliteCareerRepository<'_> {
    fn create_career_record(&self, record: &CareerRecord) -> RepoResult<UserId> {
        record.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO career_records (
                id,
                username,
                games,
                atbat,
                four_ball,
                dead_ball,
                sacrifice,
                sacrifice_fly,
                stolen_base,
                caught_stealing,
                single,
                double,
                triple,
                homurun,
                k,
                rbi
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16);",
            params![
                record.id.to_string(),
                record.username.as_str(),
                record.games,
                record.atbat,
                record.four_ball,
                record.dead_ball,
                record.sacrifice,
                record.sacrifice_fly,
                record.stolen_base,
                record.caught_stealing,
                record.single,
                record.double,
                record.triple,
                record.homurun,
                record.k,
                record.rbi,
            ],
        );

        match inserted {
            Ok(_) => Ok(record.id),
            Err(rusqlite::Error::SqliteFailure(err, message))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                if self.exists(record.id)? {
                    Err(RepoError::AlreadyExists(record.id))
                } else {
                    Err(rusqlite::Error::SqliteFailure(err, message).into())
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    fn load_career_record(&self, id: UserId) -> RepoResult<Option<CareerRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAREER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_career_row(row)?));
        }

        Ok(None)
    }

    fn save_career_record(&self, id: UserId, record: &CareerRecord) -> RepoResult<()> {
        if record.id != id {
            return Err(RepoError::IdMismatch {
                expected: id,
                actual: record.id,
            });
        }
        record.validate()?;

        let changed = self.conn.execute(
            "UPDATE career_records
             SET
                username = ?2,
                games = ?3,
                atbat = ?4,
                four_ball = ?5,
                dead_ball = ?6,
                sacrifice = ?7,
                sacrifice_fly = ?8,
                stolen_base = ?9,
                caught_stealing = ?10,
                single = ?11,
                double = ?12,
                triple = ?13,
                homurun = ?14,
                k = ?15,
                rbi = ?16
             WHERE id = ?1;",
            params![
                id.to_string(),
                record.username.as_str(),
                record.games,
                record.atbat,
                record.four_ball,
                record.dead_ball,
                record.sacrifice,
                record.sacrifice_fly,
                record.stolen_base,
                record.caught_stealing,
                record.single,
                record.double,
                record.triple,
                record.homurun,
                record.k,
                record.rbi,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn list_all_career_records(&self) -> RepoResult<Vec<CareerRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAREER_SELECT_SQL} ORDER BY username ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_career_row(row)?);
        }

        Ok(records)
    }
}

impl SqliteCareerRepository<'_> {
    fn exists(&self, id: UserId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM career_records WHERE id = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_career_row(row: &Row<'_>) -> RepoResult<CareerRecord> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid id value `{id_text}` in career_records.id"))
    })?;

    let mut record = CareerRecord {
        id,
        username: row.get("username")?,
        games: 0,
        atbat: 0,
        four_ball: 0,
        dead_ball: 0,
        sacrifice: 0,
        sacrifice_fly: 0,
        stolen_base: 0,
        caught_stealing: 0,
        single: 0,
        double: 0,
        triple: 0,
        homurun: 0,
        k: 0,
        rbi: 0,
    };

    for field in CounterField::ALL {
        let column = field.as_str();
        let value: i64 = row.get(column)?;
        *record.counter_mut(field) = u32::try_from(value).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid counter value `{value}` in career_records.{column}"
            ))
        })?;
    }

    record.validate()?;
    Ok(record)
}

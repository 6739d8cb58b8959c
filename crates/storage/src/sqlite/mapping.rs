use std::collections::BTreeSet;

use course_core::model::{
    Certificate, LessonId, ModuleId, PhaseId, UserId, UserProfile, UserProgress,
};
use serde::{Serialize, de::DeserializeOwned};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(ser)
}

fn from_json<T: DeserializeOwned>(field: &'static str, raw: &str) -> Result<T, StorageError> {
    serde_json::from_str(raw)
        .map_err(|e| StorageError::Serialization(format!("invalid {field}: {e}")))
}

pub(crate) fn u64_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_profile_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserProfile, StorageError> {
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    let lessons: BTreeSet<LessonId> = from_json(
        "completed_lessons",
        &row.try_get::<String, _>("completed_lessons").map_err(ser)?,
    )?;
    let modules: BTreeSet<ModuleId> = from_json(
        "completed_modules",
        &row.try_get::<String, _>("completed_modules").map_err(ser)?,
    )?;
    let phases: BTreeSet<PhaseId> = from_json(
        "completed_phases",
        &row.try_get::<String, _>("completed_phases").map_err(ser)?,
    )?;
    let certificates: Vec<Certificate> = from_json(
        "certificates",
        &row.try_get::<String, _>("certificates").map_err(ser)?,
    )?;

    Ok(UserProfile::from_persisted(
        UserId::new(user_id),
        lessons,
        modules,
        phases,
        i64_to_u32("points", row.try_get("points").map_err(ser)?)?,
        certificates,
        i64_to_u64("version", row.try_get("version").map_err(ser)?)?,
    ))
}

pub(crate) fn map_progress_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<UserProgress, StorageError> {
    Ok(UserProgress {
        user_id: UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?),
        lesson_id: LessonId::new(row.try_get::<String, _>("lesson_id").map_err(ser)?),
        module_id: ModuleId::new(row.try_get::<String, _>("module_id").map_err(ser)?),
        phase_id: PhaseId::new(row.try_get::<String, _>("phase_id").map_err(ser)?),
        completed_at: row.try_get("completed_at").map_err(ser)?,
        time_spent_minutes: i64_to_u32(
            "time_spent_minutes",
            row.try_get("time_spent_minutes").map_err(ser)?,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_sets_are_sorted_arrays() {
        let set: BTreeSet<LessonId> = ["b", "a"].into_iter().map(LessonId::new).collect();
        assert_eq!(to_json(&set).unwrap(), r#"["a","b"]"#);
        let back: BTreeSet<LessonId> = from_json("completed_lessons", r#"["a","b"]"#).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn bad_json_names_the_field() {
        let err = from_json::<Vec<Certificate>>("certificates", "{").unwrap_err();
        assert!(err.to_string().contains("certificates"));
    }

    #[test]
    fn negative_counters_are_rejected() {
        assert!(i64_to_u64("version", -1).is_err());
        assert!(i64_to_u32("points", i64::from(u32::MAX) + 1).is_err());
        assert_eq!(u64_to_i64("version", 7).unwrap(), 7);
    }
}

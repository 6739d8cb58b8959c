use chrono::Utc;
use course_core::model::{UserId, UserProfile, UserProgress};
use tracing::debug;

use super::SqliteRepository;
use super::mapping::{conn, map_profile_row, map_progress_row, to_json, u64_to_i64};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, completed_lessons, completed_modules, completed_phases,
                   points, certificates, version
            FROM user_profiles
            WHERE user_id = ?1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_profile_row).transpose()
    }

    async fn get_progress(&self, user_id: &UserId) -> Result<Vec<UserProgress>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT user_id, lesson_id, module_id, phase_id, completed_at, time_spent_minutes
            FROM lesson_completions
            WHERE user_id = ?1
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_progress_row).collect()
    }

    async fn commit_completion(
        &self,
        event: &UserProgress,
        profile: &UserProfile,
        expected_version: u64,
    ) -> Result<(), StorageError> {
        if profile.user_id() != &event.user_id {
            return Err(StorageError::Serialization(
                "event and profile belong to different users".into(),
            ));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let lessons = to_json(profile.completed_lessons())?;
        let modules = to_json(profile.completed_modules())?;
        let phases = to_json(profile.completed_phases())?;
        let certificates = to_json(profile.certificates())?;
        let points = i64::from(profile.points());
        let version = u64_to_i64("version", profile.version())?;

        // A learner without a stored row is at version 0.
        let profile_rows = if expected_version == 0 {
            sqlx::query(
                r"
                INSERT INTO user_profiles (
                    user_id, completed_lessons, completed_modules, completed_phases,
                    points, certificates, version, updated_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(user_id) DO NOTHING
                ",
            )
            .bind(profile.user_id().as_str())
            .bind(&lessons)
            .bind(&modules)
            .bind(&phases)
            .bind(points)
            .bind(&certificates)
            .bind(version)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(conn)?
            .rows_affected()
        } else {
            sqlx::query(
                r"
                UPDATE user_profiles
                SET completed_lessons = ?2,
                    completed_modules = ?3,
                    completed_phases = ?4,
                    points = ?5,
                    certificates = ?6,
                    version = ?7,
                    updated_at = ?8
                WHERE user_id = ?1 AND version = ?9
                ",
            )
            .bind(profile.user_id().as_str())
            .bind(&lessons)
            .bind(&modules)
            .bind(&phases)
            .bind(points)
            .bind(&certificates)
            .bind(version)
            .bind(now)
            .bind(u64_to_i64("expected_version", expected_version)?)
            .execute(&mut *tx)
            .await
            .map_err(conn)?
            .rows_affected()
        };

        if profile_rows == 0 {
            debug!(user = %event.user_id, expected_version, "profile version moved");
            tx.rollback().await.map_err(conn)?;
            return Err(StorageError::Conflict);
        }

        let event_rows = sqlx::query(
            r"
            INSERT INTO lesson_completions (
                user_id, lesson_id, module_id, phase_id, completed_at, time_spent_minutes
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(user_id, lesson_id) DO NOTHING
            ",
        )
        .bind(event.user_id.as_str())
        .bind(event.lesson_id.as_str())
        .bind(event.module_id.as_str())
        .bind(event.phase_id.as_str())
        .bind(event.completed_at)
        .bind(i64::from(event.time_spent_minutes))
        .execute(&mut *tx)
        .await
        .map_err(conn)?
        .rows_affected();

        if event_rows == 0 {
            debug!(user = %event.user_id, lesson = %event.lesson_id, "completion already stored");
            tx.rollback().await.map_err(conn)?;
            return Err(StorageError::Conflict);
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}

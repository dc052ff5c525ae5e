// src/db/log_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::log::{LogAction, LogEntry, LogPatch, NewLogEntry},
};

#[derive(Clone)]
pub struct LogRepository {
    pool: PgPool,
}

impl LogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Mais recentes primeiro
    pub async fn list_all(&self) -> Result<Vec<LogEntry>, AppError> {
        let logs = sqlx::query_as::<_, LogEntry>(
            "SELECT * FROM logs ORDER BY logged_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    pub async fn list_recent(&self, limit: i64) -> Result<Vec<LogEntry>, AppError> {
        let logs = sqlx::query_as::<_, LogEntry>(
            "SELECT * FROM logs ORDER BY logged_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    pub async fn list_by_tank(&self, tank_id: &str) -> Result<Vec<LogEntry>, AppError> {
        let logs = sqlx::query_as::<_, LogEntry>(
            "SELECT * FROM logs WHERE tank_id = $1 ORDER BY logged_at DESC, id DESC",
        )
        .bind(tank_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    pub async fn count_action_since(
        &self,
        action: LogAction,
        since: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM logs WHERE action = $1 AND logged_at >= $2",
        )
        .bind(action)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn insert<'e, E>(&self, executor: E, entry: &NewLogEntry) -> Result<LogEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let log = sqlx::query_as::<_, LogEntry>(
            r#"
            INSERT INTO logs (
                logged_at, tank_id, action, zone, slot, user_id, content,
                weight, total_weight, head_weight, empty_weight, remark
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(entry.logged_at)
        .bind(&entry.tank_id)
        .bind(entry.action)
        .bind(&entry.zone)
        .bind(&entry.slot)
        .bind(&entry.user_id)
        .bind(&entry.content)
        .bind(entry.weight)
        .bind(entry.total_weight)
        .bind(entry.head_weight)
        .bind(entry.empty_weight)
        .bind(&entry.remark)
        .fetch_one(executor)
        .await?;
        Ok(log)
    }

    // Edição administrativa: campos None ficam como estão
    pub async fn update(&self, id: i64, patch: &LogPatch) -> Result<Option<LogEntry>, AppError> {
        let log = sqlx::query_as::<_, LogEntry>(
            r#"
            UPDATE logs SET
                logged_at    = COALESCE($2, logged_at),
                action       = COALESCE($3, action),
                zone         = COALESCE($4, zone),
                slot         = COALESCE($5, slot),
                content      = COALESCE($6, content),
                weight       = COALESCE($7, weight),
                total_weight = COALESCE($8, total_weight),
                head_weight  = COALESCE($9, head_weight),
                empty_weight = COALESCE($10, empty_weight),
                remark       = COALESCE($11, remark)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.logged_at)
        .bind(patch.action)
        .bind(&patch.zone)
        .bind(&patch.slot)
        .bind(&patch.content)
        .bind(patch.weight)
        .bind(patch.total_weight)
        .bind(patch.head_weight)
        .bind(patch.empty_weight)
        .bind(&patch.remark)
        .fetch_optional(&self.pool)
        .await?;
        Ok(log)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

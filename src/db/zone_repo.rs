// src/db/zone_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::zone::Zone};

#[derive(Clone)]
pub struct ZoneRepository {
    pool: PgPool,
}

impl ZoneRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura (pool principal)
    // ---

    pub async fn list_all(&self) -> Result<Vec<Zone>, AppError> {
        let zones = sqlx::query_as::<_, Zone>("SELECT * FROM zones ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(zones)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Zone>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let zone = sqlx::query_as::<_, Zone>("SELECT * FROM zones WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(zone)
    }

    // ---
    // Escrita (aceita transação)
    // ---

    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
        capacity: i32,
    ) -> Result<Zone, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let zone = sqlx::query_as::<_, Zone>(
            r#"
            INSERT INTO zones (id, name, capacity)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                capacity = EXCLUDED.capacity,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(capacity)
        .fetch_one(executor)
        .await?;
        Ok(zone)
    }

    // Não verifica se ainda há tanques na zona
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM zones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

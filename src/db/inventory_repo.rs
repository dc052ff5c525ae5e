// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::inventory::Tank};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---
    // Funções de leitura são simples e podem usar a pool principal.

    pub async fn list_all(&self) -> Result<Vec<Tank>, AppError> {
        let tanks = sqlx::query_as::<_, Tank>("SELECT * FROM inventory ORDER BY arrived_at ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(tanks)
    }

    pub async fn list_by_zone(&self, zone_id: &str) -> Result<Vec<Tank>, AppError> {
        let tanks = sqlx::query_as::<_, Tank>(
            "SELECT * FROM inventory WHERE zone_id = $1 ORDER BY arrived_at ASC, id ASC",
        )
        .bind(zone_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tanks)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Tank>, AppError> {
        let tank = sqlx::query_as::<_, Tank>("SELECT * FROM inventory WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tank)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---
    // Estas usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    /// Lê e trava a linha do tanque até o fim da transação.
    pub async fn find_for_update<'e, E>(&self, executor: E, id: &str) -> Result<Option<Tank>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tank = sqlx::query_as::<_, Tank>("SELECT * FROM inventory WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(tank)
    }

    /// Quantos tanques estão na zona, sem contar `tank_id`.
    pub async fn count_in_zone_excluding<'e, E>(
        &self,
        executor: E,
        zone_id: &str,
        tank_id: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inventory WHERE zone_id = $1 AND id <> $2",
        )
        .bind(zone_id)
        .bind(tank_id)
        .fetch_one(executor)
        .await?;
        Ok(total)
    }

    /// Insere ou substitui a linha inteira do tanque.
    pub async fn upsert<'e, E>(&self, executor: E, tank: &Tank) -> Result<Tank, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let saved = sqlx::query_as::<_, Tank>(
            r#"
            INSERT INTO inventory (id, content, zone_id, slot, weight, remark, arrived_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id)
            DO UPDATE SET
                content = EXCLUDED.content,
                zone_id = EXCLUDED.zone_id,
                slot = EXCLUDED.slot,
                weight = EXCLUDED.weight,
                remark = EXCLUDED.remark,
                arrived_at = EXCLUDED.arrived_at
            RETURNING *
            "#,
        )
        .bind(&tank.id)
        .bind(&tank.content)
        .bind(&tank.zone_id)
        .bind(&tank.slot)
        .bind(tank.weight)
        .bind(&tank.remark)
        .bind(tank.arrived_at)
        .fetch_one(executor)
        .await?;
        Ok(saved)
    }

    /// Atualiza só conteúdo, peso e observação (manutenção do cadastro).
    pub async fn update_measurement<'e, E>(
        &self,
        executor: E,
        id: &str,
        content: &str,
        weight: Decimal,
        remark: &str,
    ) -> Result<Tank, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tank = sqlx::query_as::<_, Tank>(
            r#"
            UPDATE inventory
            SET content = $2, weight = $3, remark = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(weight)
        .bind(remark)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::TankNotFound(id.to_string()))?;
        Ok(tank)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

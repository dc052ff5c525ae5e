use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::inventory::RegistryItem};

// Tabela 'registry': tara e últimas pesagens de cada tanque
#[derive(Clone)]
pub struct RegistryRepository {
    pool: PgPool,
}

impl RegistryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<RegistryItem>, AppError> {
        let items = sqlx::query_as::<_, RegistryItem>("SELECT * FROM registry ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<RegistryItem>, AppError> {
        let item = sqlx::query_as::<_, RegistryItem>("SELECT * FROM registry WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        id: &str,
        empty_weight: Option<Decimal>,
        content: &str,
        last_total: Option<Decimal>,
        last_head: Option<Decimal>,
    ) -> Result<RegistryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, RegistryItem>(
            r#"
            INSERT INTO registry (id, empty_weight, content, last_total, last_head)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id)
            DO UPDATE SET
                empty_weight = EXCLUDED.empty_weight,
                content = EXCLUDED.content,
                last_total = EXCLUDED.last_total,
                last_head = EXCLUDED.last_head,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(empty_weight)
        .bind(content)
        .bind(last_total)
        .bind(last_head)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }
}

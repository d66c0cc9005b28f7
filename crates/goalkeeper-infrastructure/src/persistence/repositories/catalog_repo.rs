use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use goalkeeper_domain::shared::{AccessoryId, DomainError, MascotId};
use goalkeeper_domain::shop::{Accessory, AccessorySlot, CatalogRepository, Mascot};

pub(crate) const MASCOT_COLUMNS: &str =
    "m.id, m.name, m.species, m.description, m.image_url, m.locked_image_url, m.price, m.slot_type";

pub(crate) const ACCESSORY_COLUMNS: &str = "a.id, a.name, a.slot, a.image_url, a.price";

#[derive(FromRow)]
pub(crate) struct MascotRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) species: String,
    pub(crate) description: String,
    pub(crate) image_url: String,
    pub(crate) locked_image_url: Option<String>,
    pub(crate) price: i64,
    pub(crate) slot_type: String,
}

impl MascotRow {
    pub(crate) fn into_mascot(self) -> Mascot {
        Mascot::restore(
            MascotId::from_string(&self.id),
            self.name,
            self.species,
            self.description,
            self.image_url,
            self.locked_image_url,
            self.price,
            self.slot_type,
        )
    }
}

#[derive(FromRow)]
pub(crate) struct AccessoryRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) slot: String,
    pub(crate) image_url: String,
    pub(crate) price: i64,
}

impl AccessoryRow {
    pub(crate) fn into_accessory(self) -> Result<Accessory, DomainError> {
        let slot: AccessorySlot = self.slot.parse().map_err(|_| {
            DomainError::DataIntegrity(format!("Unknown stored accessory slot: {}", self.slot))
        })?;

        Ok(Accessory::restore(
            AccessoryId::from_string(&self.id),
            self.name,
            slot,
            self.image_url,
            self.price,
        ))
    }
}

pub struct SqliteCatalogRepository {
    base: SqliteRepositoryBase,
}

impl SqliteCatalogRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn list_mascots(&self) -> Result<Vec<Mascot>, DomainError> {
        let query = format!("SELECT {MASCOT_COLUMNS} FROM mascots m ORDER BY m.rowid ASC");

        let rows: Vec<MascotRow> = self
            .base
            .fetch_all(sqlx::query_as(&query), "List mascots")
            .await?;

        Ok(rows.into_iter().map(MascotRow::into_mascot).collect())
    }

    async fn list_accessories(&self) -> Result<Vec<Accessory>, DomainError> {
        let query = format!("SELECT {ACCESSORY_COLUMNS} FROM accessories a ORDER BY a.rowid ASC");

        let rows: Vec<AccessoryRow> = self
            .base
            .fetch_all(sqlx::query_as(&query), "List accessories")
            .await?;

        rows.into_iter().map(AccessoryRow::into_accessory).collect()
    }

    async fn find_mascot(&self, id: &MascotId) -> Result<Option<Mascot>, DomainError> {
        let query = format!("SELECT {MASCOT_COLUMNS} FROM mascots m WHERE m.id = ?1");

        let row: Option<MascotRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(id.as_str()), "Find mascot")
            .await?;

        Ok(row.map(MascotRow::into_mascot))
    }

    async fn find_accessory(&self, id: &AccessoryId) -> Result<Option<Accessory>, DomainError> {
        let query = format!("SELECT {ACCESSORY_COLUMNS} FROM accessories a WHERE a.id = ?1");

        let row: Option<AccessoryRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(id.as_str()), "Find accessory")
            .await?;

        row.map(AccessoryRow::into_accessory).transpose()
    }

    async fn find_mascot_by_name(&self, name: &str) -> Result<Option<Mascot>, DomainError> {
        let query = format!("SELECT {MASCOT_COLUMNS} FROM mascots m WHERE m.name = ?1");

        let row: Option<MascotRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(name), "Find mascot by name")
            .await?;

        Ok(row.map(MascotRow::into_mascot))
    }

    async fn find_accessory_by_name(&self, name: &str) -> Result<Option<Accessory>, DomainError> {
        let query = format!("SELECT {ACCESSORY_COLUMNS} FROM accessories a WHERE a.name = ?1");

        let row: Option<AccessoryRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(name), "Find accessory by name")
            .await?;

        row.map(AccessoryRow::into_accessory).transpose()
    }

    async fn insert_mascot_if_absent(&self, mascot: &Mascot) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO mascots (
                id, name, species, description, image_url, locked_image_url, price, slot_type
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(name) DO NOTHING
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(mascot.id().as_str())
                    .bind(mascot.name())
                    .bind(mascot.species())
                    .bind(mascot.description())
                    .bind(mascot.image_url())
                    .bind(mascot.locked_image_url())
                    .bind(mascot.price())
                    .bind(mascot.slot_type()),
                "Insert mascot",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_accessory_if_absent(&self, accessory: &Accessory) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO accessories (id, name, slot, image_url, price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(name) DO NOTHING
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(accessory.id().as_str())
                    .bind(accessory.name())
                    .bind(accessory.slot().as_str())
                    .bind(accessory.image_url())
                    .bind(accessory.price()),
                "Insert accessory",
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

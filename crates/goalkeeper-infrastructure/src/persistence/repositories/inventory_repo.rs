use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::{debug, info};

use super::catalog_repo::{AccessoryRow, MascotRow, ACCESSORY_COLUMNS, MASCOT_COLUMNS};
use super::user_repo::update_progress;
use crate::persistence::{ResultExt, SqliteRepositoryBase};
use goalkeeper_domain::shared::{AccessoryId, DomainError, MascotId, UserId};
use goalkeeper_domain::shop::{AccessorySlot, InventoryRepository, OwnedAccessory, OwnedMascot};
use goalkeeper_domain::user::User;

#[derive(FromRow)]
struct OwnedMascotRow {
    owner_id: String,
    acquired_at: DateTime<Utc>,
    is_active: bool,
    #[sqlx(flatten)]
    mascot: MascotRow,
}

impl OwnedMascotRow {
    fn into_owned(self) -> OwnedMascot {
        OwnedMascot {
            user_id: UserId::from_string(&self.owner_id),
            mascot: self.mascot.into_mascot(),
            acquired_at: self.acquired_at,
            is_active: self.is_active,
        }
    }
}

#[derive(FromRow)]
struct OwnedAccessoryRow {
    owner_id: String,
    acquired_at: DateTime<Utc>,
    is_active: bool,
    #[sqlx(flatten)]
    accessory: AccessoryRow,
}

impl OwnedAccessoryRow {
    fn into_owned(self) -> Result<OwnedAccessory, DomainError> {
        Ok(OwnedAccessory {
            user_id: UserId::from_string(&self.owner_id),
            accessory: self.accessory.into_accessory()?,
            acquired_at: self.acquired_at,
            is_active: self.is_active,
        })
    }
}

fn owned_mascots_query(filter: &str) -> String {
    format!(
        "SELECT um.user_id AS owner_id, um.acquired_at, um.is_active, {MASCOT_COLUMNS} \
         FROM user_mascots um JOIN mascots m ON m.id = um.mascot_id \
         WHERE um.user_id = ?1 {filter} \
         ORDER BY um.acquired_at ASC, m.rowid ASC"
    )
}

fn owned_accessories_query(filter: &str) -> String {
    format!(
        "SELECT ua.user_id AS owner_id, ua.acquired_at, ua.is_active, {ACCESSORY_COLUMNS} \
         FROM user_accessories ua JOIN accessories a ON a.id = ua.accessory_id \
         WHERE ua.user_id = ?1 {filter} \
         ORDER BY ua.acquired_at ASC, a.rowid ASC"
    )
}

const ACTIVATE_ONLY_MASCOT: &str = r#"
    UPDATE user_mascots
    SET is_active = (mascot_id = ?2)
    WHERE user_id = ?1
"#;

const ACTIVATE_ACCESSORY_IN_SLOT: &str = r#"
    UPDATE user_accessories
    SET is_active = (accessory_id = ?2)
    WHERE user_id = ?1
      AND accessory_id IN (SELECT id FROM accessories WHERE slot = ?3)
"#;

pub struct SqliteInventoryRepository {
    base: SqliteRepositoryBase,
}

impl SqliteInventoryRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl InventoryRepository for SqliteInventoryRepository {
    async fn find_owned_mascots(&self, user_id: &UserId) -> Result<Vec<OwnedMascot>, DomainError> {
        let query = owned_mascots_query("");

        let rows: Vec<OwnedMascotRow> = self
            .base
            .fetch_all(sqlx::query_as(&query).bind(user_id.as_str()), "Find owned mascots")
            .await?;

        Ok(rows.into_iter().map(OwnedMascotRow::into_owned).collect())
    }

    async fn find_owned_mascot(
        &self,
        user_id: &UserId,
        mascot_id: &MascotId,
    ) -> Result<Option<OwnedMascot>, DomainError> {
        let query = owned_mascots_query("AND um.mascot_id = ?2");

        let row: Option<OwnedMascotRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(mascot_id.as_str()),
                "Find owned mascot",
            )
            .await?;

        Ok(row.map(OwnedMascotRow::into_owned))
    }

    async fn find_owned_accessories(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OwnedAccessory>, DomainError> {
        let query = owned_accessories_query("");

        let rows: Vec<OwnedAccessoryRow> = self
            .base
            .fetch_all(
                sqlx::query_as(&query).bind(user_id.as_str()),
                "Find owned accessories",
            )
            .await?;

        rows.into_iter().map(OwnedAccessoryRow::into_owned).collect()
    }

    async fn find_owned_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
    ) -> Result<Option<OwnedAccessory>, DomainError> {
        let query = owned_accessories_query("AND ua.accessory_id = ?2");

        let row: Option<OwnedAccessoryRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(user_id.as_str())
                    .bind(accessory_id.as_str()),
                "Find owned accessory",
            )
            .await?;

        row.map(OwnedAccessoryRow::into_owned).transpose()
    }

    async fn purchase_mascot(&self, user: &User, mascot_id: &MascotId) -> Result<(), DomainError> {
        let mut tx = self.base.pool().begin().await.map_repo_error("Begin transaction")?;

        update_progress(&mut tx, user, "Charge user").await?;

        sqlx::query(
            "INSERT INTO user_mascots (user_id, mascot_id, acquired_at, is_active) VALUES (?1, ?2, ?3, 0)",
        )
        .bind(user.id().as_str())
        .bind(mascot_id.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_repo_error("Add purchased mascot")?;

        tx.commit().await.map_repo_error("Commit mascot purchase")?;

        info!(user_id = %user.id(), mascot_id = %mascot_id, cash = user.cash(), "Mascot purchased");
        Ok(())
    }

    async fn purchase_accessory(
        &self,
        user: &User,
        accessory_id: &AccessoryId,
    ) -> Result<(), DomainError> {
        let mut tx = self.base.pool().begin().await.map_repo_error("Begin transaction")?;

        update_progress(&mut tx, user, "Charge user").await?;

        sqlx::query(
            "INSERT INTO user_accessories (user_id, accessory_id, acquired_at, is_active) VALUES (?1, ?2, ?3, 0)",
        )
        .bind(user.id().as_str())
        .bind(accessory_id.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_repo_error("Add purchased accessory")?;

        tx.commit().await.map_repo_error("Commit accessory purchase")?;

        info!(
            user_id = %user.id(),
            accessory_id = %accessory_id,
            cash = user.cash(),
            "Accessory purchased"
        );
        Ok(())
    }

    async fn grant_mascot(
        &self,
        user_id: &UserId,
        mascot_id: &MascotId,
        equip: bool,
    ) -> Result<bool, DomainError> {
        let mut tx = self.base.pool().begin().await.map_repo_error("Begin transaction")?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO user_mascots (user_id, mascot_id, acquired_at, is_active)
            VALUES (?1, ?2, ?3, 0)
            ON CONFLICT(user_id, mascot_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(mascot_id.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_repo_error("Grant mascot")?
        .rows_affected()
            > 0;

        if inserted && equip {
            sqlx::query(ACTIVATE_ONLY_MASCOT)
                .bind(user_id.as_str())
                .bind(mascot_id.as_str())
                .execute(&mut *tx)
                .await
                .map_repo_error("Equip granted mascot")?;
        }

        tx.commit().await.map_repo_error("Commit mascot grant")?;

        debug!(user_id = %user_id, mascot_id = %mascot_id, inserted, "Mascot grant processed");
        Ok(inserted)
    }

    async fn grant_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
        slot: AccessorySlot,
        equip: bool,
    ) -> Result<bool, DomainError> {
        let mut tx = self.base.pool().begin().await.map_repo_error("Begin transaction")?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO user_accessories (user_id, accessory_id, acquired_at, is_active)
            VALUES (?1, ?2, ?3, 0)
            ON CONFLICT(user_id, accessory_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_str())
        .bind(accessory_id.as_str())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_repo_error("Grant accessory")?
        .rows_affected()
            > 0;

        if inserted && equip {
            sqlx::query(ACTIVATE_ACCESSORY_IN_SLOT)
                .bind(user_id.as_str())
                .bind(accessory_id.as_str())
                .bind(slot.as_str())
                .execute(&mut *tx)
                .await
                .map_repo_error("Equip granted accessory")?;
        }

        tx.commit().await.map_repo_error("Commit accessory grant")?;

        debug!(
            user_id = %user_id,
            accessory_id = %accessory_id,
            inserted,
            "Accessory grant processed"
        );
        Ok(inserted)
    }

    async fn equip_mascot(&self, user_id: &UserId, mascot_id: &MascotId) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query(ACTIVATE_ONLY_MASCOT)
                    .bind(user_id.as_str())
                    .bind(mascot_id.as_str()),
                "Equip mascot",
            )
            .await?;
        Ok(())
    }

    async fn equip_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
        slot: AccessorySlot,
    ) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query(ACTIVATE_ACCESSORY_IN_SLOT)
                    .bind(user_id.as_str())
                    .bind(accessory_id.as_str())
                    .bind(slot.as_str()),
                "Equip accessory",
            )
            .await?;
        Ok(())
    }

    async fn unequip_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
    ) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query(
                    "UPDATE user_accessories SET is_active = 0 WHERE user_id = ?1 AND accessory_id = ?2",
                )
                .bind(user_id.as_str())
                .bind(accessory_id.as_str()),
                "Unequip accessory",
            )
            .await?;
        Ok(())
    }
}

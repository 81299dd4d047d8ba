//! Menu repository.
//!
//! Menus have no slug; ordering comes from the explicit `sequence` column.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use copperleaf_core::MenuId;

use super::RepositoryError;
use super::hierarchy::HierarchyTable;
use crate::models::ParentSummary;
use crate::models::menu::{Menu, MenuChanges, NewMenu};

const TABLE: HierarchyTable = HierarchyTable {
    table: "menus",
    kind: "menu",
};

#[derive(Debug, sqlx::FromRow)]
struct MenuRow {
    id: i32,
    title: String,
    link: String,
    icon: Option<String>,
    sequence: i32,
    is_active: bool,
    parent_id: Option<i32>,
    parent_title: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        let parent = match (row.parent_id, row.parent_title) {
            (Some(id), Some(name)) => Some(ParentSummary {
                id: MenuId::new(id),
                name,
                slug: None,
            }),
            _ => None,
        };

        Self {
            id: MenuId::new(row.id),
            title: row.title,
            link: row.link,
            icon: row.icon,
            sequence: row.sequence,
            is_active: row.is_active,
            parent,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT: &str = "
    SELECT m.id, m.title, m.link, m.icon, m.sequence, m.is_active,
           m.parent_id, p.title AS parent_title,
           m.created_at, m.updated_at
    FROM menus m
    LEFT JOIN menus p ON p.id = m.parent_id
";

/// Repository for menu database operations.
pub struct MenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all menus sorted by sequence, then id for stability.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Menu>, RepositoryError> {
        let sql = format!("{SELECT} ORDER BY m.sequence, m.id");
        let rows: Vec<MenuRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a menu by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the menu does not exist.
    pub async fn get_by_id(&self, id: MenuId) -> Result<Menu, RepositoryError> {
        let sql = format!("{SELECT} WHERE m.id = $1");
        let row: Option<MenuRow> = sqlx::query_as(&sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;
        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Create a menu entry. An omitted `sequence` appends to the end of the
    /// current ordering.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParent` if the parent is missing or nested.
    pub async fn create(&self, input: NewMenu) -> Result<Menu, RepositoryError> {
        if let Some(parent) = input.parent {
            TABLE.ensure_valid_parent(self.pool, parent.as_i32()).await?;
        }

        let sequence = match input.sequence {
            Some(seq) => seq,
            None => self.next_sequence().await?,
        };

        let id: (i32,) = sqlx::query_as(
            "INSERT INTO menus (title, link, icon, sequence, is_active, parent_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.link)
        .bind(&input.icon)
        .bind(sequence)
        .bind(input.is_active)
        .bind(input.parent.map(|p| p.as_i32()))
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(MenuId::new(id.0)).await
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the menu does not exist and `InvalidParent`
    /// for bad parent references.
    pub async fn update(&self, id: MenuId, changes: MenuChanges) -> Result<Menu, RepositoryError> {
        let current = self.get_by_id(id).await?;

        let parent_id = match changes.parent {
            None => current.parent.as_ref().map(|p| p.id),
            Some(None) => None,
            Some(Some(parent)) => {
                if parent == id {
                    return Err(RepositoryError::InvalidParent(format!(
                        "menu {id} cannot be its own parent"
                    )));
                }
                TABLE.ensure_no_children(self.pool, id.as_i32()).await?;
                TABLE.ensure_valid_parent(self.pool, parent.as_i32()).await?;
                Some(parent)
            }
        };

        let title = changes.title.unwrap_or(current.title);
        let link = changes.link.unwrap_or(current.link);
        let icon = changes.icon.or(current.icon);
        let sequence = changes.sequence.unwrap_or(current.sequence);
        let is_active = changes.is_active.unwrap_or(current.is_active);

        sqlx::query(
            "UPDATE menus
             SET title = $2, link = $3, icon = $4, sequence = $5,
                 is_active = $6, parent_id = $7, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .bind(&title)
        .bind(&link)
        .bind(&icon)
        .bind(sequence)
        .bind(is_active)
        .bind(parent_id.map(|p| p.as_i32()))
        .execute(self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Delete a menu and its direct children in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the menu does not exist.
    pub async fn delete(&self, id: MenuId) -> Result<u64, RepositoryError> {
        TABLE.delete_cascade(self.pool, id.as_i32()).await
    }

    async fn next_sequence(&self) -> Result<i32, RepositoryError> {
        let row: (i32,) = sqlx::query_as("SELECT COALESCE(MAX(sequence) + 1, 0) FROM menus")
            .fetch_one(self.pool)
            .await?;
        Ok(row.0)
    }
}

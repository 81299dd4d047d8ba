//! Shared write-path helpers for the hierarchical tables.
//!
//! Brands, categories, and menus repeat the same parent/child pattern; the
//! pieces that are identical across the three (parent validation, slug-set
//! loading, transactional cascade delete) live here, parameterized by table
//! name. Table names are compile-time constants, never user input.

use std::collections::HashSet;

use sqlx::PgPool;

use super::RepositoryError;

/// Descriptor for one hierarchical table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HierarchyTable {
    /// SQL table name.
    pub table: &'static str,
    /// Singular noun for error messages ("brand", "category", "menu").
    pub kind: &'static str,
}

impl HierarchyTable {
    /// Validate that `parent_id` can be used as a parent reference.
    ///
    /// Fails if the row does not exist, or if it is itself a child: the
    /// hierarchy is two levels, and depth is rejected at write time rather
    /// than silently dropped by the tree assembler.
    pub(crate) async fn ensure_valid_parent(
        &self,
        pool: &PgPool,
        parent_id: i32,
    ) -> Result<(), RepositoryError> {
        let sql = format!("SELECT parent_id IS NOT NULL FROM {} WHERE id = $1", self.table);
        let row: Option<(bool,)> = sqlx::query_as(&sql)
            .bind(parent_id)
            .fetch_optional(pool)
            .await?;

        match row {
            None => Err(RepositoryError::InvalidParent(format!(
                "parent {} {parent_id} not found",
                self.kind
            ))),
            Some((true,)) => Err(RepositoryError::InvalidParent(format!(
                "parent {} {parent_id} is itself a child; only two levels are supported",
                self.kind
            ))),
            Some((false,)) => Ok(()),
        }
    }

    /// Reject nesting a row that already has children of its own.
    ///
    /// Re-parenting a current root under another root would push its
    /// children to depth 2, where the tree view cannot represent them.
    /// Checked on update whenever a parent is being assigned.
    pub(crate) async fn ensure_no_children(
        &self,
        pool: &PgPool,
        id: i32,
    ) -> Result<(), RepositoryError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE parent_id = $1)",
            self.table
        );
        let (has_children,): (bool,) = sqlx::query_as(&sql).bind(id).fetch_one(pool).await?;

        if has_children {
            return Err(RepositoryError::InvalidParent(format!(
                "{} {id} has children and cannot be nested; only two levels are supported",
                self.kind
            )));
        }
        Ok(())
    }

    /// Load the current slug set, optionally excluding one row (for renames).
    ///
    /// The set feeds the slug generator's collision check. This is
    /// best-effort under concurrency; the unique index is the enforcement
    /// point and a losing racer surfaces as a conflict.
    pub(crate) async fn existing_slugs(
        &self,
        pool: &PgPool,
        exclude: Option<i32>,
    ) -> Result<HashSet<String>, RepositoryError> {
        let rows: Vec<(String,)> = if let Some(id) = exclude {
            let sql = format!("SELECT slug FROM {} WHERE id <> $1", self.table);
            sqlx::query_as(&sql).bind(id).fetch_all(pool).await?
        } else {
            let sql = format!("SELECT slug FROM {}", self.table);
            sqlx::query_as(&sql).fetch_all(pool).await?
        };

        Ok(rows.into_iter().map(|(slug,)| slug).collect())
    }

    /// Delete a row and its direct children in one transaction.
    ///
    /// Children go first so the parent's foreign key references are gone by
    /// the time the parent row is removed. Returns the total number of rows
    /// deleted (children + 1). Rolls back and reports `NotFound` if the
    /// target does not exist.
    pub(crate) async fn delete_cascade(
        &self,
        pool: &PgPool,
        id: i32,
    ) -> Result<u64, RepositoryError> {
        let mut tx = pool.begin().await?;

        let children_sql = format!("DELETE FROM {} WHERE parent_id = $1", self.table);
        let children = sqlx::query(&children_sql)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let target_sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        let target = sqlx::query(&target_sql)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if target == 0 {
            // Dropping the transaction rolls back the child deletes.
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        Ok(children + target)
    }
}

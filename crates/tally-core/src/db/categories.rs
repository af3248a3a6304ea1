//! Category operations

use rusqlite::{params, OptionalExtension};

use super::{parse_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, CategoryKind, NewCategory};

/// Starter categories created for a new user: (name, icon, kind)
pub const DEFAULT_CATEGORIES: &[(&str, &str, CategoryKind)] = &[
    ("Food", "restaurant", CategoryKind::Expense),
    ("Transport", "directions_car", CategoryKind::Expense),
    ("Shopping", "shopping_bag", CategoryKind::Expense),
    ("Bills", "receipt", CategoryKind::Expense),
    ("Rent", "home", CategoryKind::Expense),
    ("Health", "medical_services", CategoryKind::Expense),
    ("Entertainment", "movie", CategoryKind::Expense),
    ("Other", "category", CategoryKind::Expense),
    ("Salary", "payments", CategoryKind::Income),
    ("Gifts", "redeem", CategoryKind::Income),
];

const CATEGORY_COLUMNS: &str = "id, user_id, name, icon, kind, created_at, updated_at";

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;
    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        icon: row.get(3)?,
        kind: parse_column(row, 4)?,
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    /// List a user's categories, optionally only one kind
    pub fn list_categories(
        &self,
        user_id: i64,
        kind: Option<CategoryKind>,
    ) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let categories = match kind {
            Some(kind) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM categories WHERE user_id = ? AND kind = ? ORDER BY name, id",
                    CATEGORY_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![user_id, kind.as_str()], row_to_category)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM categories WHERE user_id = ? ORDER BY kind, name, id",
                    CATEGORY_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![user_id], row_to_category)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };

        Ok(categories)
    }

    pub fn get_category(&self, user_id: i64, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                &format!(
                    "SELECT {} FROM categories WHERE id = ? AND user_id = ?",
                    CATEGORY_COLUMNS
                ),
                params![id, user_id],
                row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    pub fn create_category(&self, user_id: i64, category: &NewCategory) -> Result<Category> {
        category.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO categories (user_id, name, icon, kind) VALUES (?, ?, ?, ?)",
            params![user_id, category.name, category.icon, category.kind.as_str()],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_category(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("category {}", id)))
    }

    /// Replace a category's fields. Returns `None` if the user has no such category.
    ///
    /// Renaming does not touch transactions or budgets that used the old name.
    pub fn update_category(
        &self,
        user_id: i64,
        id: i64,
        category: &NewCategory,
    ) -> Result<Option<Category>> {
        category.validate()?;

        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE categories SET name = ?, icon = ?, kind = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id = ? AND user_id = ?",
            params![
                category.name,
                category.icon,
                category.kind.as_str(),
                id,
                user_id
            ],
        )?;
        drop(conn);

        if changed == 0 {
            return Ok(None);
        }
        self.get_category(user_id, id)
    }

    pub fn delete_category(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM categories WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    /// Create the starter categories a user does not have yet (matched by
    /// name and kind). Returns how many were added.
    pub fn seed_default_categories(&self, user_id: i64) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut added = 0;
        for (name, icon, kind) in DEFAULT_CATEGORIES {
            added += tx.execute(
                "INSERT INTO categories (user_id, name, icon, kind)
                 SELECT ?1, ?2, ?3, ?4
                 WHERE NOT EXISTS (
                     SELECT 1 FROM categories WHERE user_id = ?1 AND name = ?2 AND kind = ?4
                 )",
                params![user_id, name, icon, kind.as_str()],
            )?;
        }

        tx.commit()?;
        Ok(added)
    }
}

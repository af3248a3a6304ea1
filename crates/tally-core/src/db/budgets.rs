//! Budget operations

use rusqlite::{params, OptionalExtension};

use super::{decimal_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Budget, NewBudget};

const BUDGET_COLUMNS: &str = "id, user_id, category, amount, month, year, created_at, updated_at";

fn row_to_budget(row: &rusqlite::Row<'_>) -> rusqlite::Result<Budget> {
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;
    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        amount: decimal_column(row, 3)?,
        month: row.get(4)?,
        year: row.get(5)?,
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    /// List a user's budgets in creation order
    ///
    /// Only filters by period when both `month` and `year` are given.
    pub fn list_budgets(
        &self,
        user_id: i64,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let budgets = match (month, year) {
            (Some(month), Some(year)) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM budgets WHERE user_id = ? AND month = ? AND year = ? ORDER BY id",
                    BUDGET_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![user_id, month, year], row_to_budget)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            _ => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM budgets WHERE user_id = ? ORDER BY id",
                    BUDGET_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![user_id], row_to_budget)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };

        Ok(budgets)
    }

    pub fn get_budget(&self, user_id: i64, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!(
                    "SELECT {} FROM budgets WHERE id = ? AND user_id = ?",
                    BUDGET_COLUMNS
                ),
                params![id, user_id],
                row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    pub fn create_budget(&self, user_id: i64, budget: &NewBudget) -> Result<Budget> {
        budget.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO budgets (user_id, category, amount, month, year) VALUES (?, ?, ?, ?, ?)",
            params![
                user_id,
                budget.category,
                budget.amount.to_string(),
                budget.month,
                budget.year
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_budget(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("budget {}", id)))
    }

    /// Replace a budget's fields. Returns `None` if the user has no such budget.
    pub fn update_budget(
        &self,
        user_id: i64,
        id: i64,
        budget: &NewBudget,
    ) -> Result<Option<Budget>> {
        budget.validate()?;

        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE budgets SET category = ?, amount = ?, month = ?, year = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id = ? AND user_id = ?",
            params![
                budget.category,
                budget.amount.to_string(),
                budget.month,
                budget.year,
                id,
                user_id
            ],
        )?;
        drop(conn);

        if changed == 0 {
            return Ok(None);
        }
        self.get_budget(user_id, id)
    }

    pub fn delete_budget(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM budgets WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }
}

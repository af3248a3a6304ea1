//! Account operations

use rusqlite::{params, OptionalExtension};

use super::{decimal_column, parse_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Account, NewAccount};

const ACCOUNT_COLUMNS: &str = "id, user_id, name, kind, balance, color, created_at, updated_at";

fn row_to_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;
    Ok(Account {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        kind: parse_column(row, 3)?,
        balance: decimal_column(row, 4)?,
        color: row.get(5)?,
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    /// List a user's accounts by name
    pub fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM accounts WHERE user_id = ? ORDER BY name, id",
            ACCOUNT_COLUMNS
        ))?;

        let accounts = stmt
            .query_map(params![user_id], row_to_account)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    /// Get an account by ID
    pub fn get_account(&self, user_id: i64, id: i64) -> Result<Option<Account>> {
        let conn = self.conn()?;
        let account = conn
            .query_row(
                &format!(
                    "SELECT {} FROM accounts WHERE id = ? AND user_id = ?",
                    ACCOUNT_COLUMNS
                ),
                params![id, user_id],
                row_to_account,
            )
            .optional()?;

        Ok(account)
    }

    pub fn create_account(&self, user_id: i64, account: &NewAccount) -> Result<Account> {
        account.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO accounts (user_id, name, kind, balance, color) VALUES (?, ?, ?, ?, ?)",
            params![
                user_id,
                account.name,
                account.kind.as_str(),
                account.balance.to_string(),
                account.color
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_account(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("account {}", id)))
    }

    /// Replace an account's fields. Returns `None` if the user has no such account.
    pub fn update_account(
        &self,
        user_id: i64,
        id: i64,
        account: &NewAccount,
    ) -> Result<Option<Account>> {
        account.validate()?;

        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE accounts SET name = ?, kind = ?, balance = ?, color = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id = ? AND user_id = ?",
            params![
                account.name,
                account.kind.as_str(),
                account.balance.to_string(),
                account.color,
                id,
                user_id
            ],
        )?;
        drop(conn);

        if changed == 0 {
            return Ok(None);
        }
        self.get_account(user_id, id)
    }

    /// Delete an account and all its transactions. Returns false if the user
    /// has no such account.
    pub fn delete_account(&self, user_id: i64, id: i64) -> Result<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM transactions WHERE account_id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        let deleted = tx.execute(
            "DELETE FROM accounts WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;

        tx.commit()?;
        Ok(deleted > 0)
    }
}

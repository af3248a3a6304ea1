//! Transaction operations

use rusqlite::{params, OptionalExtension, ToSql};

use super::{decimal_column, format_occurred_at, occurred_at_column, parse_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionFilter};

const TRANSACTION_COLUMNS: &str =
    "id, user_id, account_id, amount, category, occurred_at, note, kind, created_at, updated_at";

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        account_id: row.get(2)?,
        amount: decimal_column(row, 3)?,
        category: row.get(4)?,
        occurred_at: occurred_at_column(row, 5)?,
        note: row.get(6)?,
        kind: parse_column(row, 7)?,
        created_at: parse_datetime(&created_at),
        updated_at: parse_datetime(&updated_at),
    })
}

impl Database {
    /// List a user's transactions, newest first
    ///
    /// The account and kind filters are combined with AND when both are set.
    pub fn list_transactions(
        &self,
        user_id: i64,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let mut conditions = vec!["user_id = ?"];
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(user_id)];

        if let Some(account_id) = filter.account_id {
            conditions.push("account_id = ?");
            params.push(Box::new(account_id));
        }
        if let Some(kind) = filter.kind {
            conditions.push("kind = ?");
            params.push(Box::new(kind.as_str()));
        }

        let sql = format!(
            "SELECT {} FROM transactions WHERE {} ORDER BY occurred_at DESC, id DESC",
            TRANSACTION_COLUMNS,
            conditions.join(" AND ")
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let transactions = stmt
            .query_map(param_refs.as_slice(), row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    pub fn get_transaction(&self, user_id: i64, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ? AND user_id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id, user_id],
                row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// Record a transaction against one of the user's accounts
    ///
    /// Fails with `Error::NotFound` when the account does not belong to the user.
    pub fn create_transaction(&self, user_id: i64, tx: &NewTransaction) -> Result<Transaction> {
        tx.validate()?;
        self.ensure_account_owned(user_id, tx.account_id)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO transactions (user_id, account_id, amount, category, occurred_at, note, kind)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                user_id,
                tx.account_id,
                tx.amount.to_string(),
                tx.category,
                format_occurred_at(&tx.occurred_at),
                tx.note,
                tx.kind.as_str()
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_transaction(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
    }

    /// Replace a transaction's fields. Returns `None` if the user has no such
    /// transaction.
    pub fn update_transaction(
        &self,
        user_id: i64,
        id: i64,
        tx: &NewTransaction,
    ) -> Result<Option<Transaction>> {
        tx.validate()?;
        if self.get_transaction(user_id, id)?.is_none() {
            return Ok(None);
        }
        self.ensure_account_owned(user_id, tx.account_id)?;

        let conn = self.conn()?;
        conn.execute(
            "UPDATE transactions
             SET account_id = ?, amount = ?, category = ?, occurred_at = ?, note = ?, kind = ?,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ? AND user_id = ?",
            params![
                tx.account_id,
                tx.amount.to_string(),
                tx.category,
                format_occurred_at(&tx.occurred_at),
                tx.note,
                tx.kind.as_str(),
                id,
                user_id
            ],
        )?;
        drop(conn);

        self.get_transaction(user_id, id)
    }

    pub fn delete_transaction(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    fn ensure_account_owned(&self, user_id: i64, account_id: i64) -> Result<()> {
        let conn = self.conn()?;
        let owned: Option<i64> = conn
            .query_row(
                "SELECT id FROM accounts WHERE id = ? AND user_id = ?",
                params![account_id, user_id],
                |row| row.get(0),
            )
            .optional()?;
        match owned {
            Some(_) => Ok(()),
            None => Err(Error::NotFound("Account not found".to_string())),
        }
    }
}

//! Domain models for Tally

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A registered user. Every other record is owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string, never sent over the wire
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where money is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Cash,
    Bank,
    Card,
    Wallet,
    Other,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::Card => "card",
            Self::Wallet => "wallet",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            "card" => Ok(Self::Card),
            "wallet" => Ok(Self::Wallet),
            "other" => Ok(Self::Other),
            _ => Err(format!(
                "Unknown account type: {} (valid: cash, bank, card, wallet, other)",
                s
            )),
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An account holding a balance
///
/// The balance is whatever the user last stored; it is not recomputed from
/// transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    pub balance: Decimal,
    /// ARGB color token picked in the client
    pub color: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub color: i64,
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name: Name is required");
        }
        into_validation_result(problems)
    }
}

/// Direction of a category or a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    /// Money moved between the user's own accounts; never counted as
    /// income or expense
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            _ => Err(format!(
                "Unknown transaction type: {} (valid: income, expense, transfer)",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Categories are either income or expense; transfers have no category kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Unknown category type: {} (valid: income, expense)",
                s
            )),
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined category
///
/// Transactions and budgets refer to categories by name, not by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("name: Name is required");
        }
        if self.icon.trim().is_empty() {
            problems.push("icon: Icon is required");
        }
        into_validation_result(problems)
    }
}

/// A single money movement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub account_id: i64,
    /// Always stored as a magnitude; `kind` gives the direction
    pub amount: Decimal,
    /// Free-text category label, matched to budgets by exact equality
    pub category: String,
    /// Local calendar time of the movement
    pub occurred_at: NaiveDateTime,
    pub note: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub account_id: i64,
    pub amount: Decimal,
    pub category: String,
    pub occurred_at: NaiveDateTime,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.category.trim().is_empty() {
            problems.push("category: Category is required");
        }
        into_validation_result(problems)
    }
}

/// Filters for listing transactions. Both filters apply when both are set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub account_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
}

/// A monthly spending limit for one category label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub amount: Decimal,
    /// 1 = January
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if self.category.trim().is_empty() {
            problems.push("category: Category is required");
        }
        if !(1..=12).contains(&self.month) {
            problems.push("month: Month must be between 1 and 12");
        }
        into_validation_result(problems)
    }
}

fn into_validation_result(problems: Vec<&str>) -> Result<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidData(problems.join(", ")))
    }
}

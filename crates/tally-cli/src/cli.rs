//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Tally - Track accounts, spending and budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    ///
    /// Requires TALLY_JWT_SECRET (at least 32 characters).
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Manage users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Manage a user's accounts
    Accounts {
        /// Email of the owning user
        #[arg(long)]
        user: String,

        #[command(subcommand)]
        action: Option<AccountsAction>,
    },

    /// Manage a user's categories
    Categories {
        /// Email of the owning user
        #[arg(long)]
        user: String,

        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage a user's transactions
    Transactions {
        /// Email of the owning user
        #[arg(long)]
        user: String,

        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage a user's monthly budgets
    Budgets {
        /// Email of the owning user
        #[arg(long)]
        user: String,

        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show today's and this month's figures
    Dashboard {
        /// Email of the user
        #[arg(long)]
        user: String,

        /// Day to report on (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate reports
    Report {
        /// Email of the user
        #[arg(long)]
        user: String,

        #[command(subcommand)]
        report_type: ReportType,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// Register a user (seeds the default categories)
    Add {
        /// Login email
        email: String,

        /// Password (at least 8 characters)
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand)]
pub enum AccountsAction {
    /// List accounts
    List,

    /// Add an account
    Add {
        /// Account name
        name: String,

        /// Account type: cash, bank, card, wallet, other
        #[arg(long, default_value = "bank")]
        kind: String,

        /// Opening balance
        #[arg(long, default_value = "0")]
        balance: Decimal,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List {
        /// Only income or only expense categories
        #[arg(long)]
        kind: Option<String>,
    },

    /// Add a category
    Add {
        /// Category name
        name: String,

        /// Icon identifier
        #[arg(long, default_value = "category")]
        icon: String,

        /// Category type: income or expense
        #[arg(long, default_value = "expense")]
        kind: String,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        /// Only transactions on this account id
        #[arg(long)]
        account: Option<i64>,

        /// Only this type: income, expense, transfer
        #[arg(long)]
        kind: Option<String>,

        /// Maximum number of rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a transaction
    Add {
        /// Account id to book onto
        #[arg(long)]
        account: i64,

        /// Amount (positive)
        amount: Decimal,

        /// Category label
        #[arg(long)]
        category: String,

        /// Transaction type: income, expense, transfer
        #[arg(long, default_value = "expense")]
        kind: String,

        /// When it happened (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, defaults to now)
        #[arg(long)]
        date: Option<String>,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets (filtered when both month and year are given)
    List {
        #[arg(long)]
        month: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },

    /// Set a monthly limit for a category
    Add {
        /// Category label
        category: String,

        /// Monthly limit
        amount: Decimal,

        /// Month (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending against each budget for a month
    Budgets {
        /// Month (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Category breakdown, spending trend and insights for a month
    Analytics {
        /// Month (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Number of months in the trend
        #[arg(long, default_value = "6")]
        window: u32,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

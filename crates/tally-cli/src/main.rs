//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init                                Initialize database
//!   tally users add EMAIL --password PW       Register a user
//!   tally transactions --user EMAIL add ...   Record a transaction
//!   tally report --user EMAIL analytics       Monthly analytics
//!   tally serve --port 3000                   Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve { port, host } => commands::cmd_serve(&cli.db, &host, port).await,
        Commands::Users { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                UsersAction::Add { email, password } => {
                    commands::cmd_users_add(&db, &email, &password)
                }
            }
        }
        Commands::Accounts { user, action } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, &user)?;
            match action {
                None | Some(AccountsAction::List) => commands::cmd_accounts_list(&db, user.id),
                Some(AccountsAction::Add {
                    name,
                    kind,
                    balance,
                }) => commands::cmd_accounts_add(&db, user.id, &name, &kind, balance),
            }
        }
        Commands::Categories { user, action } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, &user)?;
            match action {
                None => commands::cmd_categories_list(&db, user.id, None),
                Some(CategoriesAction::List { kind }) => {
                    commands::cmd_categories_list(&db, user.id, kind.as_deref())
                }
                Some(CategoriesAction::Add { name, icon, kind }) => {
                    commands::cmd_categories_add(&db, user.id, &name, &icon, &kind)
                }
            }
        }
        Commands::Transactions { user, action } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, &user)?;
            match action {
                None => commands::cmd_transactions_list(&db, user.id, None, None, 20),
                Some(TransactionsAction::List {
                    account,
                    kind,
                    limit,
                }) => commands::cmd_transactions_list(&db, user.id, account, kind.as_deref(), limit),
                Some(TransactionsAction::Add {
                    account,
                    amount,
                    category,
                    kind,
                    date,
                    note,
                }) => commands::cmd_transactions_add(
                    &db,
                    user.id,
                    account,
                    amount,
                    &category,
                    &kind,
                    date.as_deref(),
                    note,
                ),
            }
        }
        Commands::Budgets { user, action } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, &user)?;
            match action {
                None => commands::cmd_budgets_list(&db, user.id, None, None),
                Some(BudgetsAction::List { month, year }) => {
                    commands::cmd_budgets_list(&db, user.id, month, year)
                }
                Some(BudgetsAction::Add {
                    category,
                    amount,
                    month,
                    year,
                }) => {
                    let (month, year) = commands::resolve_month(month, year);
                    commands::cmd_budgets_add(&db, user.id, &category, amount, month, year)
                }
            }
        }
        Commands::Dashboard { user, date, json } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, &user)?;
            let now = commands::resolve_now(date.as_deref())?;
            commands::cmd_dashboard(&db, user.id, now, json)
        }
        Commands::Report { user, report_type } => {
            let db = commands::open_db(&cli.db)?;
            let user = commands::resolve_user(&db, &user)?;
            match report_type {
                ReportType::Budgets { month, year, json } => {
                    let (month, year) = commands::resolve_month(month, year);
                    commands::cmd_report_budgets(&db, user.id, month, year, json)
                }
                ReportType::Analytics {
                    month,
                    year,
                    window,
                    json,
                } => {
                    let (month, year) = commands::resolve_month(month, year);
                    commands::cmd_report_analytics(&db, user.id, month, year, window, json)
                }
            }
        }
    }
}

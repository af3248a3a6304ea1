//! User command implementations

use anyhow::{Context, Result};
use tally_core::{auth, db::Database};
use tracing::info;

pub fn cmd_users_add(db: &Database, email: &str, password: &str) -> Result<()> {
    let email = email.trim().to_lowercase();
    auth::validate_credentials(&email, password)?;

    let hash = auth::hash_password(password).context("Failed to hash password")?;
    let user = db.create_user(&email, &hash)?;
    let seeded = db.seed_default_categories(user.id)?;
    info!(user_id = user.id, seeded, "Created user");

    println!("✅ Created user {} (id {})", user.email, user.id);
    println!("   Seeded {} default categories", seeded);

    Ok(())
}

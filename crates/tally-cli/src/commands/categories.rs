//! Category command implementations

use anyhow::Result;
use tally_core::{
    db::Database,
    models::{CategoryKind, NewCategory},
};

pub fn cmd_categories_list(db: &Database, user_id: i64, kind: Option<&str>) -> Result<()> {
    let kind = kind
        .map(|k| k.parse::<CategoryKind>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let categories = db.list_categories(user_id, kind)?;

    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────────────────────");

    for category in categories {
        println!(
            "   {:>4} │ {:<20} │ {:<8} │ {}",
            category.id, category.name, category.kind, category.icon
        );
    }

    Ok(())
}

pub fn cmd_categories_add(
    db: &Database,
    user_id: i64,
    name: &str,
    icon: &str,
    kind: &str,
) -> Result<()> {
    let kind: CategoryKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let category = db.create_category(
        user_id,
        &NewCategory {
            name: name.to_string(),
            icon: icon.to_string(),
            kind,
        },
    )?;

    println!("✅ Added category '{}' (id {})", category.name, category.id);
    Ok(())
}

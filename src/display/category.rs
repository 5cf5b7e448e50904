//! Category display formatting
//!
//! Income categories are listed before expense ones; sub-categories show the
//! name of their parent when it is in the same list.

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Category, CategoryType};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    category_type: CategoryType,
    #[tabled(rename = "Parent")]
    parent: String,
}

/// Format a wallet's categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by_key(|c| (c.category_type.code(), c.name.to_lowercase()));

    let rows = sorted.into_iter().map(|c| CategoryRow {
        id: c.id.clone(),
        name: c.name.clone(),
        category_type: c.category_type,
        parent: match c.parent.as_deref() {
            Some(parent) => names.get(parent).copied().unwrap_or(parent).to_string(),
            None => String::new(),
        },
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

//! Expense record types and the fixed category set.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of spending categories.
///
/// `Outros` is both a regular member and the catch-all label substituted
/// when a user reply is outside the set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Alimentação")]
    Alimentacao,
    #[serde(rename = "Transporte")]
    Transporte,
    #[serde(rename = "Lazer")]
    Lazer,
    #[serde(rename = "Moradia")]
    Moradia,
    #[serde(rename = "Saúde")]
    Saude,
    #[serde(rename = "Educação")]
    Educacao,
    #[serde(rename = "Contas")]
    Contas,
    #[serde(rename = "Outros")]
    Outros,
    #[serde(rename = "Viagem")]
    Viagem,
    #[serde(rename = "Compras")]
    Compras,
}

impl Category {
    /// The fixed set, in the order shown to the user when asking for a choice.
    pub const ALL: [Category; 10] = [
        Category::Alimentacao,
        Category::Transporte,
        Category::Lazer,
        Category::Moradia,
        Category::Saude,
        Category::Educacao,
        Category::Contas,
        Category::Outros,
        Category::Viagem,
        Category::Compras,
    ];

    /// Catch-all for replies that are not members of the set.
    pub const DEFAULT: Category = Category::Outros;

    /// Display label, as written in the association and ledger files.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Alimentacao => "Alimentação",
            Category::Transporte => "Transporte",
            Category::Lazer => "Lazer",
            Category::Moradia => "Moradia",
            Category::Saude => "Saúde",
            Category::Educacao => "Educação",
            Category::Contas => "Contas",
            Category::Outros => "Outros",
            Category::Viagem => "Viagem",
            Category::Compras => "Compras",
        }
    }

    /// Exact-label parse (the form stored on disk).
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// Parse a user-typed reply: trim, uppercase the first letter and
    /// lowercase the rest, then match against the fixed set.
    pub fn from_user_reply(text: &str) -> Option<Category> {
        Category::from_label(&capitalize(text.trim()))
    }

    /// Resolve a user reply, substituting the catch-all for anything
    /// outside the fixed set. Never fails.
    pub fn resolve_reply(text: &str) -> Category {
        Category::from_user_reply(text).unwrap_or(Category::DEFAULT)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// A finalized expense. Immutable once built; ownership passes to the
/// ledger on append.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub timestamp: NaiveDateTime,
    pub category: Category,
    /// Always positive; the dialogue layer rejects non-positive amounts.
    pub amount: f64,
    /// Residual text after the amount token; may be empty.
    pub description: String,
}

impl ExpenseRecord {
    /// Timestamp format used by the ledger file.
    pub const TIMESTAMP_FMT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn new(
        timestamp: NaiveDateTime,
        category: Category,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            category,
            amount,
            description: description.into(),
        }
    }
}

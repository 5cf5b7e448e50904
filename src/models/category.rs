//! Category model
//!
//! Categories belong to a wallet and are either income or expense. The type
//! arrives as a 1-based integer; anything else is rejected while decoding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::null_as_default;

/// Whether a category books income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CategoryType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl CategoryType {
    /// Wire value of this type
    pub const fn code(self) -> i64 {
        match self {
            Self::Income => 1,
            Self::Expense => 2,
        }
    }
}

/// A category type integer outside the known range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTypeError(pub i64);

impl fmt::Display for CategoryTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid category type {}", self.0)
    }
}

impl std::error::Error for CategoryTypeError {}

impl TryFrom<i64> for CategoryType {
    type Error = CategoryTypeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Income),
            2 => Ok(Self::Expense),
            other => Err(CategoryTypeError(other)),
        }
    }
}

impl From<CategoryType> for i64 {
    fn from(value: CategoryType) -> Self {
        value.code()
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A transaction category within a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Icon name
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,

    /// Server-defined metadata tag
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: String,

    /// Category name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub category_type: CategoryType,

    /// Parent category ID for sub-categories
    #[serde(default, deserialize_with = "deserialize_parent")]
    pub parent: Option<String>,

    /// Wallet this category belongs to
    #[serde(default)]
    pub account: Option<String>,

    /// Server fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The parent is either a bare ID or an embedded category object
#[derive(Deserialize)]
#[serde(untagged)]
enum ParentRef {
    Id(String),
    Embedded {
        #[serde(rename = "_id")]
        id: String,
    },
}

fn deserialize_parent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let parent = Option::<ParentRef>::deserialize(deserializer)?;
    Ok(parent
        .map(|p| match p {
            ParentRef::Id(id) | ParentRef::Embedded { id } => id,
        })
        .filter(|id| !id.is_empty()))
}

impl Category {
    /// Check if this category books income
    pub fn is_income(&self) -> bool {
        self.category_type == CategoryType::Income
    }

    /// Check if this category books expense
    pub fn is_expense(&self) -> bool {
        self.category_type == CategoryType::Expense
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category[{} {} {}]", self.id, self.name, self.category_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_category() {
        let json = r#"{
            "_id": "DADCDF0EC90840288B2B94DA60CD8043",
            "icon": "ic_category_foodndrink",
            "metadata": "foodndrink0",
            "name": "Food & Beverage",
            "type": 2,
            "account": "F4A25731D9F741938C74E7279921790F"
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "Food & Beverage");
        assert_eq!(category.category_type, CategoryType::Expense);
        assert!(category.is_expense());
        assert!(category.parent.is_none());
        assert_eq!(
            category.account.as_deref(),
            Some("F4A25731D9F741938C74E7279921790F")
        );
    }

    #[test]
    fn test_invalid_type_fails() {
        let json = r#"{"_id": "c1", "name": "Odd", "type": 3}"#;
        let err = serde_json::from_str::<Category>(json).unwrap_err();
        assert!(err.to_string().contains("invalid category type 3"));

        let zero = r#"{"_id": "c1", "name": "Odd", "type": 0}"#;
        assert!(serde_json::from_str::<Category>(zero).is_err());
    }

    #[test]
    fn test_missing_type_fails() {
        let json = r#"{"_id": "c1", "name": "Odd"}"#;
        assert!(serde_json::from_str::<Category>(json).is_err());
    }

    #[test]
    fn test_parent_as_id_or_object() {
        let bare = r#"{"_id": "c2", "name": "Cafe", "type": 2, "parent": "c1"}"#;
        let embedded = r#"{"_id": "c2", "name": "Cafe", "type": 2,
            "parent": {"_id": "c1", "name": "Food", "type": 2}}"#;

        let a: Category = serde_json::from_str(bare).unwrap();
        let b: Category = serde_json::from_str(embedded).unwrap();
        assert_eq!(a.parent.as_deref(), Some("c1"));
        assert_eq!(b.parent.as_deref(), Some("c1"));
    }

    #[test]
    fn test_type_round_trips_as_integer() {
        assert_eq!(serde_json::to_string(&CategoryType::Income).unwrap(), "1");
        assert_eq!(CategoryType::try_from(2), Ok(CategoryType::Expense));
        assert_eq!(CategoryType::try_from(5), Err(CategoryTypeError(5)));
    }

    #[test]
    fn test_display() {
        let category = Category {
            id: "c1".into(),
            icon: String::new(),
            metadata: String::new(),
            name: "Salary".into(),
            category_type: CategoryType::Income,
            parent: None,
            account: None,
            extra: Map::new(),
        };
        assert_eq!(category.to_string(), "Category[c1 Salary income]");
    }
}

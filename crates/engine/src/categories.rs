//! Closed set of categories an entry can be tagged with.
//!
//! Categories are stored as their upper snake case name, e.g. `ONETIME_INCOME`.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Food,
    Pets,
    Transportation,
    Household,
    Clothing,
    Health,
    Entertainment,
    Bills,
    Miscellaneous,
    OnetimeIncome,
    Payment,
    #[default]
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Self::Food,
        Self::Pets,
        Self::Transportation,
        Self::Household,
        Self::Clothing,
        Self::Health,
        Self::Entertainment,
        Self::Bills,
        Self::Miscellaneous,
        Self::OnetimeIncome,
        Self::Payment,
        Self::Uncategorized,
    ];

    /// Categories reserved for non-negative prices.
    pub const INCOME: [Category; 2] = [Self::OnetimeIncome, Self::Payment];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "FOOD",
            Self::Pets => "PETS",
            Self::Transportation => "TRANSPORTATION",
            Self::Household => "HOUSEHOLD",
            Self::Clothing => "CLOTHING",
            Self::Health => "HEALTH",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Bills => "BILLS",
            Self::Miscellaneous => "MISCELLANEOUS",
            Self::OnetimeIncome => "ONETIME_INCOME",
            Self::Payment => "PAYMENT",
            Self::Uncategorized => "UNCATEGORIZED",
        }
    }

    pub fn is_income(self) -> bool {
        Self::INCOME.contains(&self)
    }

    /// Every category that is not income-like, in declaration order.
    pub fn expense_categories() -> Vec<Category> {
        Self::ALL
            .into_iter()
            .filter(|category| !category.is_income())
            .collect()
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| EngineError::InvalidCategory(format!("unknown category: {value}")))
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

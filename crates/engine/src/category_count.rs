//! Signed per-category totals.

use serde::{Deserialize, Serialize};

use crate::Category;

/// Number of rows returned by the top spending view when not specified.
pub const DEFAULT_TOP_SPENDING: usize = 5;

/// A category paired with the sum of the prices of its entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub price: i64,
}

impl CategoryCount {
    pub fn new(category: Category, price: i64) -> Self {
        Self { category, price }
    }
}

/// Order rows ascending by sum, ties broken by the stored category name.
pub fn rank_category_sums(mut rows: Vec<CategoryCount>) -> Vec<CategoryCount> {
    rows.sort_by(|a, b| {
        a.price
            .cmp(&b.price)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    rows
}

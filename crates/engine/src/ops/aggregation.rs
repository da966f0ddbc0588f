//! Per-category sums over a user's entries.

use sea_orm::{QueryFilter, QuerySelect, prelude::*, sea_query::Expr};

use crate::{Category, CategoryCount, Engine, ResultEngine, entries, rank_category_sums};

impl Engine {
    /// Sum of prices per category, ascending by sum. Categories without
    /// entries are absent.
    pub async fn sums_by_category(&self, user_id: Uuid) -> ResultEngine<Vec<CategoryCount>> {
        self.grouped_sums(user_id, false).await
    }

    /// Like [`Engine::sums_by_category`] but only over negative prices.
    pub async fn expense_sums_by_category(
        &self,
        user_id: Uuid,
    ) -> ResultEngine<Vec<CategoryCount>> {
        self.grouped_sums(user_id, true).await
    }

    /// The `n` categories with the largest spending, biggest expense first.
    pub async fn top_spending(&self, user_id: Uuid, n: usize) -> ResultEngine<Vec<CategoryCount>> {
        let mut rows = self.expense_sums_by_category(user_id).await?;
        rows.truncate(n);
        Ok(rows)
    }

    async fn grouped_sums(
        &self,
        user_id: Uuid,
        expenses_only: bool,
    ) -> ResultEngine<Vec<CategoryCount>> {
        let mut query = entries::Entity::find()
            .select_only()
            .column(entries::Column::Category)
            .column_as(Expr::col(entries::Column::Price).sum(), "total")
            .filter(entries::Column::UserId.eq(user_id))
            .group_by(entries::Column::Category);
        if expenses_only {
            query = query.filter(entries::Column::Price.lt(0));
        }

        let rows: Vec<(String, i64)> = query.into_tuple().all(&self.database).await?;
        let counts = rows
            .into_iter()
            .map(|(category, total)| {
                Category::try_from(category.as_str()).map(|category| CategoryCount::new(category, total))
            })
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(rank_category_sums(counts))
    }
}

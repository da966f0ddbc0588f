//! Category aggregation endpoints.

use api_types::category::{Category, CategoryCountView, TopSpendingQuery};
use axum::{
    Extension, Json,
    extract::{Query, State, rejection::QueryRejection},
};
use engine::DEFAULT_TOP_SPENDING;

use crate::{AuthUser, ServerError, server::ServerState};

pub(crate) fn to_api(category: engine::Category) -> Category {
    match category {
        engine::Category::Food => Category::Food,
        engine::Category::Pets => Category::Pets,
        engine::Category::Transportation => Category::Transportation,
        engine::Category::Household => Category::Household,
        engine::Category::Clothing => Category::Clothing,
        engine::Category::Health => Category::Health,
        engine::Category::Entertainment => Category::Entertainment,
        engine::Category::Bills => Category::Bills,
        engine::Category::Miscellaneous => Category::Miscellaneous,
        engine::Category::OnetimeIncome => Category::OnetimeIncome,
        engine::Category::Payment => Category::Payment,
        engine::Category::Uncategorized => Category::Uncategorized,
    }
}

pub(crate) fn from_api(category: Category) -> engine::Category {
    match category {
        Category::Food => engine::Category::Food,
        Category::Pets => engine::Category::Pets,
        Category::Transportation => engine::Category::Transportation,
        Category::Household => engine::Category::Household,
        Category::Clothing => engine::Category::Clothing,
        Category::Health => engine::Category::Health,
        Category::Entertainment => engine::Category::Entertainment,
        Category::Bills => engine::Category::Bills,
        Category::Miscellaneous => engine::Category::Miscellaneous,
        Category::OnetimeIncome => engine::Category::OnetimeIncome,
        Category::Payment => engine::Category::Payment,
        Category::Uncategorized => engine::Category::Uncategorized,
    }
}

fn map_counts(rows: Vec<engine::CategoryCount>) -> Json<Vec<CategoryCountView>> {
    Json(
        rows.into_iter()
            .map(|row| CategoryCountView {
                category: to_api(row.category),
                price: row.price,
            })
            .collect(),
    )
}

pub async fn all_count(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryCountView>>, ServerError> {
    let rows = state.engine.sums_by_category(user.id).await?;
    Ok(map_counts(rows))
}

pub async fn expense_count(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<CategoryCountView>>, ServerError> {
    let rows = state.engine.expense_sums_by_category(user.id).await?;
    Ok(map_counts(rows))
}

pub async fn top_spending(
    Extension(AuthUser(user)): Extension<AuthUser>,
    State(state): State<ServerState>,
    query: Result<Query<TopSpendingQuery>, QueryRejection>,
) -> Result<Json<Vec<CategoryCountView>>, ServerError> {
    let Query(query) = query?;
    let n = query.n.unwrap_or(DEFAULT_TOP_SPENDING);
    let rows = state.engine.top_spending(user.id, n).await?;
    Ok(map_counts(rows))
}

//! User-scoped entry store.

use chrono::{Local, NaiveDate};
use sea_orm::{QueryFilter, QueryOrder, prelude::*, sea_query::Expr};

use crate::{
    Category, Engine, EngineError, Entry, EntryDraft, ResolvedEntry, ResultEngine, entries,
    util::ensure_ordered,
};

use super::require_user;

fn into_entries(models: Vec<entries::Model>) -> ResultEngine<Vec<Entry>> {
    models.into_iter().map(Entry::try_from).collect()
}

impl Engine {
    /// All entries of a user, oldest id first.
    pub async fn entries(&self, user_id: Uuid) -> ResultEngine<Vec<Entry>> {
        let models = entries::Entity::find()
            .filter(entries::Column::UserId.eq(user_id))
            .order_by_asc(entries::Column::Id)
            .all(&self.database)
            .await?;
        into_entries(models)
    }

    /// A single entry, only if owned by `user_id`.
    pub async fn entry(&self, user_id: Uuid, id: i64) -> ResultEngine<Entry> {
        entries::Entity::find_by_id(id)
            .filter(entries::Column::UserId.eq(user_id))
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("entry {id}")))
            .and_then(Entry::try_from)
    }

    /// Store a caller supplied entry, filling in the missing fields.
    pub async fn add_entry(&self, user_id: Uuid, draft: EntryDraft) -> ResultEngine<Entry> {
        let today = Local::now().date_naive();
        self.insert_entry(user_id, draft.resolve(today)).await
    }

    /// Generate a random entry and store it for `user_id`.
    pub async fn create_random_entry(&self, user_id: Uuid) -> ResultEngine<Entry> {
        let generated = self.generator.generate()?;
        self.insert_entry(user_id, generated).await
    }

    async fn insert_entry(&self, user_id: Uuid, entry: ResolvedEntry) -> ResultEngine<Entry> {
        require_user(&self.database, user_id).await?;
        let model = entry
            .into_active_model(user_id)
            .insert(&self.database)
            .await?;
        tracing::debug!("stored entry {} for user {user_id}", model.id);
        Entry::try_from(model)
    }

    /// Entries dated between `from` and `to`, both included.
    pub async fn entries_between_dates(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ResultEngine<Vec<Entry>> {
        ensure_ordered(from, to, "date")?;
        let models = entries::Entity::find()
            .filter(entries::Column::UserId.eq(user_id))
            .filter(entries::Column::Date.between(from, to))
            .order_by_asc(entries::Column::Date)
            .order_by_asc(entries::Column::Id)
            .all(&self.database)
            .await?;
        into_entries(models)
    }

    /// Entries priced between `from` and `to`, both included.
    pub async fn entries_between_prices(
        &self,
        user_id: Uuid,
        from: i32,
        to: i32,
    ) -> ResultEngine<Vec<Entry>> {
        ensure_ordered(from, to, "price")?;
        let models = entries::Entity::find()
            .filter(entries::Column::UserId.eq(user_id))
            .filter(entries::Column::Price.between(from, to))
            .order_by_asc(entries::Column::Price)
            .order_by_asc(entries::Column::Id)
            .all(&self.database)
            .await?;
        into_entries(models)
    }

    /// Move an entry to another category and return it as stored afterwards.
    ///
    /// The update and the re-read are separate statements: an entry deleted
    /// in between surfaces as `KeyNotFound`.
    pub async fn update_entry_category(
        &self,
        user_id: Uuid,
        id: i64,
        category: Category,
    ) -> ResultEngine<Entry> {
        let existing = self.entry(user_id, id).await?;

        entries::Entity::update_many()
            .col_expr(entries::Column::Category, Expr::value(category.as_str()))
            .filter(entries::Column::Id.eq(existing.id))
            .filter(entries::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        match self.entry(user_id, existing.id).await {
            Err(EngineError::KeyNotFound(_)) => Err(EngineError::KeyNotFound(format!(
                "entry {id} disappeared while categorizing"
            ))),
            other => other,
        }
    }

    /// Delete every entry of every user. Returns the number of deleted rows.
    pub async fn clear_entries(&self) -> ResultEngine<u64> {
        let result = entries::Entity::delete_many().exec(&self.database).await?;
        tracing::info!("cleared {} entries", result.rows_affected);
        Ok(result.rows_affected)
    }
}

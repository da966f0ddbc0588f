//! The module contains the `Entry` type, a dated and priced record owned by a
//! user.
//!
//! Both expenses and income are represented by `Entry`: a negative price is an
//! expense, a non-negative one is income or a payment.
use core::fmt;

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Category, ResultEngine, util::normalize_optional_text};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub price: i32,
    pub name: String,
    pub date: NaiveDate,
    pub category: Category,
    pub user_id: Uuid,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.price, self.category, self.name
        )
    }
}

impl TryFrom<Model> for Entry {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: model.id,
            price: model.price,
            name: model.name,
            date: model.date,
            category: Category::try_from(model.category.as_str())?,
            user_id: model.user_id,
        })
    }
}

/// Caller supplied data for a new entry. Missing fields are resolved when the
/// entry is stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub price: i32,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
}

impl EntryDraft {
    pub fn new(price: i32) -> Self {
        Self {
            price,
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Fill the defaults: `today` for the date, `Uncategorized` for the
    /// category and the ISO date for a blank name.
    pub(crate) fn resolve(self, today: NaiveDate) -> ResolvedEntry {
        let date = self.date.unwrap_or(today);
        let name = normalize_optional_text(self.name.as_deref())
            .unwrap_or_else(|| date.format("%Y-%m-%d").to_string());
        ResolvedEntry {
            price: self.price,
            name,
            date,
            category: self.category.unwrap_or_default(),
        }
    }
}

/// An entry with every field resolved but not yet persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub price: i32,
    pub name: String,
    pub date: NaiveDate,
    pub category: Category,
}

impl ResolvedEntry {
    pub(crate) fn into_active_model(self, user_id: Uuid) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            price: ActiveValue::Set(self.price),
            name: ActiveValue::Set(self.name),
            date: ActiveValue::Set(self.date),
            category: ActiveValue::Set(self.category.as_str().to_string()),
            user_id: ActiveValue::Set(user_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub price: i32,
    pub name: String,
    pub date: Date,
    pub category: String,
    pub user_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn draft_defaults_date_category_and_name() {
        let resolved = EntryDraft::new(-600).resolve(day(2024, 3, 9));
        assert_eq!(resolved.date, day(2024, 3, 9));
        assert_eq!(resolved.category, Category::Uncategorized);
        assert_eq!(resolved.name, "2024-03-09");
        assert_eq!(resolved.price, -600);
    }

    #[test]
    fn blank_name_falls_back_to_entry_date() {
        let resolved = EntryDraft::new(10)
            .name("   ")
            .date(day(2020, 12, 31))
            .resolve(day(2024, 1, 1));
        assert_eq!(resolved.name, "2020-12-31");
    }

    #[test]
    fn explicit_fields_are_kept() {
        let resolved = EntryDraft::new(-42)
            .name(" lunch ")
            .category(Category::Food)
            .resolve(day(2024, 1, 1));
        assert_eq!(resolved.name, "lunch");
        assert_eq!(resolved.category, Category::Food);
    }
}

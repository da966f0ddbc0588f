use serde::{Deserialize, Serialize};

pub mod category {
    use super::*;

    /// Wire representation of an entry category.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// Total price of one category.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryCountView {
        pub category: Category,
        pub price: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TopSpendingQuery {
        /// How many categories to return. The server default is 5.
        pub n: Option<usize>,
    }
}

pub mod entry {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::{category::Category, *};

    /// Request body for adding an entry.
    ///
    /// Everything but the price is optional: the date defaults to today, the
    /// category to `UNCATEGORIZED` and the name to the ISO date.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryNew {
        pub price: i32,
        pub name: Option<String>,
        pub date: Option<NaiveDate>,
        pub category: Option<Category>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: i64,
        pub price: i32,
        pub name: String,
        /// `YYYY-MM-DD`.
        pub date: NaiveDate,
        pub category: Category,
        pub user_id: Uuid,
    }
}

pub mod user {
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserRegister {
        pub username: String,
        pub password: String,
    }

    /// Public view of an account. The password hash is never sent.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub username: String,
        pub roles: Vec<String>,
    }
}

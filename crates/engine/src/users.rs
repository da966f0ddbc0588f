//! Users table and the public `User` view of an account.
//!
//! The password column holds an argon2 PHC string, never the plaintext.

use std::collections::BTreeSet;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role granted to every account created through registration.
pub const DEFAULT_ROLE: &str = "USER";

/// Username reserved for the superuser.
pub const SUPERUSER_NAME: &str = "admin";

/// A registered account. The credential is intentionally left out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub roles: BTreeSet<String>,
}

impl User {
    pub(crate) fn from_model(model: Model, roles: Vec<super::user_roles::Model>) -> Self {
        Self {
            id: model.id,
            username: model.username,
            roles: roles.into_iter().map(|role| role.role).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_roles::Entity")]
    Roles,
    #[sea_orm(has_many = "super::entries::Entity")]
    Entries,
}

impl Related<super::user_roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roles.def()
    }
}

impl Related<super::entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

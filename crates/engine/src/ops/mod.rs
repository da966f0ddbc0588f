use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};

use crate::{EngineError, ResultEngine, users};

mod accounts;
mod aggregation;
mod entries;
mod registration;

pub use registration::RegistrationCheck;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Look a user row up by its exact username.
pub(super) async fn find_user_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> ResultEngine<Option<users::Model>> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fail with `KeyNotFound` unless a user with `user_id` exists.
pub(super) async fn require_user<C: ConnectionTrait>(db: &C, user_id: Uuid) -> ResultEngine<()> {
    match users::Entity::find_by_id(user_id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(EngineError::KeyNotFound(format!("user {user_id}"))),
    }
}

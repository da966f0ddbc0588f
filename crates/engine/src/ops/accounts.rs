use sea_orm::{ModelTrait, prelude::*};

use crate::{Engine, EngineError, ResultEngine, User, password, user_roles, users};

use super::find_user_by_username;

impl Engine {
    /// Return the account registered under `username`. Surrounding
    /// whitespace is ignored, as it is on registration.
    pub async fn user_by_username(&self, username: &str) -> ResultEngine<User> {
        let username = username.trim();
        let model = find_user_by_username(&self.database, username)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("user {username}")))?;
        self.load_user(model).await
    }

    /// `true` if nobody registered `username` yet.
    pub async fn username_available(&self, username: &str) -> ResultEngine<bool> {
        Ok(find_user_by_username(&self.database, username.trim())
            .await?
            .is_none())
    }

    /// Check a username/password pair against the stored hash.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<User> {
        let username = username.trim();
        let Some(model) = find_user_by_username(&self.database, username).await? else {
            tracing::debug!("authentication failed: unknown user '{username}'");
            return Err(EngineError::Unauthorized);
        };
        if !password::verify_password(password, &model.password)? {
            tracing::debug!("authentication failed: wrong password for '{username}'");
            return Err(EngineError::Unauthorized);
        }
        self.load_user(model).await
    }

    async fn load_user(&self, model: users::Model) -> ResultEngine<User> {
        let roles = model
            .find_related(user_roles::Entity)
            .all(&self.database)
            .await?;
        Ok(User::from_model(model, roles))
    }
}

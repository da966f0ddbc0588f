//! User registration as an ordered chain of checks.
//!
//! Each link either rejects the candidate with an error, which stops the
//! chain, or lets the next link run. The last link persists the account.
//! The whole chain runs inside one database transaction.

use sea_orm::{ActiveValue, DatabaseTransaction, SqlErr, TransactionTrait, prelude::*};

use crate::{
    DEFAULT_ROLE, Engine, EngineError, ResultEngine, SUPERUSER_NAME, User, password, user_roles,
    users, util::normalize_required_name,
};

use super::{find_user_by_username, with_tx};

/// Credentials being registered.
struct Candidate<'a> {
    username: &'a str,
    password: &'a str,
}

/// One link of the registration chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationCheck {
    /// Reject usernames that are already registered.
    UserExists,
    /// Recognise the superuser name. Never short-circuits.
    RoleCheck,
    /// Hash the password and store the account with the default role.
    Persist,
}

impl RegistrationCheck {
    /// The links in evaluation order.
    pub const CHAIN: [RegistrationCheck; 3] = [Self::UserExists, Self::RoleCheck, Self::Persist];

    async fn check(self, db: &DatabaseTransaction, candidate: &Candidate<'_>) -> ResultEngine<()> {
        match self {
            Self::UserExists => {
                tracing::debug!("checking whether '{}' is registered", candidate.username);
                if find_user_by_username(db, candidate.username)
                    .await?
                    .is_some()
                {
                    tracing::info!("username '{}' is already registered", candidate.username);
                    return Err(EngineError::ExistingKey(candidate.username.to_string()));
                }
                Ok(())
            }
            Self::RoleCheck => {
                if candidate.username == SUPERUSER_NAME {
                    tracing::info!("registering the superuser account");
                } else {
                    tracing::debug!("registering regular user '{}'", candidate.username);
                }
                Ok(())
            }
            Self::Persist => persist(db, candidate).await,
        }
    }
}

async fn persist(db: &DatabaseTransaction, candidate: &Candidate<'_>) -> ResultEngine<()> {
    let id = Uuid::new_v4();
    let user = users::ActiveModel {
        id: ActiveValue::Set(id),
        username: ActiveValue::Set(candidate.username.to_string()),
        password: ActiveValue::Set(password::hash_password(candidate.password)?),
    };
    user.insert(db).await.map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            EngineError::ExistingKey(candidate.username.to_string())
        }
        _ => EngineError::from(err),
    })?;

    user_roles::ActiveModel {
        user_id: ActiveValue::Set(id),
        role: ActiveValue::Set(DEFAULT_ROLE.to_string()),
    }
    .insert(db)
    .await?;

    Ok(())
}

async fn run_chain(db: &DatabaseTransaction, candidate: &Candidate<'_>) -> ResultEngine<()> {
    for link in RegistrationCheck::CHAIN {
        link.check(db, candidate).await?;
    }
    Ok(())
}

impl Engine {
    /// Register a new account by running [`RegistrationCheck::CHAIN`].
    ///
    /// Fails with `ExistingKey` if the username is taken, `InvalidName` if a
    /// credential is blank and `KeyNotFound` if the account cannot be read
    /// back once the chain has finished.
    pub async fn register_user(&self, username: &str, password: &str) -> ResultEngine<User> {
        let username = normalize_required_name(username, "username")?;
        if password.trim().is_empty() {
            return Err(EngineError::InvalidName(
                "password must not be empty".to_string(),
            ));
        }
        let candidate = Candidate {
            username: &username,
            password,
        };

        with_tx!(self, |db_tx| run_chain(&db_tx, &candidate).await)?;

        let user = self.user_by_username(&username).await?;
        tracing::info!("registered user '{}'", user.username);
        Ok(user)
    }
}

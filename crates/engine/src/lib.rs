//! Expense tracking engine.
//!
//! The [`Engine`] owns the database connection and exposes every operation of
//! the tracker: user registration through an ordered chain of checks, the
//! user-scoped entry store, per-category aggregation and random entry
//! generation. Every operation that touches entries takes the id of the
//! authenticated user explicitly.

use sea_orm::DatabaseConnection;

pub use categories::Category;
pub use category_count::{CategoryCount, DEFAULT_TOP_SPENDING, rank_category_sums};
pub use entries::{Entry, EntryDraft, ResolvedEntry};
pub use error::EngineError;
pub use generator::{RandomEntryGenerator, category_for_price};
pub use ops::RegistrationCheck;
pub use users::{DEFAULT_ROLE, SUPERUSER_NAME, User};

mod categories;
mod category_count;
mod entries;
mod error;
pub mod generator;
mod ops;
pub mod password;
mod user_roles;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    generator: RandomEntryGenerator,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The generator used by [`Engine::create_random_entry`].
    pub fn generator(&self) -> &RandomEntryGenerator {
        &self.generator
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    generator: Option<RandomEntryGenerator>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Override the default random entry generator.
    pub fn generator(mut self, generator: RandomEntryGenerator) -> EngineBuilder {
        self.generator = Some(generator);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            generator: self.generator.unwrap_or_default(),
        })
    }
}

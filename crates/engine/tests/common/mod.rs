#![allow(dead_code)]

use engine::{Engine, User};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub async fn engine_with_user(username: &str) -> (Engine, User) {
    let (engine, _db) = engine_with_db().await;
    let user = engine.register_user(username, "password").await.unwrap();
    (engine, user)
}

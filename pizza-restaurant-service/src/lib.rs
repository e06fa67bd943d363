use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod seed;
pub mod serializer;
pub mod service;
pub mod store;

pub use handlers::{app, AppState};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

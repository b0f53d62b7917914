//! Storage infrastructure

pub mod migrations;

pub use migrations::{run_schema_migrations, Migration, PostgresMigrator};

//! CLI module for the Hotel Reviews API
//!
//! Provides subcommands for running the service:
//! - `serve`: run the HTTP API server
//! - `migrate`: apply database migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Hotel Reviews API - user accounts, token auth and hotel reviews
#[derive(Parser)]
#[command(name = "hotel-reviews-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply database migrations and exit (PostgreSQL backend only)
    Migrate,
}

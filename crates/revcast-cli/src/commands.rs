//! CLI command definitions.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve,
    /// Start a forecast compute worker.
    Worker,
    /// Run pending database migrations.
    Migrate,
}

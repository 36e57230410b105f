//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing a serializable result
//! - An `Outputable` impl rendering that result as a table

mod compile;
mod count;
mod find;
mod search;

pub use compile::{CompileCmd, CompileResult, StatementKind};
pub use count::{CountCmd, CountResult};
pub use find::{FindCmd, FindResult};
pub use search::{SearchCmd, SearchResult};

use clap::{Args, Subcommand};
use std::error::Error;

use crate::client::DatabaseClient;
use crate::db::{ConnectionProvider, DatabaseConfig, DbError, open_db};
use crate::output::{OutputFormat, Outputable};
use crate::queries::{QueryError, SearchSpec};

/// Client over whichever provider the CLI resolved.
pub type Client = DatabaseClient<Box<dyn ConnectionProvider>>;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, client: &Client) -> Result<Self::Output, Box<dyn Error>>;
}

/// Search spec options shared by commands that filter rows.
#[derive(Args, Debug, Clone, Default)]
pub struct SpecArgs {
    /// Search spec as JSON: {"where": [...], "orderBy": [...], "offset": n, "limit": n}
    #[arg(short, long)]
    pub spec: Option<String>,
}

impl SpecArgs {
    /// Parse `--spec`, or the empty spec when absent.
    pub fn to_spec(&self) -> Result<SearchSpec, QueryError> {
        match &self.spec {
            Some(json) => SearchSpec::from_json_str(json),
            None => Ok(SearchSpec::new()),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the SQL and parameters a spec compiles to, without a database
    Compile(CompileCmd),

    /// Fetch one row by id
    Find(FindCmd),

    /// List rows matching a spec
    Search(SearchCmd),

    /// Count rows matching a spec
    Count(CountCmd),
}

impl Command {
    /// Execute the command and return formatted output.
    ///
    /// `db` overrides the configured database; `compile` never opens one.
    pub fn run(self, db: Option<&str>, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Compile(cmd) => {
                let result = cmd.compile()?;
                Ok(result.format(format))
            }
            Command::Find(cmd) => {
                let result = cmd.execute(&open_client(db)?)?;
                Ok(result.format(format))
            }
            Command::Search(cmd) => {
                let result = cmd.execute(&open_client(db)?)?;
                Ok(result.format(format))
            }
            Command::Count(cmd) => {
                let result = cmd.execute(&open_client(db)?)?;
                Ok(result.format(format))
            }
        }
    }
}

/// Open the provider named by `db`, or the one resolved from config and environment.
pub fn open_client(db: Option<&str>) -> Result<Client, DbError> {
    let provider = match db {
        Some(url) => open_db(url)?,
        None => DatabaseConfig::resolve()?.connect()?,
    };
    Ok(DatabaseClient::new(provider))
}

mod execute;
mod output;

pub use execute::CompileResult;

use clap::{Args, ValueEnum};

use super::SpecArgs;

/// Which statement to compile the spec into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatementKind {
    /// SELECT with ordering and pagination
    #[default]
    Select,
    /// SELECT of at most one row
    One,
    /// SELECT COUNT(*)
    Count,
    /// DELETE of matching rows
    Delete,
}

/// Print the SQL and parameters a spec compiles to, without a database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  data_access compile users                                   # SELECT * FROM users
  data_access compile users -s '{\"limit\": 10}'               # With a bound LIMIT
  data_access compile users -k count -s '{\"where\": [{\"equals\": {\"column\": \"status\", \"value\": \"active\"}}]}'")]
pub struct CompileCmd {
    /// Table to query
    pub table: String,

    /// Statement to produce
    #[arg(short, long, value_enum, default_value_t = StatementKind::Select)]
    pub kind: StatementKind,

    #[command(flatten)]
    pub spec: SpecArgs,
}

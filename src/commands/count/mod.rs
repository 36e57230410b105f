mod execute;
mod output;

pub use execute::CountResult;

use clap::Args;

use super::SpecArgs;

/// Count rows matching a spec
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  data_access count users
  data_access count users -s '{\"where\": [{\"equals\": {\"column\": \"status\", \"value\": \"active\"}}]}'")]
pub struct CountCmd {
    /// Table to query
    pub table: String,

    #[command(flatten)]
    pub spec: SpecArgs,
}

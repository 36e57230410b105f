mod execute;
mod output;

pub use execute::SearchResult;

use clap::Args;

use super::SpecArgs;

/// List rows matching a spec
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  data_access search users                                  # Every row
  data_access search users -l 10                            # First 10 rows
  data_access search users -s '{\"where\": [{\"textSearch\": {\"columns\": [\"name\"], \"value\": \"ali\"}}]}'")]
pub struct SearchCmd {
    /// Table to query
    pub table: String,

    #[command(flatten)]
    pub spec: SpecArgs,

    /// Maximum number of rows, overriding the spec's limit (1-1000)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub limit: Option<u64>,
}

mod execute;
mod output;

pub use execute::FindResult;

use clap::Args;

/// Fetch one row by id
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  data_access find users 42                 # Row whose id = '42'
  data_access find orders 42 --numeric      # Bind the id as an integer")]
pub struct FindCmd {
    /// Table to query
    pub table: String,

    /// Value of the `id` column
    pub id: String,

    /// Bind the id as an integer instead of text
    #[arg(short, long, default_value_t = false)]
    pub numeric: bool,
}

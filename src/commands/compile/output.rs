//! Output formatting for compile command results.

use super::execute::CompileResult;
use crate::output::Outputable;
use crate::queries::builder::helpers::format_params_debug;

impl Outputable for CompileResult {
    fn to_table(&self) -> String {
        format!(
            "SQL: {}\nParams: {}",
            self.sql,
            format_params_debug(&self.params)
        )
    }
}

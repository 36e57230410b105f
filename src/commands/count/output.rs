//! Output formatting for count command results.

use super::execute::CountResult;
use crate::output::Outputable;

impl Outputable for CountResult {
    fn to_table(&self) -> String {
        format!("{}: {} rows", self.table, self.count)
    }
}

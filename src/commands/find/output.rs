//! Output formatting for find command results.

use super::execute::FindResult;
use crate::output::{Outputable, format_record};

impl Outputable for FindResult {
    fn to_table(&self) -> String {
        let header = format!("{} id={}", self.table, self.id);
        match &self.record {
            Some(record) => format!("{}\n\n  {}", header, format_record(record)),
            None => format!("{}\n\nNo row found.", header),
        }
    }
}

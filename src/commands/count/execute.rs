use std::error::Error;

use serde::Serialize;

use super::CountCmd;
use crate::commands::{Client, Execute};

/// Result of the count command
#[derive(Debug, Serialize)]
pub struct CountResult {
    pub table: String,
    pub count: i64,
}

impl Execute for CountCmd {
    type Output = CountResult;

    fn execute(self, client: &Client) -> Result<Self::Output, Box<dyn Error>> {
        let spec = self.spec.to_spec()?;
        let count = client.count(&self.table, &spec)?;
        Ok(CountResult {
            table: self.table,
            count,
        })
    }
}

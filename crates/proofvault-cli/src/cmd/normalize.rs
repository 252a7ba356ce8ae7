use anyhow::Result;
use serde::Serialize;

use proofvault_core::identifier::Identifier;

use crate::output;

#[derive(Debug, Serialize)]
pub struct NormalizeOut {
    pub identifier: String,
    pub strict: bool,
}

pub fn run(input: &str, strict: bool) -> Result<()> {
    let identifier = if strict {
        Identifier::parse_strict(input)?
    } else {
        Identifier::normalize(input)
    };

    if output::is_json() {
        return output::print(&NormalizeOut {
            identifier: identifier.to_string(),
            strict,
        });
    }
    output::human_line("identifier", identifier.as_str());
    Ok(())
}

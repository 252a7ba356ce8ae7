use anyhow::Result;
use serde::Serialize;

use proofvault_core::digest::digest_file;
use proofvault_core::identifier::Identifier;

use crate::output;

#[derive(Debug, Serialize)]
pub struct DigestOut {
    pub file: String,
    pub digest: String,
    pub identifier: String,
}

pub fn run(file: &str) -> Result<()> {
    let digest = digest_file(file)?;
    let identifier = Identifier::from(&digest);

    if output::is_json() {
        return output::print(&DigestOut {
            file: file.to_string(),
            digest: digest.to_hex(),
            identifier: identifier.to_string(),
        });
    }
    output::human_line("file", file);
    output::human_line("digest", &digest.to_hex());
    output::human_line("identifier", identifier.as_str());
    Ok(())
}

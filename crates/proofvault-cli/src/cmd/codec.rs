use anyhow::Result;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use proofvault_core::codec::TransportPayload;
use proofvault_core::identifier::Identifier;

use crate::output;

pub fn run_encode(id: &str, token_id: u64, uri: &str) -> Result<()> {
    let identifier = Identifier::normalize(id);
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
    let payload = TransportPayload::new(&identifier, token_id, uri, &timestamp);

    if output::is_json() {
        return output::print(&payload);
    }
    println!("{}", payload.encode()?);
    Ok(())
}

pub fn run_decode(input: &str) -> Result<()> {
    let identifier = TransportPayload::decode(input);

    if output::is_json() {
        return output::print(&serde_json::json!({ "identifier": identifier.as_str() }));
    }
    output::human_line("identifier", identifier.as_str());
    Ok(())
}

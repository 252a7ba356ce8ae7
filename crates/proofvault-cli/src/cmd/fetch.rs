use anyhow::Result;

use proofvault_engine::config::EngineConfig;
use proofvault_engine::http::HttpGatewayStore;
use proofvault_engine::store::{ContentStore, MetadataPointer};

use crate::output;

pub async fn run(gateway: &str, pointer: &str) -> Result<()> {
    let config = EngineConfig {
        gateway_base: gateway.to_string(),
        ..Default::default()
    };
    let store = HttpGatewayStore::new(&config)?;
    let pointer = MetadataPointer::new(pointer);

    let record = store.get(&pointer).await?;

    if output::is_json() {
        return output::print(&record);
    }
    output::human_line("pointer", pointer.as_str());
    output::human_line("name", record.display_name());
    for attr in &record.attributes {
        output::human_line(&attr.trait_type, &attr.value);
    }
    Ok(())
}

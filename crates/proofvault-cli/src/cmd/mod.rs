use anyhow::Result;

use crate::args::{Cli, Command};

mod codec;
mod digest;
mod fetch;
mod normalize;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Digest { file } => digest::run(&file),
        Command::Normalize { input, strict } => normalize::run(&input, strict),
        Command::Encode { id, token_id, uri } => codec::run_encode(&id, token_id, &uri),
        Command::Decode { input } => codec::run_decode(&input),
        Command::Fetch { pointer } => fetch::run(&cli.gateway, &pointer).await,
    }
}

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "proofvault", version, about = "ProofVault CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// HTTP gateway base for metadata fetches.
    #[arg(long, global = true, default_value = "https://ipfs.io")]
    pub gateway: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute a file's content digest and canonical identifier.
    Digest {
        /// Path to the document.
        file: String,
    },

    /// Normalize arbitrary text into a canonical ledger identifier.
    Normalize {
        /// Hex string, with or without 0x, or a JSON-wrapped payload.
        input: String,

        /// Reject non-hex or over-length input instead of padding it.
        #[arg(long)]
        strict: bool,
    },

    /// Encode a transport payload (QR contents) for a verified proof.
    Encode {
        #[arg(long)]
        id: String,
        #[arg(long)]
        token_id: u64,
        #[arg(long)]
        uri: String,
    },

    /// Extract the canonical identifier from a scanned payload or raw text.
    Decode {
        /// Payload JSON or a bare identifier.
        input: String,
    },

    /// Fetch a metadata record from the gateway by pointer.
    Fetch {
        /// Pointer such as ipfs://CID or a full URL.
        pointer: String,
    },
}

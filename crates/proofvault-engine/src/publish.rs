//! Metadata publisher.
//!
//! Builds the metadata record for a proof and hands it to the content
//! store. No retry lives here; retry policy belongs to the caller, since a
//! re-publish means a whole new mint attempt.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use proofvault_core::digest::ContentDigest;
use proofvault_core::metadata::{MetadataRecord, SubjectDetails};
use proofvault_core::VaultResult;

use crate::store::{ContentStore, MetadataPointer};

/// Current time as the issuance timestamp, RFC 3339.
pub fn issuance_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

/// Build a record and publish it, returning the store's pointer.
pub async fn publish_metadata<S: ContentStore + ?Sized>(
    store: &S,
    subject: &SubjectDetails,
    digest: &ContentDigest,
    file_name: &str,
) -> VaultResult<MetadataPointer> {
    let record = MetadataRecord::build(subject, digest, file_name, &issuance_timestamp());
    let pointer = store.put(&record).await?;
    tracing::debug!(pointer = %pointer, "metadata published");
    Ok(pointer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use proofvault_core::digest::digest_bytes;
    use proofvault_core::metadata::AttributeTag;

    #[tokio::test]
    async fn publish_stores_retrievable_record() {
        let store = MemoryStore::new();
        let subject = SubjectDetails {
            name: "Jane Doe".into(),
            ..Default::default()
        };
        let digest = digest_bytes(b"diploma");

        let pointer = publish_metadata(&store, &subject, &digest, "diploma.pdf")
            .await
            .unwrap();
        let record = store.get(&pointer).await.unwrap();
        assert_eq!(record.display_name(), "Jane Doe");
        let expected = digest.to_hex();
        assert_eq!(record.attribute(AttributeTag::FileHash), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn publish_surfaces_store_failure() {
        let store = MemoryStore::new();
        store.fail_puts(true);
        let err = publish_metadata(
            &store,
            &SubjectDetails::default(),
            &digest_bytes(b"x"),
            "x.pdf",
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            proofvault_core::VaultError::PublishUnavailable(_)
        ));
    }
}

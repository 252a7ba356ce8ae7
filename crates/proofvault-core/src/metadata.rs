//! Metadata records and typed attribute lookup.
//!
//! A `MetadataRecord` is the descriptive payload published to the content
//! store alongside a proof registration. The schema mirrors the established
//! NFT-metadata shape (`name` / `description` / `image` / `attributes` /
//! `external_url`) so existing gateways and explorers render it unchanged.
//!
//! Attributes are tagged by a closed `AttributeTag` enumeration rather than
//! free-form strings; display-name resolution walks an explicit fallback
//! chain and never fails.

use serde::{Deserialize, Serialize};

use crate::digest::ContentDigest;

/// Recognized attribute tags with their stable wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTag {
    SubjectName,
    SubjectId,
    Program,
    Year,
    FileHash,
    FileName,
    IssuedAt,
}

impl AttributeTag {
    /// The `trait_type` string written to the wire. These values are frozen;
    /// records already published rely on them.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubjectName => "Student Name",
            Self::SubjectId => "Student ID",
            Self::Program => "Program",
            Self::Year => "Year",
            Self::FileHash => "File Hash",
            Self::FileName => "File Name",
            Self::IssuedAt => "Issued At",
        }
    }
}

/// One `trait_type` / `value` pair in a record's attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// Caller-provided descriptive fields. Missing fields default to the empty
/// string, never null, so the published schema stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub year: String,
}

/// The published metadata record. Immutable once stored; addressed
/// externally by the content store's pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub external_url: String,
}

impl MetadataRecord {
    /// Build a record deterministically from caller-provided fields.
    ///
    /// `issued_at` is an RFC 3339 timestamp chosen by the caller; core does
    /// not read a clock.
    pub fn build(
        subject: &SubjectDetails,
        digest: &ContentDigest,
        file_name: &str,
        issued_at: &str,
    ) -> Self {
        let display = if subject.name.is_empty() {
            "Unknown"
        } else {
            subject.name.as_str()
        };

        let tagged = |tag: AttributeTag, value: &str| Attribute {
            trait_type: tag.as_str().to_string(),
            value: value.to_string(),
        };

        MetadataRecord {
            name: format!("Diploma Proof - {display}"),
            description: format!("Verifiable diploma proof for {display}"),
            image: String::new(),
            attributes: vec![
                tagged(AttributeTag::SubjectName, &subject.name),
                tagged(AttributeTag::SubjectId, &subject.subject_id),
                tagged(AttributeTag::Program, &subject.program),
                tagged(AttributeTag::Year, &subject.year),
                tagged(AttributeTag::FileHash, &digest.to_hex()),
                tagged(AttributeTag::FileName, file_name),
                tagged(AttributeTag::IssuedAt, issued_at),
            ],
            external_url: "https://projectvault.io".to_string(),
        }
    }

    /// Look up an attribute by tag.
    pub fn attribute(&self, tag: AttributeTag) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == tag.as_str())
            .map(|a| a.value.as_str())
    }

    /// Resolve a display name: the attribute tagged as the subject's name,
    /// else the record's generic `name`, else `"Unknown"`. Display
    /// enrichment never fails the surrounding query.
    pub fn display_name(&self) -> &str {
        if let Some(v) = self.attribute(AttributeTag::SubjectName) {
            if !v.trim().is_empty() {
                return v;
            }
        }
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::digest_bytes;

    fn sample() -> MetadataRecord {
        let subject = SubjectDetails {
            name: "Jane Doe".into(),
            subject_id: "S-1042".into(),
            program: "Computer Science".into(),
            year: "2024".into(),
        };
        MetadataRecord::build(
            &subject,
            &digest_bytes(b"diploma"),
            "diploma.pdf",
            "2024-06-01T00:00:00Z",
        )
    }

    #[test]
    fn build_is_deterministic() {
        let a = sample();
        let b = sample();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn missing_fields_stay_empty_strings() {
        let record = MetadataRecord::build(
            &SubjectDetails::default(),
            &digest_bytes(b"x"),
            "",
            "2024-01-01T00:00:00Z",
        );
        let json = serde_json::to_value(&record).unwrap();
        for attr in json["attributes"].as_array().unwrap() {
            assert!(attr["value"].is_string());
        }
        assert_eq!(record.attribute(AttributeTag::SubjectName), Some(""));
    }

    #[test]
    fn display_name_prefers_tagged_attribute() {
        assert_eq!(sample().display_name(), "Jane Doe");
    }

    #[test]
    fn display_name_falls_back_to_record_name() {
        let mut record = sample();
        record
            .attributes
            .retain(|a| a.trait_type != AttributeTag::SubjectName.as_str());
        assert_eq!(record.display_name(), "Diploma Proof - Jane Doe");
    }

    #[test]
    fn display_name_last_resort_is_unknown() {
        let mut record = sample();
        record.attributes.clear();
        record.name.clear();
        assert_eq!(record.display_name(), "Unknown");
    }

    #[test]
    fn digest_lands_in_file_hash_attribute() {
        let record = sample();
        let expected = digest_bytes(b"diploma").to_hex();
        assert_eq!(record.attribute(AttributeTag::FileHash), Some(expected.as_str()));
    }
}

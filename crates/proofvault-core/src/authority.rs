//! Authority gate.
//!
//! Only the ledger's recorded authority may register new proofs. Addresses
//! are hex strings whose casing carries no meaning, so comparison is
//! case-insensitive. The recorded authority is fetched asynchronously by
//! callers; until that read completes the gate reports `Unknown`, which is
//! treated exactly like a denial (fail-closed), never as authorized.

/// Pure predicate: does `candidate` match `recorded`, ignoring ASCII case?
pub fn is_authorized(candidate: &str, recorded: &str) -> bool {
    !candidate.trim().is_empty() && candidate.trim().eq_ignore_ascii_case(recorded.trim())
}

/// Tri-state gate result. "Not yet known" is distinct from "denied" so
/// callers can render a loading state, but both refuse registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorityStatus {
    /// The recorded authority has not been fetched yet.
    Unknown,
    Granted,
    Denied { expected: String, actual: String },
}

impl AuthorityStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthorityStatus::Granted)
    }
}

/// Evaluate the gate against an authority value that may not have been
/// fetched yet.
pub fn evaluate(candidate: &str, recorded: Option<&str>) -> AuthorityStatus {
    match recorded {
        None => AuthorityStatus::Unknown,
        Some(r) if r.trim().is_empty() => AuthorityStatus::Unknown,
        Some(r) if is_authorized(candidate, r) => AuthorityStatus::Granted,
        Some(r) => AuthorityStatus::Denied {
            expected: r.trim().to_string(),
            actual: candidate.trim().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_ignores_case() {
        assert!(is_authorized(
            "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01",
            "0xabcdef0123456789abcdef0123456789abcdef01"
        ));
    }

    #[test]
    fn mismatch_is_denied_with_both_addresses() {
        let status = evaluate("0xbbbb", Some("0xaaaa"));
        assert_eq!(
            status,
            AuthorityStatus::Denied {
                expected: "0xaaaa".into(),
                actual: "0xbbbb".into(),
            }
        );
    }

    #[test]
    fn absent_authority_fails_closed() {
        assert_eq!(evaluate("0xaaaa", None), AuthorityStatus::Unknown);
        assert_eq!(evaluate("0xaaaa", Some("")), AuthorityStatus::Unknown);
        assert!(!evaluate("0xaaaa", None).is_granted());
    }

    #[test]
    fn empty_candidate_never_authorized() {
        assert!(!is_authorized("", ""));
        assert!(!is_authorized("  ", "0xaaaa"));
    }
}

//! # Proof References — Opaque Evidence Pointers
//!
//! A `ProofRef` is the engine's handle on off-system evidence: the
//! SHA-256 digest of whatever document, URL list, or media bundle a
//! reporter or disputer published elsewhere. The engine stores and
//! echoes these references; it never fetches, verifies, or otherwise
//! interprets the evidence behind them.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Width of a proof reference in bytes (SHA-256 output).
pub const PROOF_REF_LEN: usize = 32;

/// Opaque 32-byte reference to off-system evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProofRef([u8; PROOF_REF_LEN]);

impl ProofRef {
    /// Derive a reference by hashing raw evidence bytes.
    pub fn from_evidence(evidence: &[u8]) -> Self {
        let hash = Sha256::digest(evidence);
        let mut bytes = [0u8; PROOF_REF_LEN];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Parse a reference from its 64-character lowercase hex form.
    ///
    /// # Errors
    ///
    /// Rejects strings that are not exactly 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        if s.len() != PROOF_REF_LEN * 2 || !s.is_ascii() {
            return Err(CoreError::InvalidProofRef {
                reason: format!(
                    "expected {} ASCII hex characters, got {} bytes",
                    PROOF_REF_LEN * 2,
                    s.len()
                ),
            });
        }
        let mut bytes = [0u8; PROOF_REF_LEN];
        for (i, chunk) in bytes.iter_mut().enumerate() {
            let pair = &s[i * 2..i * 2 + 2];
            *chunk = u8::from_str_radix(pair, 16).map_err(|_| CoreError::InvalidProofRef {
                reason: format!("non-hex characters at position {}: {pair:?}", i * 2),
            })?;
        }
        Ok(Self(bytes))
    }

    /// The raw 32-byte reference.
    pub fn as_bytes(&self) -> &[u8; PROOF_REF_LEN] {
        &self.0
    }

    /// Render as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ProofRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "proof:{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_evidence_is_deterministic() {
        let a = ProofRef::from_evidence(b"incident dossier v1");
        let b = ProofRef::from_evidence(b"incident dossier v1");
        assert_eq!(a, b);
        assert_ne!(a, ProofRef::from_evidence(b"incident dossier v2"));
    }

    #[test]
    fn test_known_sha256_vector() {
        // SHA-256 of the empty input.
        let empty = ProofRef::from_evidence(b"");
        assert_eq!(
            empty.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let original = ProofRef::from_evidence(b"evidence bundle");
        let parsed = ProofRef::from_hex(&original.to_hex()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(ProofRef::from_hex("abc").is_err());
        assert!(ProofRef::from_hex(&"g".repeat(64)).is_err());
        assert!(ProofRef::from_hex(&"a".repeat(63)).is_err());
    }

    #[test]
    fn test_display_prefix() {
        let proof = ProofRef::from_evidence(b"x");
        let shown = format!("{proof}");
        assert!(shown.starts_with("proof:"));
        assert_eq!(shown.len(), "proof:".len() + 64);
    }
}

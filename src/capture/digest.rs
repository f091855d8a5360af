//! Digests of consumed sample snapshots.
//!
//! Samples are discarded after every draw. Keeping a hash of the snapshot
//! in the draw record lets anyone holding the raw motion verify which
//! samples fed a given result without the record retaining the samples.

use super::sample::PointerSample;
use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Domain separator so sample digests never collide with other uses.
const DIGEST_DOMAIN: &[u8] = b"entropy-roulette-samples-v1";

/// Supported hash algorithms for sample digests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// BLAKE3, the default.
    #[default]
    Blake3,
    /// SHA-256.
    Sha256,
}

/// 32-byte digest of a sample snapshot.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SampleDigest([u8; 32]);

impl SampleDigest {
    /// Hashes the samples in order, including the sample count.
    pub fn compute(samples: &[PointerSample], algorithm: HashAlgorithm) -> Self {
        let count = (samples.len() as u64).to_le_bytes();
        let data = match algorithm {
            HashAlgorithm::Blake3 => {
                let mut hasher = Blake3Hasher::new();
                hasher.update(DIGEST_DOMAIN);
                hasher.update(&count);
                for sample in samples {
                    hasher.update(&sample.x.to_le_bytes());
                    hasher.update(&sample.y.to_le_bytes());
                }
                *hasher.finalize().as_bytes()
            }
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(DIGEST_DOMAIN);
                hasher.update(count);
                for sample in samples {
                    hasher.update(sample.x.to_le_bytes());
                    hasher.update(sample.y.to_le_bytes());
                }
                let result = hasher.finalize();
                let mut data = [0u8; 32];
                data.copy_from_slice(&result);
                data
            }
        };
        Self(data)
    }

    /// Returns the digest bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for SampleDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SampleDigest({})", self.to_hex())
    }
}

impl fmt::Display for SampleDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

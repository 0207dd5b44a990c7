//! Checksummed JSON snapshots of enriched chains.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;

use super::error::ChainError;
use super::option_chain::Chain;

/// Format version written into every snapshot package.
pub const CHAIN_SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A chain together with a SHA-256 checksum of its serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshotPackage {
    /// Version of the snapshot schema for forward compatibility.
    pub version: u32,
    /// Snapshot payload.
    pub chain: Chain,
    /// Hex-encoded checksum of the serialized chain.
    pub checksum: String,
}

impl ChainSnapshotPackage {
    /// Creates a new package computing the checksum of `chain`.
    ///
    /// The chain is validated first so that every package written can be read back.
    pub fn new(chain: Chain) -> Result<Self, ChainError> {
        chain.validate()?;
        let checksum = Self::compute_checksum(&chain)?;

        Ok(Self {
            version: CHAIN_SNAPSHOT_FORMAT_VERSION,
            chain,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    pub fn to_json(&self) -> Result<String, ChainError> {
        serde_json::to_string(self).map_err(|error| ChainError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes the package from JSON.
    pub fn from_json(data: &str) -> Result<Self, ChainError> {
        serde_json::from_str(data).map_err(|error| ChainError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates version, checksum and the chain's own invariants.
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.version != CHAIN_SNAPSHOT_FORMAT_VERSION {
            return Err(ChainError::UnsupportedVersion {
                found: self.version,
                expected: CHAIN_SNAPSHOT_FORMAT_VERSION,
            });
        }

        let computed = Self::compute_checksum(&self.chain)?;
        if computed != self.checksum {
            return Err(ChainError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        self.chain.validate()
    }

    /// Consumes the package and returns the validated chain.
    pub fn into_chain(self) -> Result<Chain, ChainError> {
        self.validate()?;
        Ok(self.chain)
    }

    fn compute_checksum(chain: &Chain) -> Result<String, ChainError> {
        let payload =
            serde_json::to_vec(chain).map_err(|error| ChainError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);

        let checksum = format!("{:x}", hasher.finalize());
        trace!("chain {} checksum {}", chain.ticker(), checksum);
        Ok(checksum)
    }
}

//! Signer configuration.

use serde::{Deserialize, Serialize};

use crate::sighash::{check_hash_type, SIGHASH_ALL};
use crate::TransactionError;

fn default_hash_type() -> u8 {
    SIGHASH_ALL
}

/// Parameters fixed for one signing pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Block number time locks are evaluated against.
    pub working_block_num: u64,

    /// Hash type placed in every signature.
    #[serde(default = "default_hash_type")]
    pub hash_type: u8,
}

impl SignerConfig {
    pub fn new(working_block_num: u64) -> Self {
        SignerConfig {
            working_block_num,
            hash_type: SIGHASH_ALL,
        }
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// # Arguments
    /// * `json` - e.g. `{"working_block_num": 1000}`.
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        let config: SignerConfig = serde_json::from_str(json)
            .map_err(|e| TransactionError::Serialization(format!("signer config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TransactionError> {
        check_hash_type(self.hash_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_defaults_hash_type() {
        let config = SignerConfig::from_json(r#"{"working_block_num": 1000}"#).unwrap();
        assert_eq!(config, SignerConfig::new(1000));
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert_eq!(
            SignerConfig::from_json(r#"{"working_block_num": 1, "hash_type": 65}"#),
            Err(TransactionError::UnsupportedSighashType(65))
        );
        assert!(matches!(
            SignerConfig::from_json(r#"{"hash_type": 1}"#),
            Err(TransactionError::Serialization(_))
        ));
    }
}

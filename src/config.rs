//! Codec configuration.
//!
//! Every setting has a default matching the fixed interoperability constants
//! (little-endian, UTF-8, 2048-byte scratch blocks), so an empty file is a
//! valid configuration.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::codec::{Endianness, StringEncoding};
use crate::core::BLOCK_SIZE;
use crate::error::{Error, Result};

/// Settings for a [`Marshal`](crate::marshal::Marshal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarshalConfig {
    /// Byte order for multi-byte fields.
    pub endianness: Endianness,
    /// Codec for text fields.
    pub string_encoding: StringEncoding,
    /// Scratch allocation granularity in bytes.
    pub block_size: usize,
}

impl Default for MarshalConfig {
    fn default() -> Self {
        Self {
            endianness: Endianness::Little,
            string_encoding: StringEncoding::Utf8,
            block_size: BLOCK_SIZE,
        }
    }
}

impl MarshalConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::Config("block_size must be positive".to_owned()));
        }
        if self.endianness != Endianness::Little {
            warn!("big-endian marshalling is not interoperable with little-endian peers");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(MarshalConfig::from_toml_str("").unwrap(), MarshalConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let config = MarshalConfig::from_toml_str(
            r#"
            endianness = "big"
            string_encoding = "utf16le"
            block_size = 4096
            "#,
        )
        .unwrap();
        assert_eq!(config.endianness, Endianness::Big);
        assert_eq!(config.string_encoding, StringEncoding::Utf16Le);
        assert_eq!(config.block_size, 4096);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            MarshalConfig::from_toml_str("block_size = 0"),
            Err(Error::Config(_))
        ));
        assert!(MarshalConfig::from_toml_str(r#"endianness = "middle""#).is_err());
        assert!(MarshalConfig::from_toml_str("unknown = 1").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = MarshalConfig {
            endianness: Endianness::Big,
            string_encoding: StringEncoding::Latin1,
            block_size: 512,
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(MarshalConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MarshalConfig::load_from_file("/nonexistent/bytemarshal.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

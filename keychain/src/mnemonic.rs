//! BIP39 Mnemonic implementation

use core::fmt;
use core::str::FromStr;

use bip39 as bip39_crate;
use dash_network::Network;
use zeroize::Zeroizing;

use crate::bip32::ExtendedPrivKey;
use crate::error::{Error, Result};

/// BIP39 Mnemonic phrase
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: bip39_crate::Mnemonic,
}

impl Mnemonic {
    /// Create a mnemonic from an English phrase, validating its checksum
    pub fn from_phrase(phrase: &str) -> Result<Self> {
        let mnemonic = bip39_crate::Mnemonic::parse_in(bip39_crate::Language::English, phrase)
            .map_err(|e| Error::InvalidMnemonic(e.to_string()))?;

        Ok(Self {
            inner: mnemonic,
        })
    }

    /// Create a mnemonic from entropy bytes
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        let mnemonic = bip39_crate::Mnemonic::from_entropy(entropy)
            .map_err(|e| Error::InvalidMnemonic(e.to_string()))?;

        Ok(Self {
            inner: mnemonic,
        })
    }

    /// Get the mnemonic phrase as a string
    pub fn phrase(&self) -> String {
        self.inner.to_string()
    }

    /// Get the word count
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// Convert to seed with optional passphrase
    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.inner.to_seed(passphrase))
    }

    /// Derive the master extended private key from this mnemonic
    pub fn to_extended_key(&self, passphrase: &str, network: Network) -> Result<ExtendedPrivKey> {
        let seed = self.to_seed(passphrase);
        ExtendedPrivKey::new_master(network, seed.as_ref()).map_err(Into::into)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic").field("word_count", &self.word_count()).finish()
    }
}

impl FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_phrase(s)
    }
}

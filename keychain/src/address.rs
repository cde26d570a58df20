//! Address generation and encoding

use core::fmt;
use core::str::FromStr;

use bitcoin_hashes::{hash160, Hash};
use dash_network::Network;

use crate::error::{Error, Result};
use crate::key::PublicKey;

/// Address types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// Pay to public key hash (P2PKH)
    P2pkh,
    /// Pay to script hash (P2SH)
    P2sh,
}

/// A Dash address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    /// The network this address is valid for
    pub network: Network,
    /// The type of address
    pub address_type: AddressType,
    /// The hash160 of the public key or script
    pub hash: [u8; 20],
}

impl Address {
    /// Create a P2PKH address from a public key
    pub fn p2pkh(pubkey: &PublicKey, network: Network) -> Self {
        let hash = hash160::Hash::hash(&pubkey.to_bytes()).to_byte_array();
        Self {
            network,
            address_type: AddressType::P2pkh,
            hash,
        }
    }

    /// Create a P2SH address from a script hash
    pub fn p2sh(script_hash: [u8; 20], network: Network) -> Self {
        Self {
            network,
            address_type: AddressType::P2sh,
            hash: script_hash,
        }
    }

    fn version(&self) -> u8 {
        match self.address_type {
            AddressType::P2pkh => self.network.p2pkh_prefix(),
            AddressType::P2sh => self.network.p2sh_prefix(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut data = Vec::with_capacity(21);
        data.push(self.version());
        data.extend_from_slice(&self.hash);
        f.write_str(&base58ck::encode_check(&data))
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses a base58 address, inferring its network from the version byte.
    fn from_str(s: &str) -> Result<Self> {
        let data = base58ck::decode_check(s)
            .map_err(|_| Error::InvalidAddress(format!("{}: invalid base58 encoding", s)))?;

        if data.len() != 21 {
            return Err(Error::InvalidAddress(format!("{}: invalid address length", s)));
        }

        let version = data[0];
        let network = Network::from_address_prefix(version)
            .ok_or_else(|| Error::InvalidAddress(format!("{}: invalid version byte", s)))?;
        let address_type = if version == network.p2pkh_prefix() {
            AddressType::P2pkh
        } else {
            AddressType::P2sh
        };

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&data[1..]);

        Ok(Self {
            network,
            address_type,
            hash,
        })
    }
}

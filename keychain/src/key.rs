//! Plain (non-extended) ECDSA keys
//!
//! Wrappers around secp256k1 keys carrying the encoding metadata needed to
//! import them into a key chain: network and compression for private keys
//! (wallet import format), compression for public keys.

use core::fmt;
use core::str::FromStr;

use dash_network::Network;
use secp256k1::{Secp256k1, SecretKey};

use crate::error::{Error, Result};

/// A private key with the network it is meant for
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    /// Whether the matching public key is used in compressed form
    pub compressed: bool,
    /// The network on which this key should be used
    pub network: Network,
    /// The actual ECDSA key
    pub inner: SecretKey,
}

impl PrivateKey {
    /// Constructs a compressed private key for `network`.
    pub fn new(key: SecretKey, network: Network) -> PrivateKey {
        PrivateKey {
            compressed: true,
            network,
            inner: key,
        }
    }

    /// Parses a wallet import format string; the network comes from its prefix.
    pub fn from_wif(wif: &str) -> Result<PrivateKey> {
        let data = base58ck::decode_check(wif).map_err(|e| Error::InvalidKey(e.to_string()))?;

        let compressed = match data.len() {
            33 => false,
            34 if data[33] == 1 => true,
            _ => return Err(Error::InvalidKey(format!("invalid WIF length {}", data.len()))),
        };

        let network = Network::from_wif_prefix(data[0])
            .ok_or_else(|| Error::InvalidKey(format!("unknown WIF prefix {}", data[0])))?;

        let mut secret = [0u8; 32];
        secret.copy_from_slice(&data[1..33]);

        Ok(PrivateKey {
            compressed,
            network,
            inner: SecretKey::from_slice(&secret)?,
        })
    }

    /// Parses 32 raw bytes given as hex.
    pub fn from_hex(hex_key: &str, network: Network) -> Result<PrivateKey> {
        let mut secret = [0u8; 32];
        hex::decode_to_slice(hex_key, &mut secret)
            .map_err(|e| Error::InvalidKey(format!("invalid private key hex: {}", e)))?;
        Ok(PrivateKey::new(SecretKey::from_slice(&secret)?, network))
    }

    /// Parses either a WIF string or 64 hex characters.
    ///
    /// Only the hex form takes `network` into account.
    pub fn from_string(key: &str, network: Network) -> Result<PrivateKey> {
        if key.len() == 64 && key.chars().all(|c| c.is_ascii_hexdigit()) {
            PrivateKey::from_hex(key, network)
        } else {
            PrivateKey::from_wif(key)
        }
    }

    /// Encodes the key in wallet import format.
    pub fn to_wif(&self) -> String {
        let mut data = Vec::with_capacity(34);
        data.push(self.network.wif_prefix());
        data.extend_from_slice(&self.inner.secret_bytes());
        if self.compressed {
            data.push(1);
        }
        base58ck::encode_check(&data)
    }

    /// Lowercase hex of the 32 secret bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.inner.secret_bytes())
    }

    /// Computes the public key belonging to this private key.
    pub fn public_key<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>) -> PublicKey {
        PublicKey {
            compressed: self.compressed,
            inner: secp256k1::PublicKey::from_secret_key(secp, &self.inner),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("compressed", &self.compressed)
            .field("network", &self.network)
            .field("inner", &"<hidden>")
            .finish()
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wif())
    }
}

/// A public key, compressed or not
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    /// Whether this public key should be serialized as compressed
    pub compressed: bool,
    /// The actual ECDSA key
    pub inner: secp256k1::PublicKey,
}

impl PublicKey {
    /// Wraps a compressed secp256k1 public key.
    pub fn new(key: secp256k1::PublicKey) -> PublicKey {
        PublicKey {
            compressed: true,
            inner: key,
        }
    }

    /// Parses a 33-byte compressed or 65-byte uncompressed SEC encoding.
    pub fn from_slice(data: &[u8]) -> Result<PublicKey> {
        let compressed = match data.len() {
            33 => true,
            65 => false,
            len => return Err(Error::InvalidKey(format!("invalid public key length {}", len))),
        };
        Ok(PublicKey {
            compressed,
            inner: secp256k1::PublicKey::from_slice(data)?,
        })
    }

    /// Serializes the key in its own compression form.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.compressed {
            self.inner.serialize().to_vec()
        } else {
            self.inner.serialize_uncompressed().to_vec()
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<PublicKey> {
        let data = hex::decode(s)
            .map_err(|e| Error::InvalidKey(format!("invalid public key hex: {}", e)))?;
        PublicKey::from_slice(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET_HEX: &str = "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";

    #[test]
    fn test_wif_round_trip_keeps_network() {
        for network in [Network::Dash, Network::Testnet] {
            let key = PrivateKey::from_hex(SECRET_HEX, network).unwrap();
            let parsed = PrivateKey::from_wif(&key.to_wif()).unwrap();
            assert_eq!(parsed, key);
            assert_eq!(parsed.network, network);
            assert_eq!(parsed.to_hex(), SECRET_HEX);
        }
    }

    #[test]
    fn test_from_string_dispatch() {
        let testnet = PrivateKey::from_hex(SECRET_HEX, Network::Testnet).unwrap();
        // WIF carries its own network, the argument is ignored
        let parsed = PrivateKey::from_string(&testnet.to_wif(), Network::Dash).unwrap();
        assert_eq!(parsed.network, Network::Testnet);

        let from_hex = PrivateKey::from_string(SECRET_HEX, Network::Dash).unwrap();
        assert_eq!(from_hex.network, Network::Dash);
        assert!(PrivateKey::from_string("not a key", Network::Dash).is_err());
    }

    #[test]
    fn test_public_key_compression_forms() {
        let secp = Secp256k1::new();
        let mut key = PrivateKey::from_hex(SECRET_HEX, Network::Testnet).unwrap();
        let compressed = key.public_key(&secp);
        assert_eq!(compressed.to_bytes().len(), 33);

        key.compressed = false;
        let uncompressed = key.public_key(&secp);
        assert_eq!(uncompressed.to_bytes().len(), 65);
        assert_eq!(uncompressed.to_string().parse::<PublicKey>().unwrap(), uncompressed);
        assert_eq!(compressed.inner, uncompressed.inner);
    }

    #[test]
    fn test_public_key_rejects_bad_length() {
        assert!(matches!(PublicKey::from_slice(&[2u8; 20]), Err(Error::InvalidKey(_))));
        assert!("zz".parse::<PublicKey>().is_err());
    }
}

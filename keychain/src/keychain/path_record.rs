//! Key material and the per-path records issued by a key chain

use core::fmt;

use dash_network::Network;
use secp256k1::{Secp256k1, SecretKey};

use crate::address::Address;
use crate::bip32::{ExtendedPrivKey, ExtendedPubKey};
use crate::key::{PrivateKey, PublicKey};

/// The kind of key a key chain was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RootKeyType {
    /// Extended private key, possibly derived from a mnemonic
    #[cfg_attr(feature = "serde", serde(rename = "HDPrivateKey"))]
    HdPrivateKey,
    /// Extended public key
    #[cfg_attr(feature = "serde", serde(rename = "HDPublicKey"))]
    HdPublicKey,
    /// Plain private key
    #[cfg_attr(feature = "serde", serde(rename = "privateKey"))]
    PrivateKey,
    /// Plain public key
    #[cfg_attr(feature = "serde", serde(rename = "publicKey"))]
    PublicKey,
    /// Bare address, watch only
    #[cfg_attr(feature = "serde", serde(rename = "address"))]
    Address,
}

impl RootKeyType {
    /// Whether keys of this type can derive children.
    pub fn is_derivable(self) -> bool {
        matches!(self, RootKeyType::HdPrivateKey | RootKeyType::HdPublicKey)
    }
}

impl fmt::Display for RootKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RootKeyType::HdPrivateKey => "HDPrivateKey",
            RootKeyType::HdPublicKey => "HDPublicKey",
            RootKeyType::PrivateKey => "privateKey",
            RootKeyType::PublicKey => "publicKey",
            RootKeyType::Address => "address",
        })
    }
}

/// A key held by a key chain: its root, or the key derived for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// Extended private key
    HdPrivateKey(ExtendedPrivKey),
    /// Extended public key
    HdPublicKey(ExtendedPubKey),
    /// Plain private key
    PrivateKey(PrivateKey),
    /// Plain public key
    PublicKey(PublicKey),
    /// Address without any key
    Address(Address),
}

impl KeyMaterial {
    /// The type tag of this key.
    pub fn key_type(&self) -> RootKeyType {
        match self {
            KeyMaterial::HdPrivateKey(_) => RootKeyType::HdPrivateKey,
            KeyMaterial::HdPublicKey(_) => RootKeyType::HdPublicKey,
            KeyMaterial::PrivateKey(_) => RootKeyType::PrivateKey,
            KeyMaterial::PublicKey(_) => RootKeyType::PublicKey,
            KeyMaterial::Address(_) => RootKeyType::Address,
        }
    }

    /// Whether children can be derived from this key.
    pub fn is_derivable(&self) -> bool {
        self.key_type().is_derivable()
    }

    /// The extended private key, if this is one.
    pub fn as_extended_priv(&self) -> Option<&ExtendedPrivKey> {
        match self {
            KeyMaterial::HdPrivateKey(key) => Some(key),
            _ => None,
        }
    }

    /// The extended public key, if this is one.
    pub fn as_extended_pub(&self) -> Option<&ExtendedPubKey> {
        match self {
            KeyMaterial::HdPublicKey(key) => Some(key),
            _ => None,
        }
    }

    /// The secret key, for private variants.
    pub fn secret_key(&self) -> Option<SecretKey> {
        match self {
            KeyMaterial::HdPrivateKey(key) => Some(key.private_key),
            KeyMaterial::PrivateKey(key) => Some(key.inner),
            _ => None,
        }
    }

    /// The public key, for every variant but [`KeyMaterial::Address`].
    pub fn public_key<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>) -> Option<PublicKey> {
        match self {
            KeyMaterial::HdPrivateKey(key) => {
                Some(PublicKey::new(secp256k1::PublicKey::from_secret_key(secp, &key.private_key)))
            }
            KeyMaterial::HdPublicKey(key) => Some(PublicKey::new(key.public_key)),
            KeyMaterial::PrivateKey(key) => Some(key.public_key(secp)),
            KeyMaterial::PublicKey(key) => Some(*key),
            KeyMaterial::Address(_) => None,
        }
    }

    /// The P2PKH address of this key on `network`; an address is returned as is.
    pub fn address<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>, network: Network) -> Address {
        let public_key = match self {
            KeyMaterial::HdPrivateKey(key) => {
                PublicKey::new(secp256k1::PublicKey::from_secret_key(secp, &key.private_key))
            }
            KeyMaterial::HdPublicKey(key) => PublicKey::new(key.public_key),
            KeyMaterial::PrivateKey(key) => key.public_key(secp),
            KeyMaterial::PublicKey(key) => *key,
            KeyMaterial::Address(address) => return address.clone(),
        };
        Address::p2pkh(&public_key, network)
    }
}

/// Stable textual form: base58 for extended keys, hex for plain keys.
impl fmt::Display for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::HdPrivateKey(key) => fmt::Display::fmt(key, f),
            KeyMaterial::HdPublicKey(key) => fmt::Display::fmt(key, f),
            KeyMaterial::PrivateKey(key) => f.write_str(&key.to_hex()),
            KeyMaterial::PublicKey(key) => fmt::Display::fmt(key, f),
            KeyMaterial::Address(address) => fmt::Display::fmt(address, f),
        }
    }
}

/// Which view of an extended key a caller wants back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExtendedKeyType {
    /// The extended private key
    #[default]
    Private,
    /// The extended public key
    Public,
}

/// An extended key in the requested view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedKey {
    /// Private view
    Private(ExtendedPrivKey),
    /// Public view
    Public(ExtendedPubKey),
}

impl ExtendedKey {
    /// Turns a private key into the view selected by `key_type`.
    pub fn from_priv<C: secp256k1::Signing>(
        secp: &Secp256k1<C>,
        key: ExtendedPrivKey,
        key_type: ExtendedKeyType,
    ) -> ExtendedKey {
        match key_type {
            ExtendedKeyType::Private => ExtendedKey::Private(key),
            ExtendedKeyType::Public => ExtendedKey::Public(ExtendedPubKey::from_priv(secp, &key)),
        }
    }

    /// The private view, if this is one.
    pub fn as_private(&self) -> Option<&ExtendedPrivKey> {
        match self {
            ExtendedKey::Private(key) => Some(key),
            ExtendedKey::Public(_) => None,
        }
    }

    /// The public view, computing it from the private key if needed.
    pub fn to_public<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>) -> ExtendedPubKey {
        match self {
            ExtendedKey::Private(key) => ExtendedPubKey::from_priv(secp, key),
            ExtendedKey::Public(key) => *key,
        }
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtendedKey::Private(key) => fmt::Display::fmt(key, f),
            ExtendedKey::Public(key) => fmt::Display::fmt(key, f),
        }
    }
}

/// Flags applied by [`get_for_path`](super::DerivableKeyChain::get_for_path).
///
/// `None` leaves the current value of a cached record alone, and means
/// `false` for a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathOptions {
    /// Watch the address of this path
    pub is_watched: Option<bool>,
    /// Mark the address of this path as used
    pub is_used: Option<bool>,
}

impl PathOptions {
    /// Sets the watched flag
    pub fn with_watched(mut self, is_watched: bool) -> Self {
        self.is_watched = Some(is_watched);
        self
    }

    /// Sets the used flag
    pub fn with_used(mut self, is_used: bool) -> Self {
        self.is_used = Some(is_used);
        self
    }
}

/// A path issued by a key chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    /// Canonical path, `0` for the root of a non-derivable key chain
    pub path: String,
    /// Key derived for the path
    pub key: KeyMaterial,
    /// Address of `key` on the key chain network
    pub address: String,
    /// Whether the address has been seen in use
    pub is_used: bool,
    /// Whether the address is watched for incoming funds
    pub is_watched: bool,
    /// When the path was first derived, in milliseconds since the Unix epoch
    pub issued_time: u64,
}

impl PathRecord {
    /// Applies the flags set in `options`.
    pub(crate) fn apply(&mut self, options: PathOptions) {
        if let Some(is_watched) = options.is_watched {
            self.is_watched = is_watched;
        }
        if let Some(is_used) = options.is_used {
            self.is_used = is_used;
        }
    }
}

//! Key chain construction options and root key resolution

use core::fmt;

use dash_network::Network;

use super::look_ahead::LookAheadOptions;
use super::path_record::KeyMaterial;
use crate::address::Address;
use crate::bip32::{ExtendedPrivKey, ExtendedPubKey};
use crate::error::{Error, Result};
use crate::key::{PrivateKey, PublicKey};
use crate::mnemonic::Mnemonic;

/// A root key source given either in its text encoding or already parsed.
#[derive(Clone, PartialEq, Eq)]
pub enum KeyInput<T> {
    /// Text form, parsed when the key chain is built
    Encoded(String),
    /// Parsed value
    Parsed(T),
}

impl<T> KeyInput<T> {
    fn resolve(&self, parse: impl FnOnce(&str) -> Result<T>) -> Result<T>
    where
        T: Clone,
    {
        match self {
            KeyInput::Encoded(text) => parse(text.trim()),
            KeyInput::Parsed(value) => Ok(value.clone()),
        }
    }
}

impl<T> fmt::Debug for KeyInput<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // may hold a phrase or a secret
        match self {
            KeyInput::Encoded(_) => f.write_str("Encoded(<hidden>)"),
            KeyInput::Parsed(_) => f.write_str("Parsed(<hidden>)"),
        }
    }
}

impl<T> From<&str> for KeyInput<T> {
    fn from(text: &str) -> Self {
        KeyInput::Encoded(text.to_owned())
    }
}

impl<T> From<String> for KeyInput<T> {
    fn from(text: String) -> Self {
        KeyInput::Encoded(text)
    }
}

macro_rules! impl_parsed_input {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for KeyInput<$ty> {
                fn from(value: $ty) -> Self {
                    KeyInput::Parsed(value)
                }
            }
        )*
    };
}

impl_parsed_input!(Mnemonic, ExtendedPrivKey, ExtendedPubKey, PrivateKey, PublicKey, Address);

/// Options for [`DerivableKeyChain::new`](super::DerivableKeyChain::new).
///
/// Exactly one root source is expected. When several are set, the first one
/// in field order is used and the others are ignored.
#[derive(Debug, Clone, Default)]
pub struct KeyChainOptions {
    /// BIP39 mnemonic, turned into an extended private key
    pub mnemonic: Option<KeyInput<Mnemonic>>,
    /// Extended private key (`xprv`/`tprv`)
    pub hd_private_key: Option<KeyInput<ExtendedPrivKey>>,
    /// Extended public key (`xpub`/`tpub`)
    pub hd_public_key: Option<KeyInput<ExtendedPubKey>>,
    /// Private key, as WIF or 64 hex characters
    pub private_key: Option<KeyInput<PrivateKey>>,
    /// Public key, as hex SEC encoding
    pub public_key: Option<KeyInput<PublicKey>>,
    /// Address to watch
    pub address: Option<KeyInput<Address>>,
    /// Network used when the root key does not carry one
    pub network: Option<Network>,
    /// BIP39 passphrase applied to the mnemonic
    pub passphrase: Option<String>,
    /// Paths issued ahead of use
    pub look_ahead: LookAheadOptions,
}

impl KeyChainOptions {
    /// Sets the mnemonic root
    pub fn with_mnemonic(mut self, mnemonic: impl Into<KeyInput<Mnemonic>>) -> Self {
        self.mnemonic = Some(mnemonic.into());
        self
    }

    /// Sets the extended private key root
    pub fn with_hd_private_key(mut self, key: impl Into<KeyInput<ExtendedPrivKey>>) -> Self {
        self.hd_private_key = Some(key.into());
        self
    }

    /// Sets the extended public key root
    pub fn with_hd_public_key(mut self, key: impl Into<KeyInput<ExtendedPubKey>>) -> Self {
        self.hd_public_key = Some(key.into());
        self
    }

    /// Sets the private key root
    pub fn with_private_key(mut self, key: impl Into<KeyInput<PrivateKey>>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    /// Sets the public key root
    pub fn with_public_key(mut self, key: impl Into<KeyInput<PublicKey>>) -> Self {
        self.public_key = Some(key.into());
        self
    }

    /// Sets the address root
    pub fn with_address(mut self, address: impl Into<KeyInput<Address>>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the fallback network
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Sets the mnemonic passphrase
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Sets the look-ahead options
    pub fn with_look_ahead(mut self, look_ahead: LookAheadOptions) -> Self {
        self.look_ahead = look_ahead;
        self
    }

    fn source_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.mnemonic.is_some() {
            names.push("mnemonic");
        }
        if self.hd_private_key.is_some() {
            names.push("HDPrivateKey");
        }
        if self.hd_public_key.is_some() {
            names.push("HDPublicKey");
        }
        if self.private_key.is_some() {
            names.push("privateKey");
        }
        if self.public_key.is_some() {
            names.push("publicKey");
        }
        if self.address.is_some() {
            names.push("address");
        }
        names
    }

    /// Picks the root key and the network of the key chain.
    pub(crate) fn resolve_root(&self) -> Result<(KeyMaterial, Network)> {
        let requested = self.network.unwrap_or(Network::Testnet);

        let sources = self.source_names();
        if sources.len() > 1 {
            tracing::warn!(
                "Several root key sources given, using {} and ignoring {:?}",
                sources[0],
                &sources[1..]
            );
        }

        if let Some(mnemonic) = &self.mnemonic {
            let mnemonic = mnemonic.resolve(Mnemonic::from_phrase)?;
            let passphrase = self.passphrase.as_deref().unwrap_or_default();
            let key = mnemonic.to_extended_key(passphrase, requested)?;
            return Ok((KeyMaterial::HdPrivateKey(key), requested));
        }

        if let Some(key) = &self.hd_private_key {
            let mut key = key.resolve(|text| text.parse().map_err(Error::from))?;
            key.network = embedded_network(key.network, requested);
            return Ok((KeyMaterial::HdPrivateKey(key), key.network));
        }

        if let Some(key) = &self.hd_public_key {
            let mut key = key.resolve(|text| text.parse().map_err(Error::from))?;
            key.network = embedded_network(key.network, requested);
            return Ok((KeyMaterial::HdPublicKey(key), key.network));
        }

        if let Some(key) = &self.private_key {
            let mut key = key.resolve(|text| PrivateKey::from_string(text, requested))?;
            key.network = embedded_network(key.network, requested);
            return Ok((KeyMaterial::PrivateKey(key), key.network));
        }

        if let Some(key) = &self.public_key {
            let key = key.resolve(|text| text.parse())?;
            return Ok((KeyMaterial::PublicKey(key), requested));
        }

        if let Some(address) = &self.address {
            let mut address = address.resolve(|text| text.parse())?;
            let network = embedded_network(address.network, requested);
            address.network = network;
            return Ok((KeyMaterial::Address(address), network));
        }

        Err(Error::MissingRootKey)
    }
}

/// The network a key carries wins over the requested one.
///
/// Encodings only tell livenet from test networks, so a requested devnet or
/// regtest is kept for keys encoded with test network prefixes.
fn embedded_network(embedded: Network, requested: Network) -> Network {
    if embedded.is_livenet() == requested.is_livenet() {
        requested
    } else {
        embedded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_missing_root_key() {
        let options = KeyChainOptions::default().with_network(Network::Dash);
        assert_matches!(options.resolve_root(), Err(Error::MissingRootKey));
    }

    #[test]
    fn test_mnemonic_uses_requested_network() {
        let (root, network) =
            KeyChainOptions::default().with_mnemonic(TEST_MNEMONIC).resolve_root().unwrap();
        assert_eq!(network, Network::Testnet);
        assert_eq!(root.to_string(), TEST_ROOT_TPRV);

        let (root, network) = KeyChainOptions::default()
            .with_mnemonic(TEST_MNEMONIC)
            .with_network(Network::Dash)
            .resolve_root()
            .unwrap();
        assert_eq!(network, Network::Dash);
        assert!(root.to_string().starts_with("xprv"));
    }

    #[test]
    fn test_passphrase_changes_root() {
        let (root, _) = KeyChainOptions::default()
            .with_mnemonic(TEST_MNEMONIC)
            .with_passphrase("secret")
            .resolve_root()
            .unwrap();
        assert_ne!(root.to_string(), TEST_ROOT_TPRV);
    }

    #[test]
    fn test_embedded_network_wins() {
        let (_, network) = KeyChainOptions::default()
            .with_hd_public_key(TEST_LIVENET_XPUB)
            .with_network(Network::Testnet)
            .resolve_root()
            .unwrap();
        assert_eq!(network, Network::Dash);

        let (_, network) = KeyChainOptions::default()
            .with_private_key(TEST_PRIVATE_KEY_WIF)
            .with_network(Network::Dash)
            .resolve_root()
            .unwrap();
        assert_eq!(network, Network::Testnet);
    }

    #[test]
    fn test_test_network_prefix_keeps_devnet() {
        let (root, network) = KeyChainOptions::default()
            .with_hd_private_key(TEST_ROOT_TPRV)
            .with_network(Network::Devnet)
            .resolve_root()
            .unwrap();
        assert_eq!(network, Network::Devnet);
        assert_eq!(root.as_extended_priv().unwrap().network, Network::Devnet);
        assert_eq!(root.to_string(), TEST_ROOT_TPRV);
    }

    #[test]
    fn test_parsed_inputs() {
        let xprv: ExtendedPrivKey = TEST_ROOT_TPRV.parse().unwrap();
        let (root, _) =
            KeyChainOptions::default().with_hd_private_key(xprv).resolve_root().unwrap();
        assert_eq!(root, KeyMaterial::HdPrivateKey(xprv));

        let address: Address = TESTNET_P2PKH.parse().unwrap();
        let (root, network) =
            KeyChainOptions::default().with_address(address.clone()).resolve_root().unwrap();
        assert_eq!(root, KeyMaterial::Address(address));
        assert_eq!(network, Network::Testnet);

        let mnemonic = Mnemonic::from_phrase(TEST_MNEMONIC).unwrap();
        let (root, network) =
            KeyChainOptions::default().with_mnemonic(mnemonic).resolve_root().unwrap();
        assert_eq!(root.to_string(), TEST_ROOT_TPRV);
        assert_eq!(network, Network::Testnet);

        let public_key: PublicKey = TEST_PUBLIC_KEY_HEX.parse().unwrap();
        let (root, network) = KeyChainOptions::default()
            .with_public_key(public_key)
            .with_network(Network::Dash)
            .resolve_root()
            .unwrap();
        assert_eq!(root, KeyMaterial::PublicKey(public_key));
        assert_eq!(network, Network::Dash);
    }

    #[test]
    fn test_address_root_network() {
        let (root, network) = KeyChainOptions::default()
            .with_address(TEST_LIVENET_XPUB_ADDRESS_0)
            .with_network(Network::Testnet)
            .resolve_root()
            .unwrap();
        assert_eq!(network, Network::Dash);
        assert_eq!(root.to_string(), TEST_LIVENET_XPUB_ADDRESS_0);

        let (root, network) = KeyChainOptions::default()
            .with_address(TESTNET_P2PKH)
            .with_network(Network::Devnet)
            .resolve_root()
            .unwrap();
        assert_eq!(network, Network::Devnet);
        assert_matches!(root, KeyMaterial::Address(address) if address.network == Network::Devnet);
    }

    #[test]
    fn test_first_source_wins() {
        let (root, _) = KeyChainOptions::default()
            .with_address(TESTNET_P2PKH)
            .with_public_key(TEST_PUBLIC_KEY_HEX)
            .resolve_root()
            .unwrap();
        assert_eq!(root.to_string(), TEST_PUBLIC_KEY_HEX);
    }

    #[test]
    fn test_invalid_sources() {
        assert_matches!(
            KeyChainOptions::default().with_mnemonic("one two three").resolve_root(),
            Err(Error::InvalidMnemonic(_))
        );
        assert_matches!(
            KeyChainOptions::default().with_hd_private_key("tprvgarbage").resolve_root(),
            Err(Error::Bip32(_))
        );
        assert_matches!(
            KeyChainOptions::default().with_address("yNotAnAddress").resolve_root(),
            Err(Error::InvalidAddress(_))
        );
        assert_matches!(
            KeyChainOptions::default().with_public_key("02ff").resolve_root(),
            Err(Error::InvalidKey(_))
        );
    }

    #[test]
    fn test_debug_hides_inputs() {
        let options = KeyChainOptions::default().with_mnemonic(TEST_MNEMONIC);
        assert!(!format!("{:?}", options).contains("during"));
    }
}

//! Derivable key chain
//!
//! A [`DerivableKeyChain`] owns one root key and issues per-path key
//! material from it. Every requested path is derived once and kept as a
//! [`PathRecord`] for the lifetime of the key chain, together with its
//! address and its used and watched flags.

mod features;
mod issued_paths;
mod look_ahead;
mod path_record;
mod root_key;

use std::time::{SystemTime, UNIX_EPOCH};

use bitcoin_hashes::{sha256d, Hash};
use dash_network::Network;
use secp256k1::{ecdsa, Message, Secp256k1};

use crate::bip32::DerivationPath;
use crate::error::{Error, Result};

pub use features::parse_identifier;
use issued_paths::IssuedPaths;
pub use look_ahead::{LookAheadOptions, DEFAULT_GAP_LIMIT, ROOT_KEY_PATH};
pub use path_record::{
    ExtendedKey, ExtendedKeyType, KeyMaterial, PathOptions, PathRecord, RootKeyType,
};
pub use root_key::{KeyChainOptions, KeyInput};

/// Hierarchical deterministic key chain over a single root key.
#[derive(Debug, Clone)]
pub struct DerivableKeyChain {
    key_chain_id: String,
    root_key: KeyMaterial,
    network: Network,
    look_ahead: LookAheadOptions,
    issued_paths: IssuedPaths,
    secp: Secp256k1<secp256k1::All>,
}

/// `kc` followed by the first ten hex characters of the double SHA-256 of
/// the root key text form.
pub fn key_chain_id(root_key: &KeyMaterial) -> String {
    let hash = sha256d::Hash::hash(root_key.to_string().as_bytes());
    let mut id = hex::encode(hash.to_byte_array());
    id.truncate(10);
    format!("kc{}", id)
}

fn now_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

impl DerivableKeyChain {
    /// Builds a key chain from `options` and issues its look-ahead paths.
    pub fn new(options: KeyChainOptions) -> Result<Self> {
        let (root_key, network) = options.resolve_root()?;
        let key_chain_id = key_chain_id(&root_key);
        tracing::debug!(
            "Created key chain {} from {} root on {}",
            key_chain_id,
            root_key.key_type(),
            network
        );

        let mut keychain = DerivableKeyChain {
            key_chain_id,
            root_key,
            network,
            look_ahead: options.look_ahead,
            issued_paths: IssuedPaths::default(),
            secp: Secp256k1::new(),
        };
        keychain.maybe_look_ahead()?;
        Ok(keychain)
    }

    /// Identifier derived from the root key.
    pub fn key_chain_id(&self) -> &str {
        &self.key_chain_id
    }

    /// Network the key chain derives addresses for.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Type of the root key.
    pub fn root_key_type(&self) -> RootKeyType {
        self.root_key.key_type()
    }

    /// The root key.
    pub fn get_root_key(&self) -> &KeyMaterial {
        &self.root_key
    }

    /// Look-ahead configuration.
    pub fn look_ahead_options(&self) -> &LookAheadOptions {
        &self.look_ahead
    }

    /// Returns the record of `path`, deriving it on first request.
    ///
    /// HD roots take BIP32 paths (`m/44'/1'/0'/0/0`, `h` is accepted for
    /// hardened steps); records are keyed by the canonical form. Other roots
    /// only accept [`ROOT_KEY_PATH`], which stands for the root key itself.
    ///
    /// Flags set in `options` are applied to the record, cached or not.
    pub fn get_for_path(&mut self, path: &str, options: PathOptions) -> Result<&PathRecord> {
        if path.is_empty() {
            return Err(Error::MissingPath);
        }

        let (canonical, derivation) = if self.root_key.is_derivable() {
            let derivation: DerivationPath = path.parse()?;
            (derivation.to_string(), Some(derivation))
        } else if path == ROOT_KEY_PATH {
            (ROOT_KEY_PATH.to_string(), None)
        } else {
            return Err(Error::NonDerivableRoot(path.to_string()));
        };

        let cached = self.issued_paths.position(&canonical);
        tracing::trace!(
            "Key chain {} get_for_path {} (cached: {})",
            self.key_chain_id,
            canonical,
            cached.is_some()
        );

        let position = match cached {
            Some(position) => position,
            None => {
                let key = self.derive(derivation.as_ref())?;
                let address = key.address(&self.secp, self.network).to_string();
                tracing::debug!(
                    "Key chain {} issued {} for {}",
                    self.key_chain_id,
                    address,
                    canonical
                );
                self.issued_paths.insert(PathRecord {
                    path: canonical,
                    key,
                    address,
                    is_used: false,
                    is_watched: false,
                    issued_time: now_millis(),
                })
            }
        };

        let record = self
            .issued_paths
            .get_mut(position)
            .ok_or(Error::MissingPath)?;
        record.apply(options);
        Ok(record)
    }

    fn derive(&self, path: Option<&DerivationPath>) -> Result<KeyMaterial> {
        let key = match (&self.root_key, path) {
            (KeyMaterial::HdPrivateKey(root), Some(path)) => {
                KeyMaterial::HdPrivateKey(root.derive_priv(&self.secp, path)?)
            }
            (KeyMaterial::HdPublicKey(root), Some(path)) => {
                KeyMaterial::HdPublicKey(root.derive_pub(&self.secp, path)?)
            }
            (root, _) => root.clone(),
        };
        Ok(key)
    }

    /// The record that issued `address`.
    pub fn get_for_address(&self, address: &str) -> Result<&PathRecord> {
        self.issued_paths
            .position_of_address(address)
            .and_then(|position| self.issued_paths.get(position))
            .ok_or_else(|| Error::AddressNotFound(address.to_string()))
    }

    /// All records, in issuance order.
    pub fn get_issued_paths(&self) -> &[PathRecord] {
        self.issued_paths.records()
    }

    /// Addresses of the watched records, in issuance order.
    pub fn get_watched_addresses(&self) -> Vec<&str> {
        self.issued_paths
            .records()
            .iter()
            .filter(|record| record.is_watched)
            .map(|record| record.address.as_str())
            .collect()
    }

    /// The earliest issued record whose address is unused.
    pub fn get_first_unused_address(&self) -> Result<&PathRecord> {
        self.issued_paths
            .records()
            .iter()
            .find(|record| !record.is_used)
            .ok_or(Error::NoUnusedAddress)
    }

    /// Flags the record of `address` as used and refills the look-ahead
    /// window. Returns the paths issued by the refill.
    ///
    /// The flag stays set when the refill fails; the failure is logged and
    /// no path is reported.
    pub fn mark_address_as_used(&mut self, address: &str) -> Result<Vec<String>> {
        let record = self
            .issued_paths
            .position_of_address(address)
            .and_then(|position| self.issued_paths.get_mut(position))
            .ok_or_else(|| Error::AddressNotFound(address.to_string()))?;
        record.is_used = true;
        tracing::debug!(
            "Key chain {} marked {} ({}) as used",
            self.key_chain_id,
            address,
            record.path
        );

        match self.maybe_look_ahead() {
            Ok(issued) => Ok(issued),
            Err(e) => {
                tracing::warn!(
                    "Key chain {} could not refill look-ahead after marking {}: {}",
                    self.key_chain_id,
                    address,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Signs `digest` with the private key of each of `addresses`.
    pub fn sign(&self, digest: &[u8; 32], addresses: &[&str]) -> Result<Vec<ecdsa::Signature>> {
        let message = Message::from_digest(*digest);
        addresses
            .iter()
            .map(|address| {
                let secret = self
                    .get_for_address(address)?
                    .key
                    .secret_key()
                    .ok_or_else(|| Error::MissingPrivateKey(address.to_string()))?;
                Ok(self.secp.sign_ecdsa(&message, &secret))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use assert_matches::assert_matches;

    fn mnemonic_keychain() -> DerivableKeyChain {
        DerivableKeyChain::dummy_testnet()
    }

    #[test]
    fn test_key_chain_ids() {
        assert_eq!(mnemonic_keychain().key_chain_id(), TEST_ROOT_KEY_CHAIN_ID);

        let xpub = DerivableKeyChain::new(
            KeyChainOptions::default().with_hd_public_key(TEST_LIVENET_XPUB),
        )
        .unwrap();
        assert_eq!(xpub.key_chain_id(), TEST_LIVENET_XPUB_KEY_CHAIN_ID);

        let private = DerivableKeyChain::new(
            KeyChainOptions::default().with_private_key(TEST_PRIVATE_KEY_WIF),
        )
        .unwrap();
        assert_eq!(private.key_chain_id(), TEST_PRIVATE_KEY_KEY_CHAIN_ID);

        let public = DerivableKeyChain::new(
            KeyChainOptions::default().with_public_key(TEST_PUBLIC_KEY_HEX),
        )
        .unwrap();
        assert_eq!(public.key_chain_id(), TEST_PUBLIC_KEY_KEY_CHAIN_ID);

        let address =
            DerivableKeyChain::new(KeyChainOptions::default().with_address(TESTNET_P2PKH)).unwrap();
        assert_eq!(address.key_chain_id(), TEST_ADDRESS_KEY_CHAIN_ID);
    }

    #[test]
    fn test_get_for_path_canonicalizes() {
        let mut keychain = mnemonic_keychain();
        let address = keychain
            .get_for_path("m/44h/1h/0h/0/0", PathOptions::default())
            .unwrap()
            .address
            .clone();
        assert_eq!(address, TEST_BIP44_ADDRESS_0);

        let record = keychain.get_for_path("m/44'/1'/0'/0/0", PathOptions::default()).unwrap();
        assert_eq!(record.path, "m/44'/1'/0'/0/0");
        assert_eq!(keychain.get_issued_paths().len(), 1);
    }

    #[test]
    fn test_get_for_path_errors() {
        let mut keychain = mnemonic_keychain();
        assert_matches!(keychain.get_for_path("", PathOptions::default()), Err(Error::MissingPath));
        assert_matches!(
            keychain.get_for_path("m/x", PathOptions::default()),
            Err(Error::Bip32(crate::bip32::Error::InvalidChildNumberFormat))
        );
        assert_matches!(keychain.get_for_path("0", PathOptions::default()), Err(Error::Bip32(_)));
        assert!(keychain.get_issued_paths().is_empty());
    }

    #[test]
    fn test_cached_record_flags() {
        let mut keychain = mnemonic_keychain();
        let first = keychain.get_for_path("m/0", PathOptions::default()).unwrap().clone();
        assert!(!first.is_used);
        assert!(!first.is_watched);

        let second = keychain.get_for_path("m/0", PathOptions::default().with_used(true)).unwrap();
        assert!(second.is_used);
        assert!(!second.is_watched);
        assert_eq!(second.key, first.key);
        assert_eq!(second.issued_time, first.issued_time);

        // unset flags keep their value
        let third =
            keychain.get_for_path("m/0", PathOptions::default().with_watched(true)).unwrap();
        assert!(third.is_used);
        assert!(third.is_watched);
    }

    #[test]
    fn test_root_path_on_hd_root() {
        let mut keychain = mnemonic_keychain();
        let record = keychain.get_for_path("m", PathOptions::default()).unwrap();
        assert_eq!(record.key.to_string(), TEST_ROOT_TPRV);
    }

    #[test]
    fn test_non_derivable_roots() {
        for options in [
            KeyChainOptions::default().with_private_key(TEST_PRIVATE_KEY_HEX),
            KeyChainOptions::default().with_public_key(TEST_PUBLIC_KEY_HEX),
            KeyChainOptions::default().with_address(TEST_PRIVATE_KEY_ADDRESS),
        ] {
            let mut keychain = DerivableKeyChain::new(options).unwrap();
            assert_matches!(
                keychain.get_for_path("m/0", PathOptions::default()),
                Err(Error::NonDerivableRoot(path)) if path == "m/0"
            );
            let root = keychain.get_root_key().clone();
            let record = keychain.get_for_path(ROOT_KEY_PATH, PathOptions::default()).unwrap();
            assert_eq!(record.key, root);
            assert_eq!(record.address, TEST_PRIVATE_KEY_ADDRESS);
        }
    }

    #[test]
    fn test_registry() {
        let mut keychain = mnemonic_keychain();
        assert_matches!(keychain.get_first_unused_address(), Err(Error::NoUnusedAddress));

        keychain.get_for_path("m/0", PathOptions::default().with_watched(false)).unwrap();
        keychain.get_for_path("m/1", PathOptions::default().with_watched(true)).unwrap();
        keychain.get_for_path("m/2", PathOptions::default().with_watched(true)).unwrap();
        assert_eq!(keychain.get_watched_addresses(), &TEST_ROOT_CHILD_ADDRESSES[1..]);

        assert_eq!(keychain.get_first_unused_address().unwrap().path, "m/0");
        keychain.mark_address_as_used(TEST_ROOT_CHILD_ADDRESSES[0]).unwrap();
        assert_eq!(keychain.get_first_unused_address().unwrap().path, "m/1");
        assert!(keychain.get_for_address(TEST_ROOT_CHILD_ADDRESSES[0]).unwrap().is_used);

        assert_matches!(
            keychain.mark_address_as_used(TEST_BIP44_ADDRESS_0),
            Err(Error::AddressNotFound(_))
        );
        assert_matches!(keychain.get_for_address("unknown"), Err(Error::AddressNotFound(_)));
    }

    #[test]
    fn test_mark_used_survives_failed_refill() {
        let mut keychain = mnemonic_keychain();
        let address =
            keychain.get_for_path("m/0/0", PathOptions::default()).unwrap().address.clone();
        keychain.look_ahead = LookAheadOptions::new().with_path("not a path", 1);

        assert_eq!(keychain.mark_address_as_used(&address).unwrap(), Vec::<String>::new());
        assert!(keychain.get_for_address(&address).unwrap().is_used);
        assert_matches!(keychain.maybe_look_ahead(), Err(Error::Bip32(_)));
    }

    #[test]
    fn test_sign() {
        let mut keychain = mnemonic_keychain();
        let record =
            keychain.get_for_path("m/44'/1'/0'/0/0", PathOptions::default()).unwrap().clone();
        let digest = [7u8; 32];

        let signatures = keychain.sign(&digest, &[TEST_BIP44_ADDRESS_0]).unwrap();
        assert_eq!(signatures.len(), 1);
        let public_key = record.key.public_key(&keychain.secp).unwrap();
        assert!(keychain
            .secp
            .verify_ecdsa(&Message::from_digest(digest), &signatures[0], &public_key.inner)
            .is_ok());

        assert_matches!(
            keychain.sign(&digest, &[TEST_BIP44_ADDRESS_1]),
            Err(Error::AddressNotFound(_))
        );
    }

    #[test]
    fn test_sign_requires_private_key() {
        let mut keychain = DerivableKeyChain::new(
            KeyChainOptions::default().with_hd_public_key(TEST_ROOT_TPUB),
        )
        .unwrap();
        let address = keychain.get_for_path("m/0", PathOptions::default()).unwrap().address.clone();
        assert_matches!(keychain.sign(&[1; 32], &[&address]), Err(Error::MissingPrivateKey(_)));
    }
}

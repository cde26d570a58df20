//! Dash Key Chain Library
//!
//! Hierarchical deterministic key chains for Dash wallets: a single root
//! (mnemonic, extended key, plain key or address) from which per-path keys
//! are issued and tracked, with the BIP44 and DIP9 feature roots and the
//! DIP15 contact keys used between identities.
//!
//! ```no_run
//! use dash_keychain::{DerivableKeyChain, KeyChainOptions, LookAheadOptions, Network};
//!
//! # fn main() -> dash_keychain::Result<()> {
//! let options = KeyChainOptions::default()
//!     .with_mnemonic("during develop before curtain hazard rare job language become verb message travel")
//!     .with_network(Network::Testnet)
//!     .with_look_ahead(LookAheadOptions::bip44_account(Network::Testnet, 0));
//! let keychain = DerivableKeyChain::new(options)?;
//! let receive = keychain.get_first_unused_address()?;
//! println!("{} {}", receive.path, receive.address);
//! # Ok(())
//! # }
//! ```

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub mod address;
pub mod bip32;
pub mod dip9;
pub mod error;
pub mod key;
pub mod keychain;
pub mod mnemonic;

pub use address::{Address, AddressType};
pub use bip32::{ChildNumber, DerivationPath, ExtendedPrivKey, ExtendedPubKey};
pub use dash_network::Network;
pub use error::{Error, Result};
pub use key::{PrivateKey, PublicKey};
pub use keychain::{
    DerivableKeyChain, ExtendedKey, ExtendedKeyType, KeyChainOptions, KeyInput, KeyMaterial,
    LookAheadOptions, PathOptions, PathRecord, RootKeyType, DEFAULT_GAP_LIMIT,
};
pub use mnemonic::Mnemonic;

/// Re-export commonly used types
pub mod prelude {
    pub use super::{
        Address, ChildNumber, DerivableKeyChain, DerivationPath, Error, ExtendedKey,
        ExtendedKeyType, ExtendedPrivKey, ExtendedPubKey, KeyChainOptions, Network, PathOptions,
        Result,
    };
}

//! Purpose and coin type constants of the Dash derivation path layout
//!
//! BIP44 accounts live under `m/44'/coin'`, feature trees (DIP9) under
//! `m/9'/coin'`, and contact keys (DIP15) under the feature root at `15'`.

use dash_network::Network;

use crate::bip32::{ChildNumber, DerivationPath};

/// BIP44 purpose
pub const BIP44_PURPOSE: u32 = 44;
/// DIP9 feature purpose
pub const FEATURE_PURPOSE: u32 = 9;
/// DIP15 feature index under the DIP9 root
pub const FEATURE_PURPOSE_DASHPAY: u32 = 15;
/// Registered coin type for Dash
pub const DASH_COIN_TYPE: u32 = 5;
/// Coin type shared by all test networks
pub const TESTNET_COIN_TYPE: u32 = 1;

/// Coin type to use on `network`.
pub fn coin_type(network: Network) -> u32 {
    if network.is_livenet() {
        DASH_COIN_TYPE
    } else {
        TESTNET_COIN_TYPE
    }
}

fn hardened(index: u32) -> ChildNumber {
    ChildNumber::Hardened {
        index,
    }
}

/// `m/44'/coin'`
pub fn bip44_root_path(network: Network) -> DerivationPath {
    DerivationPath::from(vec![hardened(BIP44_PURPOSE), hardened(coin_type(network))])
}

/// `m/9'/coin'`
pub fn dip9_feature_root_path(network: Network) -> DerivationPath {
    DerivationPath::from(vec![hardened(FEATURE_PURPOSE), hardened(coin_type(network))])
}

/// `m/9'/coin'/15'/account'`
pub fn dip15_account_path(network: Network, account_index: u32) -> DerivationPath {
    dip9_feature_root_path(network)
        .extend([hardened(FEATURE_PURPOSE_DASHPAY), hardened(account_index)])
}

/// `m/44'/coin'/account'`
pub fn bip44_account_path(network: Network, account_index: u32) -> DerivationPath {
    bip44_root_path(network).child(hardened(account_index))
}

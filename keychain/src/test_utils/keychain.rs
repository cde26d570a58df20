use super::fixtures::TEST_MNEMONIC;
use crate::keychain::{DerivableKeyChain, KeyChainOptions, LookAheadOptions};
use crate::Network;

impl DerivableKeyChain {
    /// Testnet key chain of the reference mnemonic without look-ahead paths
    pub fn dummy_testnet() -> Self {
        DerivableKeyChain::new(
            KeyChainOptions::default().with_mnemonic(TEST_MNEMONIC).with_network(Network::Testnet),
        )
        .expect("Failed to create test key chain")
    }

    /// Testnet key chain of the reference mnemonic watching BIP44 account 0
    pub fn dummy_bip44_watching() -> Self {
        DerivableKeyChain::new(
            KeyChainOptions::default()
                .with_mnemonic(TEST_MNEMONIC)
                .with_look_ahead(LookAheadOptions::bip44_account(Network::Testnet, 0)),
        )
        .expect("Failed to create test key chain")
    }
}

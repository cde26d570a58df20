//! Look-ahead window maintenance

use dash_keychain::test_utils::*;
use dash_keychain::{
    DerivableKeyChain, Error, KeyChainOptions, LookAheadOptions, Network, PathOptions,
    DEFAULT_GAP_LIMIT,
};

fn with_look_ahead(look_ahead: LookAheadOptions) -> DerivableKeyChain {
    DerivableKeyChain::new(
        KeyChainOptions::default().with_mnemonic(TEST_MNEMONIC).with_look_ahead(look_ahead),
    )
    .unwrap()
}

#[test]
fn test_no_look_ahead_by_default() {
    let keychain =
        DerivableKeyChain::new(KeyChainOptions::default().with_mnemonic(TEST_MNEMONIC)).unwrap();
    assert!(keychain.get_issued_paths().is_empty());
    assert!(matches!(keychain.get_first_unused_address(), Err(Error::NoUnusedAddress)));
}

#[test]
fn test_bip44_account_window() {
    let keychain = with_look_ahead(LookAheadOptions::bip44_account(Network::Testnet, 0));

    let records = keychain.get_issued_paths();
    assert_eq!(records.len(), 2 * DEFAULT_GAP_LIMIT as usize);
    assert_eq!(records[0].path, "m/44'/1'/0'/0/0");
    assert_eq!(records[1].address, TEST_BIP44_ADDRESS_1);
    assert_eq!(records[DEFAULT_GAP_LIMIT as usize].address, TEST_BIP44_CHANGE_ADDRESS_0);
    assert!(records.iter().all(|record| record.is_watched && !record.is_used));
    assert_eq!(keychain.get_watched_addresses().len(), records.len());

    let first = keychain.get_first_unused_address().unwrap();
    assert_eq!(first.address, TEST_BIP44_ADDRESS_0);
}

#[test]
fn test_marking_used_extends_window() {
    let mut keychain = with_look_ahead(
        LookAheadOptions::new().with_watched(true).with_path("m/44'/1'/0'/0", 5),
    );
    assert_eq!(keychain.get_issued_paths().len(), 5);

    let issued = keychain.mark_address_as_used(TEST_BIP44_ADDRESS_1).unwrap();
    // index 1 used: indexes 2..=6 must exist, 5 and 6 are new
    assert_eq!(issued, vec!["m/44'/1'/0'/0/5".to_string(), "m/44'/1'/0'/0/6".to_string()]);
    assert_eq!(keychain.get_issued_paths().len(), 7);
    assert!(keychain.get_for_address(TEST_BIP44_ADDRESS_1).unwrap().is_used);

    // index 0 is still unused and was issued first
    assert_eq!(keychain.get_first_unused_address().unwrap().address, TEST_BIP44_ADDRESS_0);

    // using a lower index does not move the window
    assert!(keychain.mark_address_as_used(TEST_BIP44_ADDRESS_0).unwrap().is_empty());
    assert_eq!(keychain.get_first_unused_address().unwrap().path, "m/44'/1'/0'/0/2");
}

#[test]
fn test_used_flag_through_get_for_path_moves_window() {
    let mut keychain = with_look_ahead(LookAheadOptions::new().with_path("m/0", 3));
    assert!(keychain.get_watched_addresses().is_empty());

    keychain.get_for_path("m/0/2", PathOptions::default().with_used(true)).unwrap();
    let issued = keychain.maybe_look_ahead().unwrap();
    assert_eq!(issued, vec!["m/0/3".to_string(), "m/0/4".to_string(), "m/0/5".to_string()]);
    assert!(keychain.maybe_look_ahead().unwrap().is_empty());
}

#[test]
fn test_window_stops_at_last_normal_index() {
    let mut keychain = with_look_ahead(LookAheadOptions::new().with_path("m/0", 2));
    let first = keychain.get_issued_paths()[0].address.clone();

    let near_top = keychain
        .get_for_path("m/0/2147483646", PathOptions::default())
        .unwrap()
        .address
        .clone();
    let issued = keychain.mark_address_as_used(&near_top).unwrap();
    assert_eq!(issued, vec!["m/0/2147483647".to_string()]);

    let top = keychain.get_issued_paths().last().unwrap().address.clone();
    assert!(keychain.mark_address_as_used(&top).unwrap().is_empty());
    assert!(keychain.get_for_address(&top).unwrap().is_used);

    // the key chain keeps working once the chain is exhausted
    assert!(keychain.mark_address_as_used(&first).unwrap().is_empty());
    assert!(keychain.get_for_address(&first).unwrap().is_used);
    assert!(keychain.maybe_look_ahead().unwrap().is_empty());
}

#[test]
fn test_watched_root_of_non_derivable_key_chain() {
    let keychain = DerivableKeyChain::new(
        KeyChainOptions::default()
            .with_address(TESTNET_P2PKH)
            .with_look_ahead(LookAheadOptions::bip44_account(Network::Testnet, 0)),
    )
    .unwrap();
    let records = keychain.get_issued_paths();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path, "0");
    assert_eq!(keychain.get_watched_addresses(), vec![TESTNET_P2PKH]);
}

#[test]
fn test_invalid_chain_path_fails_construction() {
    let result = DerivableKeyChain::new(
        KeyChainOptions::default()
            .with_mnemonic(TEST_MNEMONIC)
            .with_look_ahead(LookAheadOptions::new().with_path("44'/1'", 1)),
    );
    assert!(matches!(result, Err(Error::Bip32(_))));
}

/// Mnemonic of the reference testnet wallet.
pub const TEST_MNEMONIC: &str =
    "during develop before curtain hazard rare job language become verb message travel";

/// Master key of [`TEST_MNEMONIC`] on testnet, no passphrase.
pub const TEST_ROOT_TPRV: &str = "tprv8ZgxMBicQKsPfEan1JB7NF4STbvnjGvP9318CN7FPGZp5nsUTBqmerxtDVpsJjFufyfkTgoe6QfHcDhMqjN3ZoFKtb8SnXFeubNjQreZSq6";
/// Public view of [`TEST_ROOT_TPRV`].
pub const TEST_ROOT_TPUB: &str = "tpubD6NzVbkrYhZ4YhcZtwqhmeiZ2dSitc7HiLbuUt9YoYNCvH8F5afMqMakPeiGC5LEqAcaTMMMdfvmaEmn7ScdRU4j66y7TNbnPwwDDoPTJa9";
/// Key chain id of any key chain rooted at [`TEST_ROOT_TPRV`].
pub const TEST_ROOT_KEY_CHAIN_ID: &str = "kc5061b8276c";

/// `m/44'/1'`
pub const TEST_BIP44_ROOT_TPRV: &str = "tprv8dtrJNytYHRiZY585hmHGbguS6VjGpK49puSB7oXZjLHcQfrAzQkF4ZCxM2DkEbyY85J4EYcZ8EjT5ZCU8ozB727TDdodbfXet5GkGau2RQ";
/// `m/9'/1'/15'/0'`
pub const TEST_DIP15_ACCOUNT_TPRV: &str = "tprv8hRzmheQujhJN5XP2dj955nAFCKeEoSifJRWuutdbwWRtusdDQ426jbp75EqErUSuTxmPyxYmP1TpcF5qdxGhXLNXRLMGsRLG6NFCv1WnaQ";

/// `m/44'/1'/0'/0/0`
pub const TEST_BIP44_ADDRESS_0: &str = "yNfUebksUc5HoSfg8gv98ruC3jUNJUM8pT";
/// `m/44'/1'/0'/0/1`
pub const TEST_BIP44_ADDRESS_1: &str = "yRf8x9bov39e2vHtibjeG35ZNF4BCpSZGe";
/// `m/44'/1'/0'/1/0`
pub const TEST_BIP44_CHANGE_ADDRESS_0: &str = "yTa2L2ZJr48sbJCnYP96RwW1D4ceeCdyHS";
/// `m/0`, `m/1` and `m/2`
pub const TEST_ROOT_CHILD_ADDRESSES: [&str; 3] = [
    "ybQDfNwiDjk8ZH5UUmHQzAMEmjbrbK5dAj",
    "yhFX5rseJPitV45HUCaa9haeGHtLuooBaq",
    "yhqxsmYk6jfoGWf1hJKq7d4U2cGHCgzpFU",
];

/// Livenet master public key of [`TEST_MNEMONIC`].
pub const TEST_LIVENET_XPUB: &str = "xpub661MyMwAqRbcGuRiSkrcZjPBhWM4uDcEAi1c8L6QTdcKAzTY1MpGguuv9cdUfaP13G5fqmqV6a6it4HAiamPY2cS2WDomqwYozLoTk9PydE";
/// Key chain id of [`TEST_LIVENET_XPUB`].
pub const TEST_LIVENET_XPUB_KEY_CHAIN_ID: &str = "kc5320a8f8cb";
/// `m/0` of [`TEST_LIVENET_XPUB`].
pub const TEST_LIVENET_XPUB_ADDRESS_0: &str = "XqmceRsGnC64DY9vuuy1x8vtVT7V2njtnG";

/// Raw private key.
pub const TEST_PRIVATE_KEY_HEX: &str =
    "0c28fca386c7a227600b2fe50b7cae11ec86d3bf1fbe471be89827e19d72aa1d";
/// [`TEST_PRIVATE_KEY_HEX`] as compressed testnet WIF.
pub const TEST_PRIVATE_KEY_WIF: &str = "cMzLdeGd5vEqxB8B6VFQoRopQ3sLAAvEzDAoQgvX54xwofSWj1fx";
/// Compressed public key of [`TEST_PRIVATE_KEY_HEX`].
pub const TEST_PUBLIC_KEY_HEX: &str =
    "02d0de0aaeaefad02b8bdc8a01a1b8b11c696bd3d66a2c5f10780d95b7df42645c";
/// Testnet address of [`TEST_PUBLIC_KEY_HEX`].
pub const TEST_PRIVATE_KEY_ADDRESS: &str = "yg7w7RQmGQa8A8tRoe9wLP65jDhzXLkAW7";
/// Key chain id of a private key root built from [`TEST_PRIVATE_KEY_HEX`].
pub const TEST_PRIVATE_KEY_KEY_CHAIN_ID: &str = "kcb764883871";
/// Key chain id of a public key root built from [`TEST_PUBLIC_KEY_HEX`].
pub const TEST_PUBLIC_KEY_KEY_CHAIN_ID: &str = "kce55517ab27";
/// Key chain id of an address root built from [`TESTNET_P2PKH`].
pub const TEST_ADDRESS_KEY_CHAIN_ID: &str = "kce62361331e";

/// A testnet P2PKH address.
pub const TESTNET_P2PKH: &str = TEST_BIP44_ADDRESS_0;
/// A testnet P2SH address.
pub const TESTNET_P2SH: &str = "93XuwSLdSaBKGxMbVSe2Rhv3tdykkfVBFn";

/// Identity of the local user in contact key tests.
pub const TEST_USER_ID: &str = "555d3854c910b7dee436869c4724bed2fe0784e198b8a39f02bbb49d8ebcfc3a";
/// Identity of the contact in contact key tests.
pub const TEST_CONTACT_ID: &str =
    "a137439f36d04a15474ff7423e4b904a14373fafb37a41db74c84f1dbb5c89a5";
/// Contact key addresses for indexes 0 and 1, account 0, from user to contact.
pub const TEST_DIP15_ADDRESSES: [&str; 2] =
    ["yhFuhZsqZLLrA3gBR96Pv8N53FxvKSJi9X", "yb81kZsCGgyDUUHwZp19JtQcGwKEH1C9TV"];
/// Contact key address for index 0 with user and contact swapped.
pub const TEST_DIP15_REVERSED_ADDRESS: &str = "yUkd5EVtLHQHA8MMecyC3Lkaey5FpYNG7B";
/// Private key of the index 0 contact key from user to contact.
pub const TEST_DIP15_PRIVATE_KEY_HEX: &str =
    "6baa9250c5d45a7e24b6949a2daa04e0922873849e4a7b5330d06724d0dfe9aa";

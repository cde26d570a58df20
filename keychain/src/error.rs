//! Error types for the key chain library

use thiserror::Error;

use crate::bip32;

/// Result type alias for key chain operations
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur in key chain operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// None of the accepted root key sources was supplied
    #[error(
        "Expected one of mnemonic, HDPrivateKey, HDPublicKey, privateKey, publicKey or address to be provided"
    )]
    MissingRootKey,

    /// `get_for_path` was called without a path
    #[error("Expected a non-empty path")]
    MissingPath,

    /// The root key is not an extended key and cannot derive `path`
    #[error("Root key cannot derive children, only path 0 is available. Requested path: {0}")]
    NonDerivableRoot(String),

    /// Every issued path is already used
    #[error("No unused address available, derive further paths first")]
    NoUnusedAddress,

    /// No issued path produced the given address
    #[error("No issued path matches address {0}")]
    AddressNotFound(String),

    /// The record for an address holds no private key
    #[error("No private key available for address {0}")]
    MissingPrivateKey(String),

    /// Invalid mnemonic phrase
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Invalid key encoding
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Invalid address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid 256-bit identity identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// BIP32 related error
    #[error("BIP32 error: {0}")]
    Bip32(#[from] bip32::Error),

    /// Secp256k1 error
    #[error("Secp256k1 error: {0}")]
    Secp256k1(#[from] secp256k1::Error),
}

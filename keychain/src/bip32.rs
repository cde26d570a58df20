//! BIP32 Implementation
//!
//! Implementation of BIP32 hierarchical deterministic wallets, as defined
//! at <https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki>,
//! extended with the 256-bit child indexes of DIP14
//! (<https://github.com/dashpay/dips/blob/master/dip-0014.md>).

use core::fmt;
use core::str::FromStr;
use std::error;

use bitcoin_hashes::{hash160, sha512, Hash, HashEngine, Hmac, HmacEngine};
use dash_network::Network;
use secp256k1::{self, PublicKey, Scalar, Secp256k1, SecretKey};

/// Version bytes for xprv: livenet extended private key
pub const VERSION_XPRV: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];
/// Version bytes for xpub: livenet extended public key
pub const VERSION_XPUB: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];
/// Version bytes for tprv: test network extended private key
pub const VERSION_TPRV: [u8; 4] = [0x04, 0x35, 0x83, 0x94];
/// Version bytes for tpub: test network extended public key
pub const VERSION_TPUB: [u8; 4] = [0x04, 0x35, 0x87, 0xCF];
/// Version bytes for dpms: livenet DIP14 extended private key
pub const VERSION_DIP14_MAINNET_PRIV: [u8; 4] = [0x0E, 0xEC, 0xF0, 0x2E];
/// Version bytes for dpmp: livenet DIP14 extended public key
pub const VERSION_DIP14_MAINNET_PUB: [u8; 4] = [0x0E, 0xEC, 0xEF, 0xC5];
/// Version bytes for dpts: test network DIP14 extended private key
pub const VERSION_DIP14_TESTNET_PRIV: [u8; 4] = [0x0E, 0xED, 0x27, 0x74];
/// Version bytes for dptp: test network DIP14 extended public key
pub const VERSION_DIP14_TESTNET_PUB: [u8; 4] = [0x0E, 0xED, 0x27, 0x0B];

const BIP32_ENCODED_LEN: usize = 78;
const DIP14_ENCODED_LEN: usize = 107;

/// A chain code
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ChainCode([u8; 32]);

impl ChainCode {
    /// Returns the raw chain code bytes.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    fn from_slice(slice: &[u8]) -> ChainCode {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&slice[..32]);
        ChainCode(bytes)
    }
}

impl From<[u8; 32]> for ChainCode {
    fn from(bytes: [u8; 32]) -> Self {
        ChainCode(bytes)
    }
}

impl AsRef<[u8]> for ChainCode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A fingerprint
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Fingerprint([u8; 4]);

impl Fingerprint {
    /// Returns the raw fingerprint bytes.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl From<[u8; 4]> for Fingerprint {
    fn from(bytes: [u8; 4]) -> Self {
        Fingerprint(bytes)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A child number for a derived key
#[derive(Copy, Clone, PartialEq, Eq, Debug, PartialOrd, Ord, Hash)]
pub enum ChildNumber {
    /// Non-hardened key
    Normal {
        /// Key index, within [0, 2^31 - 1]
        index: u32,
    },
    /// Hardened key
    Hardened {
        /// Key index, within [0, 2^31 - 1]
        index: u32,
    },
    /// Non-hardened key with a DIP14 256-bit index
    Normal256 {
        /// Big-endian key index
        index: [u8; 32],
    },
    /// Hardened key with a DIP14 256-bit index
    Hardened256 {
        /// Big-endian key index
        index: [u8; 32],
    },
}

impl ChildNumber {
    /// Create a [`Normal`] from an index, returns an error if the index is not within
    /// [0, 2^31 - 1].
    ///
    /// [`Normal`]: #variant.Normal
    pub fn from_normal_idx(index: u32) -> Result<Self, Error> {
        if index & (1 << 31) == 0 {
            Ok(ChildNumber::Normal {
                index,
            })
        } else {
            Err(Error::InvalidChildNumber(index))
        }
    }

    /// Create a [`Hardened`] from an index, returns an error if the index is not within
    /// [0, 2^31 - 1].
    ///
    /// [`Hardened`]: #variant.Hardened
    pub fn from_hardened_idx(index: u32) -> Result<Self, Error> {
        if index & (1 << 31) == 0 {
            Ok(ChildNumber::Hardened {
                index,
            })
        } else {
            Err(Error::InvalidChildNumber(index))
        }
    }

    /// Returns `true` if the child number is a hardened value.
    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildNumber::Hardened { .. } | ChildNumber::Hardened256 { .. })
    }

    /// Returns `true` if the child number is a non-hardened value.
    pub fn is_normal(&self) -> bool {
        !self.is_hardened()
    }

    /// Returns `true` if the child number carries a DIP14 256-bit index.
    pub fn is_256_bits(&self) -> bool {
        matches!(self, ChildNumber::Normal256 { .. } | ChildNumber::Hardened256 { .. })
    }

    fn input_index(&self, engine: &mut HmacEngine<sha512::Hash>) {
        match self {
            ChildNumber::Normal {
                index,
            } => engine.input(&index.to_be_bytes()),
            ChildNumber::Hardened {
                index,
            } => engine.input(&(index | (1 << 31)).to_be_bytes()),
            ChildNumber::Normal256 {
                index,
            }
            | ChildNumber::Hardened256 {
                index,
            } => engine.input(index),
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChildNumber::Hardened {
                index,
            } => write!(f, "{}'", index),
            ChildNumber::Normal {
                index,
            } => write!(f, "{}", index),
            ChildNumber::Hardened256 {
                index,
            } => write!(f, "0x{}'", hex::encode(index)),
            ChildNumber::Normal256 {
                index,
            } => write!(f, "0x{}", hex::encode(index)),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    fn from_str(inp: &str) -> Result<ChildNumber, Error> {
        let is_hardened = inp.chars().last().is_some_and(|l| l == '\'' || l == 'h');
        let body = if is_hardened {
            &inp[..inp.len() - 1]
        } else {
            inp
        };

        if let Some(hex_index) = body.strip_prefix("0x") {
            if hex_index.len() != 64 {
                return Err(Error::InvalidChildNumberFormat);
            }
            let mut index = [0u8; 32];
            hex::decode_to_slice(hex_index, &mut index)
                .map_err(|_| Error::InvalidChildNumberFormat)?;
            return Ok(if is_hardened {
                ChildNumber::Hardened256 {
                    index,
                }
            } else {
                ChildNumber::Normal256 {
                    index,
                }
            });
        }

        let index = body.parse().map_err(|_| Error::InvalidChildNumberFormat)?;
        if is_hardened {
            ChildNumber::from_hardened_idx(index)
        } else {
            ChildNumber::from_normal_idx(index)
        }
    }
}

/// A BIP-32 derivation path.
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The master path `m`.
    pub fn master() -> DerivationPath {
        DerivationPath(Vec::new())
    }

    /// Number of derivation steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the master path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Create a new [DerivationPath] that is a child of this one.
    pub fn child(&self, cn: ChildNumber) -> DerivationPath {
        let mut path = self.0.clone();
        path.push(cn);
        DerivationPath(path)
    }

    /// Appends a child number in place.
    pub fn push(&mut self, cn: ChildNumber) {
        self.0.push(cn);
    }

    /// Concatenate `self` with `path` and return the resulting new path.
    pub fn extend<T: AsRef<[ChildNumber]>>(&self, path: T) -> DerivationPath {
        let mut new_path = self.clone();
        new_path.0.extend_from_slice(path.as_ref());
        new_path
    }

    /// Returns the last step of the path, if any.
    pub fn last(&self) -> Option<&ChildNumber> {
        self.0.last()
    }

    /// Returns the path without its last step, if any.
    pub fn parent(&self) -> Option<DerivationPath> {
        let (_, rest) = self.0.split_last()?;
        Some(DerivationPath(rest.to_vec()))
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(numbers: Vec<ChildNumber>) -> Self {
        DerivationPath(numbers)
    }
}

impl From<&[ChildNumber]> for DerivationPath {
    fn from(numbers: &[ChildNumber]) -> Self {
        DerivationPath(numbers.to_vec())
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = core::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath, Error> {
        let mut parts = path.split('/');
        // First parts must be `m`.
        if parts.next() != Some("m") {
            return Err(Error::InvalidDerivationPathFormat);
        }

        let ret: Result<Vec<ChildNumber>, Error> = parts
            .map(|part| {
                if part.is_empty() {
                    Err(Error::InvalidDerivationPathFormat)
                } else {
                    part.parse()
                }
            })
            .collect();
        Ok(DerivationPath(ret?))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("m")?;
        for cn in self.0.iter() {
            f.write_str("/")?;
            fmt::Display::fmt(cn, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

/// A BIP32 error
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// A pk->pk derivation was attempted on a hardened key
    CannotDeriveFromHardenedKey,
    /// A secp256k1 error occurred
    Secp256k1(secp256k1::Error),
    /// The HMAC output was not a valid tweak for the parent key
    InvalidTweak,
    /// A child number was provided that was out of range
    InvalidChildNumber(u32),
    /// Invalid childnumber format.
    InvalidChildNumberFormat,
    /// Invalid derivation path format.
    InvalidDerivationPathFormat,
    /// Unknown version magic bytes
    UnknownVersion([u8; 4]),
    /// Encoded extended key data has wrong length
    WrongExtendedKeyLength(usize),
    /// Base58 decoding error
    Base58(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::CannotDeriveFromHardenedKey => {
                f.write_str("cannot derive hardened key from public key")
            }
            Error::Secp256k1(e) => fmt::Display::fmt(e, f),
            Error::InvalidTweak => f.write_str("derived tweak is out of the curve order"),
            Error::InvalidChildNumber(n) => {
                write!(f, "child number {} is invalid (not within [0, 2^31 - 1])", n)
            }
            Error::InvalidChildNumberFormat => f.write_str("invalid child number format"),
            Error::InvalidDerivationPathFormat => f.write_str("invalid derivation path format"),
            Error::UnknownVersion(bytes) => {
                write!(f, "unknown version magic bytes: {}", hex::encode(bytes))
            }
            Error::WrongExtendedKeyLength(len) => {
                write!(f, "encoded extended key data has wrong length {}", len)
            }
            Error::Base58(e) => write!(f, "base58 encoding error: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        if let Error::Secp256k1(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Error {
        Error::Secp256k1(e)
    }
}

/// Extended private key
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ExtendedPrivKey {
    /// The network this key is to be used on
    pub network: Network,
    /// How many derivations this key is from the master (which is 0)
    pub depth: u8,
    /// Fingerprint of the parent key (0 for master)
    pub parent_fingerprint: Fingerprint,
    /// Child number of the key used to derive from parent (0 for master)
    pub child_number: ChildNumber,
    /// Private key
    pub private_key: SecretKey,
    /// Chain code
    pub chain_code: ChainCode,
}

impl fmt::Debug for ExtendedPrivKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExtendedPrivKey")
            .field("network", &self.network)
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_number", &self.child_number)
            .field("private_key", &"<hidden>")
            .finish()
    }
}

/// Extended public key
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct ExtendedPubKey {
    /// The network this key is to be used on
    pub network: Network,
    /// How many derivations this key is from the master (which is 0)
    pub depth: u8,
    /// Fingerprint of the parent key
    pub parent_fingerprint: Fingerprint,
    /// Child number of the key used to derive from parent (0 for master)
    pub child_number: ChildNumber,
    /// Public key
    pub public_key: PublicKey,
    /// Chain code
    pub chain_code: ChainCode,
}

fn split_hmac(engine: HmacEngine<sha512::Hash>) -> Result<(Scalar, ChainCode), Error> {
    let hmac_result: Hmac<sha512::Hash> = Hmac::from_engine(engine);
    let bytes = hmac_result.to_byte_array();
    let mut tweak = [0u8; 32];
    tweak.copy_from_slice(&bytes[..32]);
    let tweak = Scalar::from_be_bytes(tweak).map_err(|_| Error::InvalidTweak)?;
    Ok((tweak, ChainCode::from_slice(&bytes[32..])))
}

fn version_network(version: [u8; 4]) -> Result<(Network, bool), Error> {
    // (network, is_private)
    match version {
        VERSION_XPRV | VERSION_DIP14_MAINNET_PRIV => Ok((Network::Dash, true)),
        VERSION_XPUB | VERSION_DIP14_MAINNET_PUB => Ok((Network::Dash, false)),
        VERSION_TPRV | VERSION_DIP14_TESTNET_PRIV => Ok((Network::Testnet, true)),
        VERSION_TPUB | VERSION_DIP14_TESTNET_PUB => Ok((Network::Testnet, false)),
        other => Err(Error::UnknownVersion(other)),
    }
}

fn version_for(network: Network, private: bool, dip14: bool) -> [u8; 4] {
    match (network.is_livenet(), private, dip14) {
        (true, true, false) => VERSION_XPRV,
        (true, false, false) => VERSION_XPUB,
        (false, true, false) => VERSION_TPRV,
        (false, false, false) => VERSION_TPUB,
        (true, true, true) => VERSION_DIP14_MAINNET_PRIV,
        (true, false, true) => VERSION_DIP14_MAINNET_PUB,
        (false, true, true) => VERSION_DIP14_TESTNET_PRIV,
        (false, false, true) => VERSION_DIP14_TESTNET_PUB,
    }
}

/// Writes the shared header: version, depth, parent fingerprint and child number.
fn encode_header(
    ret: &mut Vec<u8>,
    network: Network,
    private: bool,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: &ChildNumber,
) {
    ret.extend_from_slice(&version_for(network, private, child_number.is_256_bits()));
    ret.push(depth);
    ret.extend_from_slice(&parent_fingerprint.0);
    match child_number {
        ChildNumber::Normal {
            index,
        } => ret.extend_from_slice(&index.to_be_bytes()),
        ChildNumber::Hardened {
            index,
        } => ret.extend_from_slice(&(index | (1 << 31)).to_be_bytes()),
        ChildNumber::Normal256 {
            index,
        } => {
            ret.push(0);
            ret.extend_from_slice(index);
        }
        ChildNumber::Hardened256 {
            index,
        } => {
            ret.push(1);
            ret.extend_from_slice(index);
        }
    }
}

struct DecodedHeader<'a> {
    network: Network,
    private: bool,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: ChildNumber,
    chain_code: ChainCode,
    key_data: &'a [u8],
}

fn decode_header(data: &[u8]) -> Result<DecodedHeader<'_>, Error> {
    if data.len() != BIP32_ENCODED_LEN && data.len() != DIP14_ENCODED_LEN {
        return Err(Error::WrongExtendedKeyLength(data.len()));
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&data[0..4]);
    let (network, private) = version_network(version)?;
    let dip14 = matches!(
        version,
        VERSION_DIP14_MAINNET_PRIV
            | VERSION_DIP14_MAINNET_PUB
            | VERSION_DIP14_TESTNET_PRIV
            | VERSION_DIP14_TESTNET_PUB
    );
    let expected_len = if dip14 {
        DIP14_ENCODED_LEN
    } else {
        BIP32_ENCODED_LEN
    };
    if data.len() != expected_len {
        return Err(Error::WrongExtendedKeyLength(data.len()));
    }

    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&data[5..9]);

    let (child_number, rest) = if dip14 {
        let mut index = [0u8; 32];
        index.copy_from_slice(&data[10..42]);
        let child_number = if data[9] == 0 {
            ChildNumber::Normal256 {
                index,
            }
        } else {
            ChildNumber::Hardened256 {
                index,
            }
        };
        (child_number, &data[42..])
    } else {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&data[9..13]);
        let raw = u32::from_be_bytes(raw);
        let child_number = if raw & (1 << 31) == 0 {
            ChildNumber::Normal {
                index: raw,
            }
        } else {
            ChildNumber::Hardened {
                index: raw ^ (1 << 31),
            }
        };
        (child_number, &data[13..])
    };

    Ok(DecodedHeader {
        network,
        private,
        depth: data[4],
        parent_fingerprint: Fingerprint(parent_fingerprint),
        child_number,
        chain_code: ChainCode::from_slice(&rest[..32]),
        key_data: &rest[32..],
    })
}

impl ExtendedPrivKey {
    /// Construct a new master key from a seed value
    pub fn new_master(network: Network, seed: &[u8]) -> Result<ExtendedPrivKey, Error> {
        let mut hmac_engine: HmacEngine<sha512::Hash> = HmacEngine::new(b"Bitcoin seed");
        hmac_engine.input(seed);
        let hmac_result: Hmac<sha512::Hash> = Hmac::from_engine(hmac_engine);
        let bytes = hmac_result.to_byte_array();

        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&bytes[..32]);

        Ok(ExtendedPrivKey {
            network,
            depth: 0,
            parent_fingerprint: Default::default(),
            child_number: ChildNumber::Normal {
                index: 0,
            },
            private_key: SecretKey::from_slice(&private_key)?,
            chain_code: ChainCode::from_slice(&bytes[32..]),
        })
    }

    /// Attempts to derive an extended private key from a path.
    ///
    /// The `path` argument can be both of type `DerivationPath` or `Vec<ChildNumber>`.
    pub fn derive_priv<C: secp256k1::Signing, P: AsRef<[ChildNumber]>>(
        &self,
        secp: &Secp256k1<C>,
        path: &P,
    ) -> Result<ExtendedPrivKey, Error> {
        let mut sk: ExtendedPrivKey = *self;
        for cnum in path.as_ref() {
            sk = sk.ckd_priv(secp, *cnum)?;
        }
        Ok(sk)
    }

    /// Private->Private child key derivation
    pub fn ckd_priv<C: secp256k1::Signing>(
        &self,
        secp: &Secp256k1<C>,
        i: ChildNumber,
    ) -> Result<ExtendedPrivKey, Error> {
        let mut hmac_engine: HmacEngine<sha512::Hash> = HmacEngine::new(&self.chain_code.0);
        if i.is_hardened() {
            // Hardened key: use only secret data to prevent public derivation
            hmac_engine.input(&[0u8]);
            hmac_engine.input(&self.private_key.secret_bytes());
        } else {
            // Non-hardened key: compute public data and use that
            hmac_engine.input(&PublicKey::from_secret_key(secp, &self.private_key).serialize());
        }
        i.input_index(&mut hmac_engine);

        let (tweak, chain_code) = split_hmac(hmac_engine)?;
        let private_key = self.private_key.add_tweak(&tweak)?;

        Ok(ExtendedPrivKey {
            network: self.network,
            depth: self.depth.wrapping_add(1),
            parent_fingerprint: self.fingerprint(secp),
            child_number: i,
            private_key,
            chain_code,
        })
    }

    /// Returns the HASH160 of the public key belonging to the xpriv
    pub fn identifier<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>) -> [u8; 20] {
        ExtendedPubKey::from_priv(secp, self).identifier()
    }

    /// Returns the first four bytes of the identifier
    pub fn fingerprint<C: secp256k1::Signing>(&self, secp: &Secp256k1<C>) -> Fingerprint {
        ExtendedPubKey::from_priv(secp, self).fingerprint()
    }

    /// Extended private key binary encoding according to BIP 32, or DIP14
    /// when the child number is 256 bits wide.
    pub fn encode(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(DIP14_ENCODED_LEN);
        encode_header(
            &mut ret,
            self.network,
            true,
            self.depth,
            self.parent_fingerprint,
            &self.child_number,
        );
        ret.extend_from_slice(&self.chain_code.0);
        ret.push(0);
        ret.extend_from_slice(&self.private_key.secret_bytes());
        ret
    }

    /// Decoding extended private key from binary data according to BIP 32 or DIP14
    pub fn decode(data: &[u8]) -> Result<ExtendedPrivKey, Error> {
        let header = decode_header(data)?;
        if !header.private {
            return Err(Error::UnknownVersion([data[0], data[1], data[2], data[3]]));
        }
        if header.key_data[0] != 0 {
            return Err(Error::Secp256k1(secp256k1::Error::InvalidSecretKey));
        }
        let mut private_key = [0u8; 32];
        private_key.copy_from_slice(&header.key_data[1..33]);

        Ok(ExtendedPrivKey {
            network: header.network,
            depth: header.depth,
            parent_fingerprint: header.parent_fingerprint,
            child_number: header.child_number,
            private_key: SecretKey::from_slice(&private_key)?,
            chain_code: header.chain_code,
        })
    }
}

impl ExtendedPubKey {
    /// Derives a public key from a private key
    pub fn from_priv<C: secp256k1::Signing>(
        secp: &Secp256k1<C>,
        sk: &ExtendedPrivKey,
    ) -> ExtendedPubKey {
        ExtendedPubKey {
            network: sk.network,
            depth: sk.depth,
            parent_fingerprint: sk.parent_fingerprint,
            child_number: sk.child_number,
            public_key: PublicKey::from_secret_key(secp, &sk.private_key),
            chain_code: sk.chain_code,
        }
    }

    /// Attempts to derive an extended public key from a path.
    ///
    /// The `path` argument can be both of type `DerivationPath` or `Vec<ChildNumber>`.
    pub fn derive_pub<C: secp256k1::Verification, P: AsRef<[ChildNumber]>>(
        &self,
        secp: &Secp256k1<C>,
        path: &P,
    ) -> Result<ExtendedPubKey, Error> {
        let mut pk: ExtendedPubKey = *self;
        for cnum in path.as_ref() {
            pk = pk.ckd_pub(secp, *cnum)?
        }
        Ok(pk)
    }

    /// Public->Public child key derivation
    pub fn ckd_pub<C: secp256k1::Verification>(
        &self,
        secp: &Secp256k1<C>,
        i: ChildNumber,
    ) -> Result<ExtendedPubKey, Error> {
        if i.is_hardened() {
            return Err(Error::CannotDeriveFromHardenedKey);
        }

        let mut hmac_engine: HmacEngine<sha512::Hash> = HmacEngine::new(&self.chain_code.0);
        hmac_engine.input(&self.public_key.serialize());
        i.input_index(&mut hmac_engine);

        let (tweak, chain_code) = split_hmac(hmac_engine)?;
        let public_key = self.public_key.add_exp_tweak(secp, &tweak)?;

        Ok(ExtendedPubKey {
            network: self.network,
            depth: self.depth.wrapping_add(1),
            parent_fingerprint: self.fingerprint(),
            child_number: i,
            public_key,
            chain_code,
        })
    }

    /// Returns the HASH160 of the chaincode
    pub fn identifier(&self) -> [u8; 20] {
        hash160::Hash::hash(&self.public_key.serialize()).to_byte_array()
    }

    /// Returns the first four bytes of the identifier
    pub fn fingerprint(&self) -> Fingerprint {
        let identifier = self.identifier();
        Fingerprint([identifier[0], identifier[1], identifier[2], identifier[3]])
    }

    /// Extended public key binary encoding according to BIP 32, or DIP14
    /// when the child number is 256 bits wide.
    pub fn encode(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(DIP14_ENCODED_LEN);
        encode_header(
            &mut ret,
            self.network,
            false,
            self.depth,
            self.parent_fingerprint,
            &self.child_number,
        );
        ret.extend_from_slice(&self.chain_code.0);
        ret.extend_from_slice(&self.public_key.serialize());
        ret
    }

    /// Decoding extended public key from binary data according to BIP 32 or DIP14
    pub fn decode(data: &[u8]) -> Result<ExtendedPubKey, Error> {
        let header = decode_header(data)?;
        if header.private {
            return Err(Error::UnknownVersion([data[0], data[1], data[2], data[3]]));
        }

        Ok(ExtendedPubKey {
            network: header.network,
            depth: header.depth,
            parent_fingerprint: header.parent_fingerprint,
            child_number: header.child_number,
            public_key: PublicKey::from_slice(header.key_data)?,
            chain_code: header.chain_code,
        })
    }
}

impl fmt::Display for ExtendedPrivKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&base58ck::encode_check(&self.encode()))
    }
}

impl FromStr for ExtendedPrivKey {
    type Err = Error;

    fn from_str(inp: &str) -> Result<ExtendedPrivKey, Error> {
        let data = base58ck::decode_check(inp).map_err(|e| Error::Base58(e.to_string()))?;
        ExtendedPrivKey::decode(&data)
    }
}

impl fmt::Display for ExtendedPubKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&base58ck::encode_check(&self.encode()))
    }
}

impl FromStr for ExtendedPubKey {
    type Err = Error;

    fn from_str(inp: &str) -> Result<ExtendedPubKey, Error> {
        let data = base58ck::decode_check(inp).map_err(|e| Error::Base58(e.to_string()))?;
        ExtendedPubKey::decode(&data)
    }
}

//! Hardened feature roots (BIP44, DIP9) and DIP15 contact keys
//!
//! DIP15 contact keys live at
//! `m/9'/coin'/15'/account'/(user id)'/(contact id)'/index`, where both
//! identities are 256-bit DIP14 hardened children. The last step is not
//! hardened, so whoever holds the public key of the contact root can derive
//! every payment key of the relationship.

use super::path_record::{ExtendedKey, ExtendedKeyType, PathOptions};
use super::DerivableKeyChain;
use crate::bip32::{ChildNumber, ExtendedPrivKey};
use crate::dip9;
use crate::error::{Error, Result};

/// Parses a 256-bit identity identifier given as 64 hex characters.
pub fn parse_identifier(id: &str) -> Result<[u8; 32]> {
    let hex_id = id.strip_prefix("0x").unwrap_or(id);
    if hex_id.len() != 64 {
        return Err(Error::InvalidIdentifier(format!(
            "{}: expected 64 hex characters, got {}",
            id,
            hex_id.len()
        )));
    }
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(hex_id, &mut bytes)
        .map_err(|e| Error::InvalidIdentifier(format!("{}: {}", id, e)))?;
    Ok(bytes)
}

impl DerivableKeyChain {
    fn hardened_root(&mut self, path: String) -> Result<ExtendedPrivKey> {
        let record = self.get_for_path(&path, PathOptions::default())?;
        record
            .key
            .as_extended_priv()
            .copied()
            .ok_or_else(|| Error::MissingPrivateKey(record.address.clone()))
    }

    /// The BIP44 root `m/44'/coin'`.
    pub fn get_hardened_bip44_hd_key(&mut self) -> Result<ExtendedPrivKey> {
        self.hardened_root(dip9::bip44_root_path(self.network).to_string())
    }

    /// The DIP9 feature root `m/9'/coin'`.
    pub fn get_hardened_dip9_feature_hd_key(&mut self) -> Result<ExtendedPrivKey> {
        self.hardened_root(dip9::dip9_feature_root_path(self.network).to_string())
    }

    /// The DIP15 account root `m/9'/coin'/15'/account'`.
    ///
    /// Derived privately from the feature root; the public view is taken from
    /// the result.
    pub fn get_hardened_dip15_account_key(
        &mut self,
        account_index: u32,
        key_type: ExtendedKeyType,
    ) -> Result<ExtendedKey> {
        let account_key = self.dip15_account_priv(account_index)?;
        Ok(ExtendedKey::from_priv(&self.secp, account_key, key_type))
    }

    fn dip15_account_priv(&mut self, account_index: u32) -> Result<ExtendedPrivKey> {
        let feature_key = self.get_hardened_dip9_feature_hd_key()?;
        let key = feature_key
            .ckd_priv(&self.secp, ChildNumber::from_hardened_idx(dip9::FEATURE_PURPOSE_DASHPAY)?)?
            .ckd_priv(&self.secp, ChildNumber::from_hardened_idx(account_index)?)?;
        Ok(key)
    }

    /// The root of the keys used from `user_unique_id` towards
    /// `contact_unique_id`: `account'/user'/contact'` below the DIP15 root.
    ///
    /// The direction matters, swapping the two identities gives the keys of
    /// the opposite direction.
    pub fn get_dip15_contact_root_key(
        &mut self,
        user_unique_id: &str,
        contact_unique_id: &str,
        account_index: u32,
        key_type: ExtendedKeyType,
    ) -> Result<ExtendedKey> {
        let key = self.dip15_contact_root_priv(user_unique_id, contact_unique_id, account_index)?;
        Ok(ExtendedKey::from_priv(&self.secp, key, key_type))
    }

    fn dip15_contact_root_priv(
        &mut self,
        user_unique_id: &str,
        contact_unique_id: &str,
        account_index: u32,
    ) -> Result<ExtendedPrivKey> {
        let user = ChildNumber::Hardened256 {
            index: parse_identifier(user_unique_id)?,
        };
        let contact = ChildNumber::Hardened256 {
            index: parse_identifier(contact_unique_id)?,
        };
        let account_key = self.dip15_account_priv(account_index)?;
        Ok(account_key.derive_priv(&self.secp, &[user, contact])?)
    }

    /// The DIP15 contact key at `index`.
    pub fn get_dip15_extended_key(
        &mut self,
        user_unique_id: &str,
        contact_unique_id: &str,
        index: u32,
        account_index: u32,
        key_type: ExtendedKeyType,
    ) -> Result<ExtendedKey> {
        let root = self.dip15_contact_root_priv(user_unique_id, contact_unique_id, account_index)?;
        let key = root.ckd_priv(&self.secp, ChildNumber::from_normal_idx(index)?)?;
        tracing::trace!("Derived contact key {} for account {}", index, account_index);
        Ok(ExtendedKey::from_priv(&self.secp, key, key_type))
    }
}

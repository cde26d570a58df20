//! Gap limit look-ahead
//!
//! A chain is a base path whose direct non-hardened children are addresses,
//! like the external (`.../0`) and internal (`.../1`) chains of a BIP44
//! account. For each configured chain the key chain keeps `gap` addresses
//! issued past the highest used one, so funds sent to addresses the wallet
//! has not handed out yet are still seen.

use std::collections::BTreeMap;

use dash_network::Network;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::path_record::PathOptions;
use super::DerivableKeyChain;
use crate::bip32::{ChildNumber, DerivationPath};
use crate::dip9;
use crate::error::Result;

/// Unused addresses kept ahead of the last used one on each chain (BIP44)
pub const DEFAULT_GAP_LIMIT: u32 = 20;

/// Path the root of a non-derivable key chain is issued under
pub const ROOT_KEY_PATH: &str = "0";

/// First index past the non-hardened range
const NORMAL_INDEX_END: u32 = 1 << 31;

/// Which chains to pre-derive and how far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LookAheadOptions {
    /// Flag newly issued look-ahead paths as watched
    pub is_watched: bool,
    /// Chain base path to gap limit
    pub paths: BTreeMap<String, u32>,
}

impl LookAheadOptions {
    /// Options without any chain
    pub fn new() -> Self {
        Self::default()
    }

    /// External and internal chains of BIP44 account `account_index`,
    /// watched, with the default gap limit.
    pub fn bip44_account(network: Network, account_index: u32) -> Self {
        let account = dip9::bip44_account_path(network, account_index);
        let mut options = Self::new().with_watched(true);
        for chain in [0, 1] {
            let chain_path = account.child(ChildNumber::Normal {
                index: chain,
            });
            options = options.with_path(chain_path.to_string(), DEFAULT_GAP_LIMIT);
        }
        options
    }

    /// Sets whether new paths are watched
    pub fn with_watched(mut self, is_watched: bool) -> Self {
        self.is_watched = is_watched;
        self
    }

    /// Adds a chain with its gap limit
    pub fn with_path(mut self, base_path: impl Into<String>, gap_limit: u32) -> Self {
        self.paths.insert(base_path.into(), gap_limit);
        self
    }
}

impl DerivableKeyChain {
    /// Issues the look-ahead window of every configured chain.
    ///
    /// Returns the paths issued by this call, in issuance order. Paths already
    /// issued are left untouched.
    pub fn maybe_look_ahead(&mut self) -> Result<Vec<String>> {
        let options = self.look_ahead.clone();
        let path_options = PathOptions::default().with_watched(options.is_watched);
        let mut issued = Vec::new();

        if !self.root_key.is_derivable() {
            if options.is_watched && !self.issued_paths.contains(ROOT_KEY_PATH) {
                self.get_for_path(ROOT_KEY_PATH, path_options)?;
                issued.push(ROOT_KEY_PATH.to_string());
            }
            return Ok(issued);
        }

        for (base, gap_limit) in &options.paths {
            let base_path: DerivationPath = base.parse()?;
            let start = self.highest_used_index(&base_path).map_or(0, |index| index + 1);
            let end = start.saturating_add(*gap_limit).min(NORMAL_INDEX_END);

            for index in start..end {
                let path = base_path.child(ChildNumber::from_normal_idx(index)?).to_string();
                if self.issued_paths.contains(&path) {
                    continue;
                }
                self.get_for_path(&path, path_options)?;
                issued.push(path);
            }
        }

        if !issued.is_empty() {
            tracing::debug!(
                "Key chain {} issued {} look-ahead paths",
                self.key_chain_id,
                issued.len()
            );
        }
        Ok(issued)
    }

    /// Highest used non-hardened child index directly below `base_path`.
    fn highest_used_index(&self, base_path: &DerivationPath) -> Option<u32> {
        let prefix = format!("{}/", base_path);
        self.issued_paths
            .records()
            .iter()
            .filter(|record| record.is_used)
            .filter_map(|record| record.path.strip_prefix(&prefix)?.parse::<u32>().ok())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_paths() {
        let options = LookAheadOptions::default();
        assert!(!options.is_watched);
        assert!(options.paths.is_empty());
    }

    #[test]
    fn test_bip44_account_chains() {
        let options = LookAheadOptions::bip44_account(Network::Testnet, 0);
        assert!(options.is_watched);
        assert_eq!(options.paths.get("m/44'/1'/0'/0"), Some(&DEFAULT_GAP_LIMIT));
        assert_eq!(options.paths.get("m/44'/1'/0'/1"), Some(&DEFAULT_GAP_LIMIT));

        let livenet = LookAheadOptions::bip44_account(Network::Dash, 2);
        assert!(livenet.paths.contains_key("m/44'/5'/2'/0"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_from_json() {
        let options: LookAheadOptions =
            serde_json::from_str(r#"{"isWatched": true, "paths": {"m/0": 5}}"#).unwrap();
        assert_eq!(options, LookAheadOptions::new().with_watched(true).with_path("m/0", 5));
        assert_eq!(
            serde_json::to_string(&options).unwrap(),
            r#"{"isWatched":true,"paths":{"m/0":5}}"#
        );

        let defaults: LookAheadOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, LookAheadOptions::default());
    }
}

//! Dash network types shared across Dash crates

use std::fmt;

/// The cryptocurrency network to act on.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Network {
    /// Classic Dash Core Payment Chain (livenet)
    Dash,
    /// Dash's testnet network.
    Testnet,
    /// Dash's devnet network.
    Devnet,
    /// Regression test network.
    Regtest,
}

impl Network {
    /// Whether this is the production chain.
    ///
    /// Every other network shares the testnet encoding parameters.
    ///
    /// ```rust
    /// use dash_network::Network;
    ///
    /// assert!(Network::Dash.is_livenet());
    /// assert!(!Network::Devnet.is_livenet());
    /// ```
    pub fn is_livenet(self) -> bool {
        self == Network::Dash
    }

    /// Version byte of base58 pay-to-pubkey-hash addresses.
    pub fn p2pkh_prefix(self) -> u8 {
        match self {
            Network::Dash => 76,                                       // 'X'
            Network::Testnet | Network::Devnet | Network::Regtest => 140, // 'y'
        }
    }

    /// Version byte of base58 pay-to-script-hash addresses.
    pub fn p2sh_prefix(self) -> u8 {
        match self {
            Network::Dash => 16,
            Network::Testnet | Network::Devnet | Network::Regtest => 19,
        }
    }

    /// Version byte of wallet import format private keys.
    pub fn wif_prefix(self) -> u8 {
        match self {
            Network::Dash => 204,
            Network::Testnet | Network::Devnet | Network::Regtest => 239,
        }
    }

    /// Resolves the network from a P2PKH or P2SH version byte.
    ///
    /// Test networks share their prefixes, so they all resolve to `Testnet`.
    pub fn from_address_prefix(prefix: u8) -> Option<Network> {
        match prefix {
            76 | 16 => Some(Network::Dash),
            140 | 19 => Some(Network::Testnet),
            _ => None,
        }
    }

    /// Resolves the network from a WIF version byte.
    pub fn from_wif_prefix(prefix: u8) -> Option<Network> {
        match prefix {
            204 => Some(Network::Dash),
            239 => Some(Network::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Dash => write!(f, "livenet"),
            Network::Testnet => write!(f, "testnet"),
            Network::Devnet => write!(f, "devnet"),
            Network::Regtest => write!(f, "regtest"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dash" | "mainnet" | "livenet" => Ok(Network::Dash),
            "testnet" | "test" => Ok(Network::Testnet),
            "devnet" | "dev" => Ok(Network::Devnet),
            "regtest" | "local" => Ok(Network::Regtest),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display() {
        assert_eq!(Network::Dash.to_string(), "livenet");
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert_eq!(Network::Devnet.to_string(), "devnet");
        assert_eq!(Network::Regtest.to_string(), "regtest");
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("dash".parse::<Network>().unwrap(), Network::Dash);
        assert_eq!("livenet".parse::<Network>().unwrap(), Network::Dash);
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Dash);
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("TestNet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("devnet".parse::<Network>().unwrap(), Network::Devnet);
        assert_eq!("regtest".parse::<Network>().unwrap(), Network::Regtest);
        assert!("invalid".parse::<Network>().is_err());
    }

    #[test]
    fn test_address_prefixes() {
        assert_eq!(Network::Dash.p2pkh_prefix(), 76);
        assert_eq!(Network::Devnet.p2pkh_prefix(), Network::Testnet.p2pkh_prefix());
        assert_eq!(Network::from_address_prefix(140), Some(Network::Testnet));
        assert_eq!(Network::from_address_prefix(16), Some(Network::Dash));
        assert_eq!(Network::from_address_prefix(0), None);
    }

    #[test]
    fn test_wif_prefixes() {
        for network in [Network::Dash, Network::Testnet] {
            assert_eq!(Network::from_wif_prefix(network.wif_prefix()), Some(network));
        }
        assert_eq!(Network::from_wif_prefix(0x80), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_network_serde_names() {
        let network: Network = serde_json::from_str("\"testnet\"").unwrap();
        assert_eq!(network, Network::Testnet);
        assert_eq!(serde_json::to_string(&Network::Dash).unwrap(), "\"dash\"");
    }
}

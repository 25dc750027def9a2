//! Token standards the bridge knows how to map.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability set of a bridged token.
///
/// The mapping table is partitioned by standard, so the same foreign
/// address could in principle be mapped once per standard.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum TokenStandard {
    /// ERC-20 style fungible token.
    Fungible = 0,
    /// ERC-1155 style semi-fungible token, balances are tracked per instance.
    MultiToken = 1,
    /// ERC-721 style token, every instance has a supply of at most one.
    NonFungible = 2,
}

impl TokenStandard {
    pub const ALL: [TokenStandard; 3] = [
        TokenStandard::Fungible,
        TokenStandard::MultiToken,
        TokenStandard::NonFungible,
    ];

    /// Returns the single-byte tag used in storage keys.
    pub fn tag(&self) -> u8 {
        *self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Fungible),
            1 => Some(Self::MultiToken),
            2 => Some(Self::NonFungible),
            _ => None,
        }
    }

    /// Whether operations on this standard address an individual token instance.
    pub fn requires_instance(&self) -> bool {
        !matches!(self, Self::Fungible)
    }
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fungible => "fungible",
            Self::MultiToken => "multi-token",
            Self::NonFungible => "non-fungible",
        };
        f.write_str(s)
    }
}

/// Standard specific parameters supplied when a token is added.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "standard", rename_all = "snake_case")]
pub enum StandardParams {
    Fungible { decimals: u8 },
    MultiToken { uri: Option<String> },
    NonFungible { base_uri: Option<String> },
}

impl StandardParams {
    pub fn standard(&self) -> TokenStandard {
        match self {
            Self::Fungible { .. } => TokenStandard::Fungible,
            Self::MultiToken { .. } => TokenStandard::MultiToken,
            Self::NonFungible { .. } => TokenStandard::NonFungible,
        }
    }

    /// Metadata URI of the token, if the standard carries one.
    pub fn metadata_uri(&self) -> Option<&str> {
        match self {
            Self::Fungible { .. } => None,
            Self::MultiToken { uri } => uri.as_deref(),
            Self::NonFungible { base_uri } => base_uri.as_deref(),
        }
    }
}

/// Descriptive metadata of a bridged token.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub params: StandardParams,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, params: StandardParams) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            params,
        }
    }

    pub fn fungible(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self::new(name, symbol, StandardParams::Fungible { decimals })
    }

    pub fn multi_token(
        name: impl Into<String>,
        symbol: impl Into<String>,
        uri: Option<String>,
    ) -> Self {
        Self::new(name, symbol, StandardParams::MultiToken { uri })
    }

    pub fn non_fungible(
        name: impl Into<String>,
        symbol: impl Into<String>,
        base_uri: Option<String>,
    ) -> Self {
        Self::new(name, symbol, StandardParams::NonFungible { base_uri })
    }

    pub fn standard(&self) -> TokenStandard {
        self.params.standard()
    }

    pub fn metadata_uri(&self) -> Option<&str> {
        self.params.metadata_uri()
    }
}

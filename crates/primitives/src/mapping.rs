//! Foreign token to local token mappings.

use serde::{Deserialize, Serialize};

use crate::{
    standard::{StandardParams, TokenMetadata, TokenStandard},
    Address, TimestampMs, U256,
};

/// Association between a token on the foreign chain and its wrapped
/// counterpart on the local chain.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenMapping {
    foreign_token: Address,
    local_token: Address,
    metadata: TokenMetadata,
    created_at: TimestampMs,
}

impl TokenMapping {
    pub fn new(
        foreign_token: Address,
        local_token: Address,
        metadata: TokenMetadata,
        created_at: TimestampMs,
    ) -> Self {
        Self {
            foreign_token,
            local_token,
            metadata,
            created_at,
        }
    }

    pub fn foreign_token(&self) -> Address {
        self.foreign_token
    }

    pub fn local_token(&self) -> Address {
        self.local_token
    }

    pub fn standard(&self) -> TokenStandard {
        self.metadata.standard()
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn metadata_uri(&self) -> Option<&str> {
        self.metadata.metadata_uri()
    }

    pub fn params(&self) -> &StandardParams {
        &self.metadata.params
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn created_at(&self) -> TimestampMs {
        self.created_at
    }
}

/// Lifecycle state of a persisted mapping.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MappingStatus {
    Active,
    /// Tombstone. The entry is kept so that the local token stays reserved
    /// while supply minted under it is still outstanding.
    Removed {
        removed_at: TimestampMs,
        /// Supply the caller agreed to leave outstanding at removal time.
        outstanding_at_removal: U256,
    },
}

/// Mapping as it is stored, together with its lifecycle state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenMappingEntry {
    pub mapping: TokenMapping,
    pub status: MappingStatus,
}

impl TokenMappingEntry {
    pub fn active(mapping: TokenMapping) -> Self {
        Self {
            mapping,
            status: MappingStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, MappingStatus::Active)
    }

    /// Consumes the entry, returning the mapping only if it is still active.
    pub fn into_active(self) -> Option<TokenMapping> {
        self.is_active().then_some(self.mapping)
    }

    /// Returns a copy of this entry marked as removed.
    pub fn tombstoned(&self, removed_at: TimestampMs, outstanding_at_removal: U256) -> Self {
        Self {
            mapping: self.mapping.clone(),
            status: MappingStatus::Removed {
                removed_at,
                outstanding_at_removal,
            },
        }
    }
}

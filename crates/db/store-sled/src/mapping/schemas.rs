use borsh::{BorshDeserialize, BorshSerialize};
use tokenbridge_primitives::{
    mapping::{MappingStatus, TokenMapping, TokenMappingEntry},
    standard::{StandardParams, TokenMetadata, TokenStandard},
    Address, TimestampMs, U256,
};

use crate::{
    define_table_with_seek_key_codec, define_table_without_codec, impl_lexicographic_key_codec,
    impl_lexicographic_value_codec,
};

#[derive(Debug, Clone, BorshSerialize, BorshDeserialize)]
pub(crate) enum StoredParams {
    Fungible { decimals: u8 },
    MultiToken { uri: Option<String> },
    NonFungible { base_uri: Option<String> },
}

#[derive(Debug, Clone, BorshSerialize, BorshDeserialize)]
pub(crate) enum StoredStatus {
    Active,
    Removed {
        removed_at: TimestampMs,
        outstanding_at_removal: [u8; 32],
    },
}

/// Stored form of [`TokenMappingEntry`]. The key already carries the
/// standard and the foreign token, they are repeated here so an entry can be
/// decoded on its own.
#[derive(Debug, Clone, BorshSerialize, BorshDeserialize)]
pub(crate) struct MappingRecord {
    foreign_token: [u8; 20],
    local_token: [u8; 20],
    name: String,
    symbol: String,
    params: StoredParams,
    created_at: TimestampMs,
    status: StoredStatus,
}

impl From<&TokenMappingEntry> for MappingRecord {
    fn from(entry: &TokenMappingEntry) -> Self {
        let mapping = &entry.mapping;
        let params = match mapping.params() {
            StandardParams::Fungible { decimals } => StoredParams::Fungible {
                decimals: *decimals,
            },
            StandardParams::MultiToken { uri } => StoredParams::MultiToken { uri: uri.clone() },
            StandardParams::NonFungible { base_uri } => StoredParams::NonFungible {
                base_uri: base_uri.clone(),
            },
        };
        let status = match entry.status {
            MappingStatus::Active => StoredStatus::Active,
            MappingStatus::Removed {
                removed_at,
                outstanding_at_removal,
            } => StoredStatus::Removed {
                removed_at,
                outstanding_at_removal: outstanding_at_removal.to_be_bytes::<32>(),
            },
        };

        Self {
            foreign_token: mapping.foreign_token().into_array(),
            local_token: mapping.local_token().into_array(),
            name: mapping.name().to_owned(),
            symbol: mapping.symbol().to_owned(),
            params,
            created_at: mapping.created_at(),
            status,
        }
    }
}

impl From<MappingRecord> for TokenMappingEntry {
    fn from(rec: MappingRecord) -> Self {
        let params = match rec.params {
            StoredParams::Fungible { decimals } => StandardParams::Fungible { decimals },
            StoredParams::MultiToken { uri } => StandardParams::MultiToken { uri },
            StoredParams::NonFungible { base_uri } => StandardParams::NonFungible { base_uri },
        };
        let status = match rec.status {
            StoredStatus::Active => MappingStatus::Active,
            StoredStatus::Removed {
                removed_at,
                outstanding_at_removal,
            } => MappingStatus::Removed {
                removed_at,
                outstanding_at_removal: U256::from_be_bytes(outstanding_at_removal),
            },
        };

        TokenMappingEntry {
            mapping: TokenMapping::new(
                Address::new(rec.foreign_token),
                Address::new(rec.local_token),
                TokenMetadata::new(rec.name, rec.symbol, params),
                rec.created_at,
            ),
            status,
        }
    }
}

define_table_with_seek_key_codec!(
    /// Mappings and their tombstones, keyed by standard then foreign token.
    (TokenMappingSchema) (TokenStandard, Address) => MappingRecord
);

define_table_without_codec!(
    /// Index from a local token to the key of the mapping it backs.
    (LocalTokenIndexSchema) Address => (TokenStandard, Address)
);
impl_lexicographic_key_codec!(LocalTokenIndexSchema, Address);
impl_lexicographic_value_codec!(LocalTokenIndexSchema, (TokenStandard, Address));

use borsh::{BorshDeserialize, BorshSerialize};
use tokenbridge_primitives::{guardian::GuardianSet, Address};
use typed_sled::codec::{CodecError, KeyCodec};

use crate::{define_table_without_codec, impl_borsh_value_codec};

/// Key of the only record in [`GuardianSetSchema`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct GuardianSetKey;

const GUARDIAN_SET_KEY_BYTE: u8 = 0;

/// Stored form of [`GuardianSet`], members in ascending order.
#[derive(Debug, Clone, Default, BorshSerialize, BorshDeserialize)]
pub(crate) struct GuardianSetEntry {
    members: Vec<[u8; 20]>,
}

impl From<&GuardianSet> for GuardianSetEntry {
    fn from(set: &GuardianSet) -> Self {
        Self {
            members: set.iter().map(|addr| addr.into_array()).collect(),
        }
    }
}

impl From<GuardianSetEntry> for GuardianSet {
    fn from(entry: GuardianSetEntry) -> Self {
        GuardianSet::new(entry.members.into_iter().map(Address::new))
    }
}

define_table_without_codec!(
    /// The guardian set, stored as a single record so membership changes
    /// can check the member count atomically.
    (GuardianSetSchema) GuardianSetKey => GuardianSetEntry
);
impl_borsh_value_codec!(GuardianSetSchema, GuardianSetEntry);

impl KeyCodec<GuardianSetSchema> for GuardianSetKey {
    fn encode_key(&self) -> Result<Vec<u8>, CodecError> {
        Ok(vec![GUARDIAN_SET_KEY_BYTE])
    }

    fn decode_key(data: &[u8]) -> Result<Self, CodecError> {
        match data {
            [GUARDIAN_SET_KEY_BYTE] => Ok(GuardianSetKey),
            _ => Err(CodecError::Other(format!(
                "unexpected key in '{}': {data:?}",
                GuardianSetSchema::tree_name()
            ))),
        }
    }
}

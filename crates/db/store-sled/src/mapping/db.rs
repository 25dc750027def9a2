use tokenbridge_db_types::{traits::TokenMappingDatabase, DbResult};
use tokenbridge_primitives::{mapping::TokenMappingEntry, standard::TokenStandard, Address};

use super::schemas::{LocalTokenIndexSchema, TokenMappingSchema};
use crate::define_sled_database;

define_sled_database!(
    pub struct TokenMappingDBSled {
        mapping_tree: TokenMappingSchema,
        local_index_tree: LocalTokenIndexSchema,
    }
);

impl TokenMappingDatabase for TokenMappingDBSled {
    fn get_mapping(
        &self,
        standard: TokenStandard,
        foreign_token: Address,
    ) -> DbResult<Option<TokenMappingEntry>> {
        Ok(self
            .mapping_tree
            .get(&(standard, foreign_token))?
            .map(TokenMappingEntry::from))
    }

    fn get_mapping_key_by_local(
        &self,
        local_token: Address,
    ) -> DbResult<Option<(TokenStandard, Address)>> {
        Ok(self.local_index_tree.get(&local_token)?)
    }

    fn get_all_mappings(&self) -> DbResult<Vec<TokenMappingEntry>> {
        let mut entries = Vec::new();
        for item in self.mapping_tree.iter() {
            let (_, rec) = item?;
            entries.push(TokenMappingEntry::from(rec));
        }
        Ok(entries)
    }
}

use tokenbridge_db_types::{traits::SupplyDatabase, types::SupplyUpdate, DbResult};
use tokenbridge_primitives::{supply::SupplyKey, U256};

use super::schemas::{apply_credit, apply_debit, SupplySchema};
use crate::define_sled_database;

define_sled_database!(
    pub struct SupplyDBSled {
        supply_tree: SupplySchema,
    }
);

impl SupplyDatabase for SupplyDBSled {
    fn get_supply(&self, key: SupplyKey) -> DbResult<U256> {
        Ok(self.supply_tree.get(&key)?.unwrap_or_default())
    }

    fn credit_supply(
        &self,
        key: SupplyKey,
        amount: U256,
        instance_cap: Option<U256>,
    ) -> DbResult<SupplyUpdate> {
        self.config.with_retry((&self.supply_tree,), |(st,)| {
            Ok(apply_credit(&st, &key, amount, instance_cap)?)
        })
    }

    fn debit_supply(&self, key: SupplyKey, amount: U256) -> DbResult<SupplyUpdate> {
        self.config
            .with_retry((&self.supply_tree,), |(st,)| Ok(apply_debit(&st, &key, amount)?))
    }
}

#[cfg(test)]
mod tests {
    use tokenbridge_db_tests::supply_db_tests;

    use super::*;
    use crate::sled_db_test_setup;

    sled_db_test_setup!(SupplyDBSled, supply_db_tests);
}

use tokenbridge_db_types::{
    supply_helpers::{plan_credit, plan_debit, SupplyCounters},
    types::SupplyUpdate,
};
use tokenbridge_primitives::{supply::SupplyKey, U256};
use typed_sled::{error::Result, tree::SledTransactionalTree};

use crate::{
    define_table_without_codec, impl_lexicographic_key_codec, impl_lexicographic_value_codec,
};

define_table_without_codec!(
    /// Outstanding supply counters. Absent keys read as zero.
    (SupplySchema) SupplyKey => U256
);
impl_lexicographic_key_codec!(SupplySchema, SupplyKey);
impl_lexicographic_value_codec!(SupplySchema, U256);

pub(crate) type SupplyTxTree = SledTransactionalTree<SupplySchema>;

pub(crate) fn read_balance(st: &SupplyTxTree, key: &SupplyKey) -> Result<U256> {
    Ok(st.get(key)?.unwrap_or_default())
}

fn read_counters(st: &SupplyTxTree, key: &SupplyKey) -> Result<SupplyCounters> {
    let instance = if key.is_aggregate() {
        None
    } else {
        Some(read_balance(st, key)?)
    };
    Ok(SupplyCounters {
        instance,
        aggregate: read_balance(st, &key.to_aggregate())?,
    })
}

fn write_counters(st: &SupplyTxTree, key: &SupplyKey, counters: SupplyCounters) -> Result<()> {
    if let Some(bal) = counters.instance {
        st.insert(key, &bal)?;
    }
    st.insert(&key.to_aggregate(), &counters.aggregate)
}

/// Credits `amount` inside a transaction, writing nothing on rejection.
pub(crate) fn apply_credit(
    st: &SupplyTxTree,
    key: &SupplyKey,
    amount: U256,
    instance_cap: Option<U256>,
) -> Result<SupplyUpdate> {
    match plan_credit(read_counters(st, key)?, amount, instance_cap) {
        Ok(next) => {
            write_counters(st, key, next)?;
            Ok(SupplyUpdate::Applied {
                balance: next.addressed(),
            })
        }
        Err(rejected) => Ok(rejected),
    }
}

/// Debits `amount` inside a transaction, writing nothing on rejection.
pub(crate) fn apply_debit(st: &SupplyTxTree, key: &SupplyKey, amount: U256) -> Result<SupplyUpdate> {
    match plan_debit(read_counters(st, key)?, amount) {
        Ok(next) => {
            write_counters(st, key, next)?;
            Ok(SupplyUpdate::Applied {
                balance: next.addressed(),
            })
        }
        Err(rejected) => Ok(rejected),
    }
}

//! Supply counter arithmetic shared by every backend.
//!
//! Backends read the current counters inside their atomic section, ask these
//! helpers for the new values and write them back only on success.

use tokenbridge_primitives::U256;

use crate::types::SupplyUpdate;

/// Current values of the counters touched by one update.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SupplyCounters {
    /// Instance counter, `None` when the update addresses the aggregate only.
    pub instance: Option<U256>,
    pub aggregate: U256,
}

impl SupplyCounters {
    /// Balance of the counter the update was addressed to.
    pub fn addressed(&self) -> U256 {
        self.instance.unwrap_or(self.aggregate)
    }
}

/// Computes the counters after crediting `amount`.
pub fn plan_credit(
    current: SupplyCounters,
    amount: U256,
    instance_cap: Option<U256>,
) -> Result<SupplyCounters, SupplyUpdate> {
    let aggregate = current
        .aggregate
        .checked_add(amount)
        .ok_or(SupplyUpdate::Overflow)?;

    let instance = match current.instance {
        Some(bal) => {
            let next = bal.checked_add(amount).ok_or(SupplyUpdate::Overflow)?;
            if instance_cap.is_some_and(|cap| next > cap) {
                return Err(SupplyUpdate::CapExceeded { balance: bal });
            }
            Some(next)
        }
        None => None,
    };

    Ok(SupplyCounters {
        instance,
        aggregate,
    })
}

/// Computes the counters after debiting `amount`.
pub fn plan_debit(current: SupplyCounters, amount: U256) -> Result<SupplyCounters, SupplyUpdate> {
    let available = current.addressed();
    if amount > available {
        return Err(SupplyUpdate::Insufficient { available });
    }

    // The aggregate always covers its instances, so this cannot underflow
    // unless the store was corrupted.
    let aggregate = current
        .aggregate
        .checked_sub(amount)
        .ok_or(SupplyUpdate::Insufficient {
            available: current.aggregate,
        })?;

    Ok(SupplyCounters {
        instance: current.instance.map(|bal| bal - amount),
        aggregate,
    })
}

//! Keys of the outstanding supply counters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Address, U256};

/// Identifies one supply counter.
///
/// The counter with `instance_id == None` is the aggregate for the local
/// token; every instance counter also contributes to it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct SupplyKey {
    pub local_token: Address,
    pub instance_id: Option<U256>,
}

impl SupplyKey {
    pub fn new(local_token: Address, instance_id: Option<U256>) -> Self {
        Self {
            local_token,
            instance_id,
        }
    }

    pub fn aggregate(local_token: Address) -> Self {
        Self::new(local_token, None)
    }

    pub fn instance(local_token: Address, instance_id: U256) -> Self {
        Self::new(local_token, Some(instance_id))
    }

    pub fn is_aggregate(&self) -> bool {
        self.instance_id.is_none()
    }

    /// Returns the aggregate key of the same local token.
    pub fn to_aggregate(&self) -> Self {
        Self::aggregate(self.local_token)
    }
}

impl fmt::Display for SupplyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.instance_id {
            Some(id) => write!(f, "{}#{}", self.local_token, id),
            None => write!(f, "{}", self.local_token),
        }
    }
}

//! Guardian set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Address;

/// Addresses authorized to mutate bridge state.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GuardianSet {
    members: BTreeSet<Address>,
}

impl GuardianSet {
    pub fn new(members: impl IntoIterator<Item = Address>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    pub fn contains(&self, addr: &Address) -> bool {
        self.members.contains(addr)
    }

    /// Adds a member, returning whether it was newly inserted.
    pub fn insert(&mut self, addr: Address) -> bool {
        self.members.insert(addr)
    }

    /// Removes a member, returning whether it was present.
    pub fn remove(&mut self, addr: &Address) -> bool {
        self.members.remove(addr)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }

    pub fn to_vec(&self) -> Vec<Address> {
        self.members.iter().copied().collect()
    }
}

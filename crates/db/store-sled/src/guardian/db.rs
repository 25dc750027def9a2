use tokenbridge_db_types::{
    traits::GuardianDatabase, types::GuardianRemoval, DbError, DbResult,
};
use tokenbridge_primitives::{guardian::GuardianSet, Address};

use super::schemas::{GuardianSetEntry, GuardianSetKey, GuardianSetSchema};
use crate::define_sled_database;

define_sled_database!(
    pub struct GuardianDBSled {
        guardian_tree: GuardianSetSchema,
    }
);

/// Outcome of a membership change evaluated inside a transaction.
enum SetUpdate<T> {
    Missing,
    Done(T),
}

impl GuardianDBSled {
    /// Applies `update` to the stored set in one transaction. The set is
    /// written back only if `update` returns `true` as its first element.
    fn update_set<T, F>(&self, update: F) -> DbResult<T>
    where
        F: Fn(&mut GuardianSet) -> (bool, T),
    {
        let res = self
            .config
            .with_retry((&self.guardian_tree,), |(gt,)| {
                let Some(entry) = gt.get(&GuardianSetKey)? else {
                    return Ok(SetUpdate::Missing);
                };
                let mut set = GuardianSet::from(entry);
                let (changed, out) = update(&mut set);
                if changed {
                    gt.insert(&GuardianSetKey, &GuardianSetEntry::from(&set))?;
                }
                Ok(SetUpdate::Done(out))
            })?;

        match res {
            SetUpdate::Missing => Err(DbError::NotBootstrapped),
            SetUpdate::Done(out) => Ok(out),
        }
    }
}

impl GuardianDatabase for GuardianDBSled {
    fn init_guardian_set(&self, set: GuardianSet) -> DbResult<()> {
        let entry = GuardianSetEntry::from(&set);
        let inserted = self
            .config
            .with_retry((&self.guardian_tree,), |(gt,)| {
                if gt.get(&GuardianSetKey)?.is_some() {
                    return Ok(false);
                }
                gt.insert(&GuardianSetKey, &entry)?;
                Ok(true)
            })?;

        if !inserted {
            return Err(DbError::EntryAlreadyExists);
        }
        Ok(())
    }

    fn get_guardian_set(&self) -> DbResult<Option<GuardianSet>> {
        Ok(self.guardian_tree.get(&GuardianSetKey)?.map(GuardianSet::from))
    }

    fn add_guardian(&self, guardian: Address) -> DbResult<bool> {
        self.update_set(|set| {
            let added = set.insert(guardian);
            (added, added)
        })
    }

    fn remove_guardian(&self, guardian: Address) -> DbResult<GuardianRemoval> {
        self.update_set(|set| {
            if !set.contains(&guardian) {
                (false, GuardianRemoval::NotMember)
            } else if set.len() == 1 {
                (false, GuardianRemoval::LastMember)
            } else {
                set.remove(&guardian);
                (true, GuardianRemoval::Removed)
            }
        })
    }
}

use tokenbridge_db_types::{traits::GuardianDatabase, types::GuardianRemoval, DbError};
use tokenbridge_primitives::guardian::GuardianSet;

use crate::fixtures::addr;

pub fn test_init_guardian_set_once(db: &impl GuardianDatabase) {
    assert!(db.get_guardian_set().expect("test: get").is_none());

    db.init_guardian_set(GuardianSet::new([addr(1), addr(2)]))
        .expect("test: init");

    let res = db.init_guardian_set(GuardianSet::new([addr(3)]));
    assert!(matches!(res, Err(DbError::EntryAlreadyExists)));

    let set = db.get_guardian_set().expect("test: get").unwrap();
    assert_eq!(set.to_vec(), vec![addr(1), addr(2)]);
}

pub fn test_mutations_require_init(db: &impl GuardianDatabase) {
    assert!(matches!(
        db.add_guardian(addr(1)),
        Err(DbError::NotBootstrapped)
    ));
    assert!(matches!(
        db.remove_guardian(addr(1)),
        Err(DbError::NotBootstrapped)
    ));
}

pub fn test_add_guardian_idempotent(db: &impl GuardianDatabase) {
    db.init_guardian_set(GuardianSet::new([addr(1)]))
        .expect("test: init");

    assert!(db.add_guardian(addr(2)).expect("test: add"));
    assert!(!db.add_guardian(addr(2)).expect("test: add again"));

    let set = db.get_guardian_set().expect("test: get").unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&addr(2)));
}

pub fn test_remove_guardian_keeps_last(db: &impl GuardianDatabase) {
    db.init_guardian_set(GuardianSet::new([addr(1), addr(2)]))
        .expect("test: init");

    assert_eq!(
        db.remove_guardian(addr(9)).expect("test: remove"),
        GuardianRemoval::NotMember
    );
    assert_eq!(
        db.remove_guardian(addr(1)).expect("test: remove"),
        GuardianRemoval::Removed
    );
    assert_eq!(
        db.remove_guardian(addr(2)).expect("test: remove"),
        GuardianRemoval::LastMember
    );

    let set = db.get_guardian_set().expect("test: get").unwrap();
    assert_eq!(set.to_vec(), vec![addr(2)]);
}

#[macro_export]
macro_rules! guardian_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_init_guardian_set_once() {
            let db = $setup_expr;
            $crate::guardian_tests::test_init_guardian_set_once(&db);
        }

        #[test]
        fn test_mutations_require_init() {
            let db = $setup_expr;
            $crate::guardian_tests::test_mutations_require_init(&db);
        }

        #[test]
        fn test_add_guardian_idempotent() {
            let db = $setup_expr;
            $crate::guardian_tests::test_add_guardian_idempotent(&db);
        }

        #[test]
        fn test_remove_guardian_keeps_last() {
            let db = $setup_expr;
            $crate::guardian_tests::test_remove_guardian_keeps_last(&db);
        }
    };
}

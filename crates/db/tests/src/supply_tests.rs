use tokenbridge_db_types::{traits::SupplyDatabase, types::SupplyUpdate};
use tokenbridge_primitives::{supply::SupplyKey, U256};

use crate::fixtures::addr;

pub fn test_unknown_counter_is_zero(db: &impl SupplyDatabase) {
    let bal = db
        .get_supply(SupplyKey::aggregate(addr(0xbb)))
        .expect("test: get");
    assert_eq!(bal, U256::ZERO);
}

pub fn test_credit_and_debit_aggregate(db: &impl SupplyDatabase) {
    let key = SupplyKey::aggregate(addr(0xbb));

    let res = db
        .credit_supply(key, U256::from(100), None)
        .expect("test: credit");
    assert_eq!(
        res,
        SupplyUpdate::Applied {
            balance: U256::from(100)
        }
    );

    let res = db.debit_supply(key, U256::from(40)).expect("test: debit");
    assert_eq!(
        res,
        SupplyUpdate::Applied {
            balance: U256::from(60)
        }
    );
    assert_eq!(db.get_supply(key).expect("test: get"), U256::from(60));
}

pub fn test_debit_never_underflows(db: &impl SupplyDatabase) {
    let key = SupplyKey::aggregate(addr(0xbb));
    db.credit_supply(key, U256::from(5), None)
        .expect("test: credit");

    let res = db.debit_supply(key, U256::from(6)).expect("test: debit");
    assert_eq!(
        res,
        SupplyUpdate::Insufficient {
            available: U256::from(5)
        }
    );
    assert_eq!(db.get_supply(key).expect("test: get"), U256::from(5));
}

pub fn test_instance_moves_aggregate(db: &impl SupplyDatabase) {
    let token = addr(0xbb);
    let first = SupplyKey::instance(token, U256::from(1));
    let second = SupplyKey::instance(token, U256::from(2));

    db.credit_supply(first, U256::from(3), None)
        .expect("test: credit");
    db.credit_supply(second, U256::from(4), None)
        .expect("test: credit");
    db.debit_supply(first, U256::from(1)).expect("test: debit");

    assert_eq!(db.get_supply(first).expect("test: get"), U256::from(2));
    assert_eq!(db.get_supply(second).expect("test: get"), U256::from(4));
    assert_eq!(
        db.get_supply(SupplyKey::aggregate(token))
            .expect("test: get"),
        U256::from(6)
    );

    // Instance balance bounds the debit even though the aggregate is larger.
    let res = db.debit_supply(first, U256::from(3)).expect("test: debit");
    assert_eq!(
        res,
        SupplyUpdate::Insufficient {
            available: U256::from(2)
        }
    );
}

pub fn test_instance_cap(db: &impl SupplyDatabase) {
    let key = SupplyKey::instance(addr(0xbb), U256::from(7));
    let cap = Some(U256::from(1));

    let res = db
        .credit_supply(key, U256::from(1), cap)
        .expect("test: credit");
    assert_eq!(
        res,
        SupplyUpdate::Applied {
            balance: U256::from(1)
        }
    );

    let res = db
        .credit_supply(key, U256::from(1), cap)
        .expect("test: credit again");
    assert_eq!(
        res,
        SupplyUpdate::CapExceeded {
            balance: U256::from(1)
        }
    );
    assert_eq!(
        db.get_supply(key.to_aggregate()).expect("test: get"),
        U256::from(1)
    );
}

pub fn test_credit_overflow_rejected(db: &impl SupplyDatabase) {
    let key = SupplyKey::aggregate(addr(0xbb));
    db.credit_supply(key, U256::MAX, None)
        .expect("test: credit");

    let res = db
        .credit_supply(key, U256::from(1), None)
        .expect("test: credit");
    assert_eq!(res, SupplyUpdate::Overflow);
    assert_eq!(db.get_supply(key).expect("test: get"), U256::MAX);
}

#[macro_export]
macro_rules! supply_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_unknown_counter_is_zero() {
            let db = $setup_expr;
            $crate::supply_tests::test_unknown_counter_is_zero(&db);
        }

        #[test]
        fn test_credit_and_debit_aggregate() {
            let db = $setup_expr;
            $crate::supply_tests::test_credit_and_debit_aggregate(&db);
        }

        #[test]
        fn test_debit_never_underflows() {
            let db = $setup_expr;
            $crate::supply_tests::test_debit_never_underflows(&db);
        }

        #[test]
        fn test_instance_moves_aggregate() {
            let db = $setup_expr;
            $crate::supply_tests::test_instance_moves_aggregate(&db);
        }

        #[test]
        fn test_instance_cap() {
            let db = $setup_expr;
            $crate::supply_tests::test_instance_cap(&db);
        }

        #[test]
        fn test_credit_overflow_rejected() {
            let db = $setup_expr;
            $crate::supply_tests::test_credit_overflow_rejected(&db);
        }
    };
}

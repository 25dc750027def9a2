use tokenbridge_db_types::traits::ReceiptDatabase;
use tokenbridge_primitives::{receipt::ReceiptId, U256};

use crate::fixtures::{addr, receipt};

pub fn test_consume_receipt_once(db: &impl ReceiptDatabase) {
    let rec = receipt(0xbb, "0x01:0", None, 10);

    assert!(db.try_consume_receipt(rec.clone()).expect("test: consume"));

    let mut replay = rec.clone();
    replay.amount = U256::from(99);
    assert!(!db.try_consume_receipt(replay).expect("test: replay"));

    // The original record is kept untouched.
    let stored = db
        .get_receipt(addr(0xbb), &ReceiptId::from("0x01:0"))
        .expect("test: get")
        .unwrap();
    assert_eq!(stored, rec);
}

pub fn test_receipts_scoped_by_local_token(db: &impl ReceiptDatabase) {
    assert!(db
        .try_consume_receipt(receipt(0xbb, "0x01:0", None, 10))
        .expect("test: consume"));
    assert!(db
        .try_consume_receipt(receipt(0xcc, "0x01:0", Some(4), 1))
        .expect("test: consume other token"));

    let other = db
        .get_receipt(addr(0xcc), &ReceiptId::from("0x01:0"))
        .expect("test: get")
        .unwrap();
    assert_eq!(other.instance_id, Some(U256::from(4)));
}

pub fn test_get_unknown_receipt(db: &impl ReceiptDatabase) {
    let res = db
        .get_receipt(addr(0xbb), &ReceiptId::from("missing"))
        .expect("test: get");
    assert!(res.is_none());
}

#[macro_export]
macro_rules! receipt_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_consume_receipt_once() {
            let db = $setup_expr;
            $crate::receipt_tests::test_consume_receipt_once(&db);
        }

        #[test]
        fn test_receipts_scoped_by_local_token() {
            let db = $setup_expr;
            $crate::receipt_tests::test_receipts_scoped_by_local_token(&db);
        }

        #[test]
        fn test_get_unknown_receipt() {
            let db = $setup_expr;
            $crate::receipt_tests::test_get_unknown_receipt(&db);
        }
    };
}

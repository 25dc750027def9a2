//! Cross-table operations, exercised through a whole backend.

use tokenbridge_db_types::{
    traits::*,
    types::{DepositCommit, MappingInsert, MappingRemoval, SupplyUpdate},
};
use tokenbridge_primitives::{
    mapping::MappingStatus, receipt::ReceiptId, standard::TokenStandard, supply::SupplyKey, U256,
};

use crate::fixtures::{addr, fungible_entry, nft_entry, receipt};

pub fn test_put_mapping_and_index(backend: &impl DatabaseBackend) {
    let ledger = backend.ledger_db();
    let mappings = backend.mapping_db();

    let res = ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xbb))
        .expect("test: put");
    assert_eq!(res, MappingInsert::Inserted);

    let entry = mappings
        .get_mapping(TokenStandard::Fungible, addr(0xaa))
        .expect("test: get")
        .unwrap();
    assert_eq!(entry, fungible_entry(0xaa, 0xbb));

    let key = mappings
        .get_mapping_key_by_local(addr(0xbb))
        .expect("test: index");
    assert_eq!(key, Some((TokenStandard::Fungible, addr(0xaa))));

    // Same foreign address under another standard is a separate mapping.
    assert!(mappings
        .get_mapping(TokenStandard::NonFungible, addr(0xaa))
        .expect("test: get")
        .is_none());
}

pub fn test_put_mapping_rejects_duplicates(backend: &impl DatabaseBackend) {
    let ledger = backend.ledger_db();
    ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xbb))
        .expect("test: put");

    let res = ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xcc))
        .expect("test: put dup");
    assert_eq!(res, MappingInsert::AlreadyMapped);

    let res = ledger
        .put_mapping_checked(nft_entry(0xa1, 0xbb))
        .expect("test: put reused local");
    assert_eq!(
        res,
        MappingInsert::LocalTokenInUse {
            standard: TokenStandard::Fungible,
            foreign_token: addr(0xaa),
        }
    );

    // Nothing of the rejected inserts was written.
    let mappings = backend.mapping_db();
    assert!(mappings
        .get_mapping(TokenStandard::NonFungible, addr(0xa1))
        .expect("test: get")
        .is_none());
    assert!(mappings
        .get_mapping_key_by_local(addr(0xcc))
        .expect("test: index")
        .is_none());
}

pub fn test_get_all_mappings_ordered(backend: &impl DatabaseBackend) {
    let ledger = backend.ledger_db();
    ledger
        .put_mapping_checked(nft_entry(0x01, 0x11))
        .expect("test: put");
    ledger
        .put_mapping_checked(fungible_entry(0x02, 0x12))
        .expect("test: put");
    ledger
        .put_mapping_checked(fungible_entry(0x01, 0x13))
        .expect("test: put");

    let all = backend.mapping_db().get_all_mappings().expect("test: all");
    let keys: Vec<_> = all
        .iter()
        .map(|e| (e.mapping.standard(), e.mapping.foreign_token()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (TokenStandard::Fungible, addr(0x01)),
            (TokenStandard::Fungible, addr(0x02)),
            (TokenStandard::NonFungible, addr(0x01)),
        ]
    );
}

pub fn test_remove_mapping_compare_and_swap(backend: &impl DatabaseBackend) {
    let ledger = backend.ledger_db();
    let supply = backend.supply_db();
    ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xbb))
        .expect("test: put");
    supply
        .credit_supply(SupplyKey::aggregate(addr(0xbb)), U256::from(100), None)
        .expect("test: credit");

    let res = ledger
        .remove_mapping_if_supply(TokenStandard::Fungible, addr(0xaa), U256::ZERO, 10)
        .expect("test: remove");
    assert_eq!(
        res,
        MappingRemoval::SupplyMismatch {
            actual: U256::from(100)
        }
    );
    let entry = backend
        .mapping_db()
        .get_mapping(TokenStandard::Fungible, addr(0xaa))
        .expect("test: get")
        .unwrap();
    assert!(entry.is_active());

    let res = ledger
        .remove_mapping_if_supply(TokenStandard::Fungible, addr(0xaa), U256::from(100), 10)
        .expect("test: remove");
    assert_eq!(
        res,
        MappingRemoval::Removed {
            local_token: addr(0xbb)
        }
    );

    let entry = backend
        .mapping_db()
        .get_mapping(TokenStandard::Fungible, addr(0xaa))
        .expect("test: get")
        .unwrap();
    assert_eq!(
        entry.status,
        MappingStatus::Removed {
            removed_at: 10,
            outstanding_at_removal: U256::from(100),
        }
    );

    let res = ledger
        .remove_mapping_if_supply(TokenStandard::Fungible, addr(0xaa), U256::from(100), 11)
        .expect("test: remove again");
    assert_eq!(res, MappingRemoval::NotFound);
}

pub fn test_readd_after_removal(backend: &impl DatabaseBackend) {
    let ledger = backend.ledger_db();
    let supply = backend.supply_db();
    let mappings = backend.mapping_db();
    let receipts = backend.receipt_db();
    let old_local = SupplyKey::aggregate(addr(0xbb));

    ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xbb))
        .expect("test: put");
    let res = ledger
        .commit_deposit(receipt(0xbb, "0xdead:1", None, 5), None)
        .expect("test: commit");
    assert!(matches!(res, DepositCommit::Committed { .. }));
    ledger
        .remove_mapping_if_supply(TokenStandard::Fungible, addr(0xaa), U256::from(5), 10)
        .expect("test: remove");

    // A different local token cannot take over while supply is outstanding.
    let res = ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xcc))
        .expect("test: put");
    assert_eq!(
        res,
        MappingInsert::OrphanedSupply {
            previous_local_token: addr(0xbb),
            outstanding: U256::from(5),
        }
    );

    supply
        .debit_supply(old_local, U256::from(5))
        .expect("test: debit");
    let res = ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xcc))
        .expect("test: put");
    assert_eq!(res, MappingInsert::Inserted);

    assert!(mappings
        .get_mapping_key_by_local(addr(0xbb))
        .expect("test: index")
        .is_none());
    assert_eq!(
        mappings
            .get_mapping_key_by_local(addr(0xcc))
            .expect("test: index"),
        Some((TokenStandard::Fungible, addr(0xaa)))
    );

    // Receipts stay bound to the local token they were consumed for.
    let id = ReceiptId::from("0xdead:1");
    assert!(receipts
        .get_receipt(addr(0xbb), &id)
        .expect("test: receipt")
        .is_some());
    assert!(receipts
        .get_receipt(addr(0xcc), &id)
        .expect("test: receipt")
        .is_none());
}

pub fn test_reactivate_same_local_token(backend: &impl DatabaseBackend) {
    let ledger = backend.ledger_db();
    let supply = backend.supply_db();

    ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xbb))
        .expect("test: put");
    supply
        .credit_supply(SupplyKey::aggregate(addr(0xbb)), U256::from(5), None)
        .expect("test: credit");
    ledger
        .remove_mapping_if_supply(TokenStandard::Fungible, addr(0xaa), U256::from(5), 10)
        .expect("test: remove");

    let res = ledger
        .put_mapping_checked(fungible_entry(0xaa, 0xbb))
        .expect("test: put");
    assert_eq!(res, MappingInsert::Inserted);
    assert!(backend
        .mapping_db()
        .get_mapping(TokenStandard::Fungible, addr(0xaa))
        .expect("test: get")
        .unwrap()
        .is_active());
}

pub fn test_commit_deposit_idempotent(backend: &impl DatabaseBackend) {
    let ledger = backend.ledger_db();
    let rec = receipt(0xbb, "0xdead:1", None, 100);

    let res = ledger
        .commit_deposit(rec.clone(), None)
        .expect("test: commit");
    assert_eq!(
        res,
        DepositCommit::Committed {
            balance: U256::from(100)
        }
    );

    let res = ledger.commit_deposit(rec, None).expect("test: replay");
    assert_eq!(res, DepositCommit::AlreadyConsumed);

    let bal = backend
        .supply_db()
        .get_supply(SupplyKey::aggregate(addr(0xbb)))
        .expect("test: get");
    assert_eq!(bal, U256::from(100));
    assert!(backend
        .receipt_db()
        .get_receipt(addr(0xbb), &ReceiptId::from("0xdead:1"))
        .expect("test: receipt")
        .is_some());
}

pub fn test_rejected_deposit_leaves_receipt_fresh(backend: &impl DatabaseBackend) {
    let ledger = backend.ledger_db();
    let cap = Some(U256::from(1));

    ledger
        .commit_deposit(receipt(0xbb, "r1", Some(7), 1), cap)
        .expect("test: commit");

    let res = ledger
        .commit_deposit(receipt(0xbb, "r2", Some(7), 1), cap)
        .expect("test: commit");
    assert_eq!(
        res,
        DepositCommit::Rejected(SupplyUpdate::CapExceeded {
            balance: U256::from(1)
        })
    );
    assert!(backend
        .receipt_db()
        .get_receipt(addr(0xbb), &ReceiptId::from("r2"))
        .expect("test: receipt")
        .is_none());
}

#[macro_export]
macro_rules! backend_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_put_mapping_and_index() {
            let backend = $setup_expr;
            $crate::backend_tests::test_put_mapping_and_index(&backend);
        }

        #[test]
        fn test_put_mapping_rejects_duplicates() {
            let backend = $setup_expr;
            $crate::backend_tests::test_put_mapping_rejects_duplicates(&backend);
        }

        #[test]
        fn test_get_all_mappings_ordered() {
            let backend = $setup_expr;
            $crate::backend_tests::test_get_all_mappings_ordered(&backend);
        }

        #[test]
        fn test_remove_mapping_compare_and_swap() {
            let backend = $setup_expr;
            $crate::backend_tests::test_remove_mapping_compare_and_swap(&backend);
        }

        #[test]
        fn test_readd_after_removal() {
            let backend = $setup_expr;
            $crate::backend_tests::test_readd_after_removal(&backend);
        }

        #[test]
        fn test_reactivate_same_local_token() {
            let backend = $setup_expr;
            $crate::backend_tests::test_reactivate_same_local_token(&backend);
        }

        #[test]
        fn test_commit_deposit_idempotent() {
            let backend = $setup_expr;
            $crate::backend_tests::test_commit_deposit_idempotent(&backend);
        }

        #[test]
        fn test_rejected_deposit_leaves_receipt_fresh() {
            let backend = $setup_expr;
            $crate::backend_tests::test_rejected_deposit_leaves_receipt_fresh(&backend);
        }
    };
}

//! Backend independent test suites.
//!
//! Each module exports `test_*` functions and a macro that instantiates all
//! of them as `#[test]`s for a given setup expression.

pub mod backend_tests;
pub mod fixtures;
pub mod guardian_tests;
pub mod receipt_tests;
pub mod supply_tests;

#[cfg(test)]
mod stub_tests {
    mod guardian {
        use tokenbridge_db_types::stubs::StubBridgeDb;

        crate::guardian_db_tests!(StubBridgeDb::new());
    }

    mod receipt {
        use tokenbridge_db_types::stubs::StubBridgeDb;

        crate::receipt_db_tests!(StubBridgeDb::new());
    }

    mod supply {
        use tokenbridge_db_types::stubs::StubBridgeDb;

        crate::supply_db_tests!(StubBridgeDb::new());
    }

    mod backend {
        use tokenbridge_db_types::stubs::StubBackend;

        crate::backend_db_tests!(StubBackend::new());
    }
}

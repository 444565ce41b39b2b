//! Common test utilities for identitystore-bulk
//!
//! - `fixtures`: CSV batch files on disk
//! - `directory`: recording in-memory directory implementing the gateway trait
//! - `assertions`: outcome assertions

pub mod assertions;
pub mod directory;

// Re-export commonly used items
pub use directory::FakeDirectory;
pub use fixtures::CsvFixture;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

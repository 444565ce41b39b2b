//! Custom test assertions
//!
//! Provides outcome assertions for batch runs.

use identitystore_bulk::{OutcomeStatus, RowOutcome};

/// Assertions over the outcomes of one run
pub trait OutcomeAssertions {
    /// Assert the statuses, in row order
    fn assert_statuses(&self, expected: &[OutcomeStatus]);

    /// Assert outcomes cover rows `0..n` in file order
    fn assert_in_file_order(&self);
}

impl OutcomeAssertions for [RowOutcome] {
    fn assert_statuses(&self, expected: &[OutcomeStatus]) {
        let actual: Vec<OutcomeStatus> = self.iter().map(|o| o.status).collect();
        assert_eq!(
            actual, expected,
            "unexpected statuses, details: {:#?}",
            self.iter().map(|o| &o.detail).collect::<Vec<_>>()
        );
    }

    fn assert_in_file_order(&self) {
        for (position, outcome) in self.iter().enumerate() {
            assert_eq!(
                outcome.row_index, position,
                "outcome {} belongs to row {}",
                position, outcome.row_index
            );
        }
    }
}

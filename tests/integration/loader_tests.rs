//! Batch loading failures
//!
//! A file that cannot be loaded aborts the run before any directory call.

#[cfg(test)]
mod tests {
    use crate::assert_err;
    use crate::common::{CsvFixture, FakeDirectory};
    use identitystore_bulk::{
        BatchExecutor, BatchLoader, BatchReadError, BulkError, IdentityStoreId, OperationKind,
    };

    fn executor(directory: &FakeDirectory) -> BatchExecutor<FakeDirectory> {
        BatchExecutor::new(directory.clone(), IdentityStoreId::new("d-1234567890"))
    }

    #[tokio::test]
    async fn test_missing_file_makes_no_calls() {
        let directory = FakeDirectory::new();
        let err = assert_err!(
            executor(&directory)
                .run_file(OperationKind::Create, "/nonexistent/identities.csv")
                .await
        );

        assert!(matches!(err, BatchReadError::Open { .. }));
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ragged_csv_makes_no_calls() {
        let directory = FakeDirectory::new();
        let csv = CsvFixture::with_header("username,givenname,familyname", &[
            "alice,Alice,Smith",
            "bob,Bob",
        ]);

        let err = assert_err!(
            executor(&directory)
                .run_file(OperationKind::Create, csv.path())
                .await
        );

        assert!(matches!(err, BatchReadError::Format { .. }));
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_encoding_makes_no_calls() {
        let directory = FakeDirectory::new();
        let csv = CsvFixture::from_bytes(b"username\n\xFF\xFEbad\n");

        let err = assert_err!(
            executor(&directory)
                .run_file(OperationKind::Delete, csv.path())
                .await
        );

        assert!(matches!(err, BatchReadError::Encoding { .. }));
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_header_only_file_is_an_empty_batch() {
        let directory = FakeDirectory::new();
        let csv = CsvFixture::delete_batch(&[]);

        let outcomes = executor(&directory)
            .run_file(OperationKind::Delete, csv.path())
            .await
            .unwrap();

        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_load_error_converts_to_bulk_error() {
        let err = BatchLoader::default()
            .load("/nonexistent/identities.csv")
            .unwrap_err();
        let bulk: BulkError = err.into();
        assert!(bulk.to_string().contains("/nonexistent/identities.csv"));
    }
}

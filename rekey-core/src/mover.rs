// Copyright 2026 Rekey Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Single-object rename.

use crate::error::RenameError;
use crate::store::ObjectStore;
use tracing::info;

/// Renames one object as a copy-then-delete pair.
///
/// The delete of `old_key` is never issued unless the copy to `new_key`
/// has been confirmed by the backend, so a failed copy leaves the bucket
/// untouched for this key. A failed delete after a successful copy leaves
/// the object reachable under both keys and is surfaced as the distinct
/// [`RenameError::DeleteFailed`] kind. No retries, no rollback.
pub async fn rename_object(
    store: &dyn ObjectStore,
    bucket: &str,
    old_key: &str,
    new_key: &str,
) -> Result<(), RenameError> {
    info!("Attempting to replace '{old_key}' with '{new_key}'");

    store
        .copy_object(bucket, old_key, new_key)
        .await
        .map_err(|source| RenameError::CopyFailed {
            old_key: old_key.to_string(),
            new_key: new_key.to_string(),
            source,
        })?;

    store
        .delete_object(bucket, old_key)
        .await
        .map_err(|source| RenameError::DeleteFailed {
            old_key: old_key.to_string(),
            new_key: new_key.to_string(),
            source,
        })?;

    info!("Successfully replaced '{old_key}' with '{new_key}'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreOp};

    #[tokio::test]
    async fn test_rename_moves_content_to_new_key() {
        let store = MemoryStore::new("bucket", 10);
        store.put("old", b"payload".as_slice()).await;

        rename_object(&store, "bucket", "old", "new").await.unwrap();

        assert_eq!(store.get("new").await, Some(b"payload".to_vec()));
        assert!(store.get("old").await.is_none());
    }

    #[tokio::test]
    async fn test_copy_is_confirmed_before_delete() {
        let store = MemoryStore::new("bucket", 10);
        store.put("old", b"payload".as_slice()).await;

        rename_object(&store, "bucket", "old", "new").await.unwrap();

        let ops = store.ops().await;
        let copy_pos = ops
            .iter()
            .position(|op| matches!(op, StoreOp::Copy { .. }))
            .expect("copy recorded");
        let delete_pos = ops
            .iter()
            .position(|op| matches!(op, StoreOp::Delete { .. }))
            .expect("delete recorded");
        assert!(copy_pos < delete_pos);
    }

    #[tokio::test]
    async fn test_failed_copy_aborts_before_delete() {
        let store = MemoryStore::new("bucket", 10);
        store.put("old", b"payload".as_slice()).await;
        store.fail_copy_from("old").await;

        let err = rename_object(&store, "bucket", "old", "new")
            .await
            .unwrap_err();
        assert!(matches!(err, RenameError::CopyFailed { .. }));

        // Old key intact, new key never created, no delete ever issued.
        assert_eq!(store.get("old").await, Some(b"payload".to_vec()));
        assert!(store.get("new").await.is_none());
        assert!(!store
            .ops()
            .await
            .iter()
            .any(|op| matches!(op, StoreOp::Delete { .. })));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_both_keys() {
        let store = MemoryStore::new("bucket", 10);
        store.put("old", b"payload".as_slice()).await;
        store.fail_delete("old").await;

        let err = rename_object(&store, "bucket", "old", "new")
            .await
            .unwrap_err();
        assert!(err.created_duplicate());

        assert_eq!(store.get("old").await, Some(b"payload".to_vec()));
        assert_eq!(store.get("new").await, Some(b"payload".to_vec()));
    }

    #[tokio::test]
    async fn test_rename_of_missing_key_fails_cleanly() {
        let store = MemoryStore::new("bucket", 10);

        let err = rename_object(&store, "bucket", "gone", "new")
            .await
            .unwrap_err();
        assert!(matches!(err, RenameError::CopyFailed { .. }));
        assert!(store.get("new").await.is_none());
    }
}

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

//! Error types for the storage backend and the rename pipeline.

use thiserror::Error;

/// Errors surfaced by an [`ObjectStore`](crate::store::ObjectStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Object not found in the bucket.
    #[error("Object not found: {key}")]
    ObjectNotFound {
        /// Object key that was not found.
        key: String,
    },

    /// The backend rejected the request for permission reasons.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Any other backend failure (network, throttling, service error).
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Errors produced by the rename pipeline.
///
/// The pipeline distinguishes three failure stages because remediation
/// differs for each: a listing failure kills the run, a copy failure leaves
/// the bucket untouched for that key, and a delete failure leaves the object
/// reachable under both keys.
#[derive(Error, Debug)]
pub enum RenameError {
    /// The backend failed to return a page during key enumeration.
    /// Fatal to the run: there is no key set to proceed with.
    #[error("Failed to list bucket contents: {0}")]
    Listing(#[source] StoreError),

    /// The copy step of a rename failed. The bucket is unchanged for this
    /// key: `old_key` is intact and `new_key` was never created.
    #[error("Copy failed for '{old_key}' -> '{new_key}': {source}")]
    CopyFailed {
        /// Key of the source object.
        old_key: String,
        /// Key the object was being copied to.
        new_key: String,
        /// Backend failure that aborted the copy.
        source: StoreError,
    },

    /// The delete step failed after a successful copy. The object now
    /// exists under both `old_key` and `new_key` (a duplicate, not a loss);
    /// remediation is to retry the delete only, never the whole rename.
    #[error("Delete failed after copy for '{old_key}' -> '{new_key}' (object now exists under both keys): {source}")]
    DeleteFailed {
        /// Key that should have been deleted.
        old_key: String,
        /// Key the object was successfully copied to.
        new_key: String,
        /// Backend failure that aborted the delete.
        source: StoreError,
    },
}

impl RenameError {
    /// Returns true if the failed rename left the object reachable under
    /// both the old and the new key.
    pub fn created_duplicate(&self) -> bool {
        matches!(self, RenameError::DeleteFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_failure_is_flagged_as_duplicate() {
        let err = RenameError::DeleteFailed {
            old_key: "a".to_string(),
            new_key: "b".to_string(),
            source: StoreError::Backend("boom".to_string()),
        };
        assert!(err.created_duplicate());

        let err = RenameError::CopyFailed {
            old_key: "a".to_string(),
            new_key: "b".to_string(),
            source: StoreError::Backend("boom".to_string()),
        };
        assert!(!err.created_duplicate());
    }

    #[test]
    fn test_error_messages_name_both_keys() {
        let err = RenameError::CopyFailed {
            old_key: "old.key".to_string(),
            new_key: "new.key".to_string(),
            source: StoreError::AccessDenied("s3".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("old.key"));
        assert!(msg.contains("new.key"));
    }
}

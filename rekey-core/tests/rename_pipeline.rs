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

//! Rename Pipeline Integration Tests
//!
//! Exercises the full listing -> policy -> mover pipeline against the
//! in-memory backend: pagination completeness, policy gating,
//! copy-before-delete ordering, and the failure paths on both sides of the
//! copy/delete boundary.

use rekey_core::store::StoreOp;
use rekey_core::{BulkRenamer, FailureMode, FnPolicy, MemoryStore, RenameError, RenamePolicy};

/// Prefix-rewrite policy used by most tests.
fn tmp_to_archive() -> impl RenamePolicy {
    FnPolicy::new(
        |key: &str| key.starts_with("tmp/"),
        |key: &str| key.replacen("tmp/", "archive/", 1),
    )
}

#[tokio::test]
async fn test_pagination_completeness_across_page_sizes() {
    for page_size in [1, 3, 10, 1000] {
        let store = MemoryStore::new("bucket", page_size);
        for i in 0..25 {
            store.put(format!("tmp/obj-{i:03}"), b"x".as_slice()).await;
        }

        let stats = BulkRenamer::new(&store, "bucket")
            .run(&tmp_to_archive())
            .await
            .unwrap();

        assert_eq!(stats.keys_listed, 25, "page_size={page_size}");
        assert_eq!(stats.renamed, 25, "page_size={page_size}");

        let keys = store.keys().await;
        assert_eq!(keys.len(), 25);
        assert!(keys.iter().all(|k| k.starts_with("archive/")));
    }
}

#[tokio::test]
async fn test_mover_never_touches_unmatched_keys() {
    let store = MemoryStore::new("bucket", 10);
    store.put("tmp/a", b"a".as_slice()).await;
    store.put("keep/b", b"b".as_slice()).await;
    store.put("keep/c", b"c".as_slice()).await;

    let stats = BulkRenamer::new(&store, "bucket")
        .run(&tmp_to_archive())
        .await
        .unwrap();

    assert_eq!(stats.keys_matched, 1);
    assert_eq!(stats.renamed, 1);

    // No copy or delete was ever issued for the unmatched keys.
    for op in store.ops().await {
        match op {
            StoreOp::Copy { from, .. } => assert_eq!(from, "tmp/a"),
            StoreOp::Delete { key } => assert_eq!(key, "tmp/a"),
            StoreOp::List => {}
        }
    }
    assert_eq!(store.get("keep/b").await, Some(b"b".to_vec()));
    assert_eq!(store.get("keep/c").await, Some(b"c".to_vec()));
}

#[tokio::test]
async fn test_every_delete_follows_a_confirmed_copy() {
    let store = MemoryStore::new("bucket", 2);
    for i in 0..8 {
        store.put(format!("tmp/{i}"), b"x".as_slice()).await;
    }

    BulkRenamer::new(&store, "bucket")
        .run(&tmp_to_archive())
        .await
        .unwrap();

    // For each renamed key, the successful copy must appear in the op log
    // strictly before the delete of the same key.
    let ops = store.ops().await;
    for i in 0..8 {
        let old_key = format!("tmp/{i}");
        let copy_pos = ops
            .iter()
            .position(|op| matches!(op, StoreOp::Copy { from, .. } if *from == old_key))
            .expect("copy recorded for every key");
        let delete_pos = ops
            .iter()
            .position(|op| matches!(op, StoreOp::Delete { key } if *key == old_key))
            .expect("delete recorded for every key");
        assert!(copy_pos < delete_pos, "ordering violated for {old_key}");
    }
}

#[tokio::test]
async fn test_copy_failure_loses_nothing_and_aborts_run() {
    let store = MemoryStore::new("bucket", 10);
    store.put("tmp/bad", b"original".as_slice()).await;
    store.put("tmp/z-later", b"later".as_slice()).await;
    store.fail_copy_from("tmp/bad").await;

    let err = BulkRenamer::new(&store, "bucket")
        .run(&tmp_to_archive())
        .await
        .unwrap_err();
    assert!(matches!(err, RenameError::CopyFailed { .. }));

    // The failing key still resolves to its original content and the new
    // key was never created.
    assert_eq!(store.get("tmp/bad").await, Some(b"original".to_vec()));
    assert!(store.get("archive/bad").await.is_none());

    // Abort mode: the later key was never attempted.
    assert_eq!(store.get("tmp/z-later").await, Some(b"later".to_vec()));
}

#[tokio::test]
async fn test_delete_failure_surfaces_duplicate_kind() {
    let store = MemoryStore::new("bucket", 10);
    store.put("tmp/stuck", b"payload".as_slice()).await;
    store.fail_delete("tmp/stuck").await;

    let err = BulkRenamer::new(&store, "bucket")
        .run(&tmp_to_archive())
        .await
        .unwrap_err();
    assert!(err.created_duplicate());

    // Duplicate, not loss: the content is reachable under both keys.
    assert_eq!(store.get("tmp/stuck").await, Some(b"payload".to_vec()));
    assert_eq!(store.get("archive/stuck").await, Some(b"payload".to_vec()));
}

#[tokio::test]
async fn test_continue_mode_renames_past_a_failed_key() {
    let store = MemoryStore::new("bucket", 10);
    store.put("tmp/a", b"a".as_slice()).await;
    store.put("tmp/bad", b"bad".as_slice()).await;
    store.put("tmp/z", b"z".as_slice()).await;
    store.fail_copy_from("tmp/bad").await;

    let stats = BulkRenamer::new(&store, "bucket")
        .failure_mode(FailureMode::Continue)
        .run(&tmp_to_archive())
        .await
        .unwrap();

    assert_eq!(stats.keys_matched, 3);
    assert_eq!(stats.renamed, 2);
    assert_eq!(stats.failed, 1);
    assert_eq!(store.get("archive/a").await, Some(b"a".to_vec()));
    assert_eq!(store.get("archive/z").await, Some(b"z".to_vec()));
    assert_eq!(store.get("tmp/bad").await, Some(b"bad".to_vec()));
}

#[tokio::test]
async fn test_dry_run_mutates_nothing() {
    let store = MemoryStore::new("bucket", 10);
    store.put("tmp/a", b"a".as_slice()).await;
    store.put("tmp/b", b"b".as_slice()).await;

    let stats = BulkRenamer::new(&store, "bucket")
        .dry_run(true)
        .run(&tmp_to_archive())
        .await
        .unwrap();

    assert_eq!(stats.keys_matched, 2);
    assert_eq!(stats.renamed, 0);
    assert_eq!(store.keys().await, vec!["tmp/a", "tmp/b"]);
    assert!(store
        .ops()
        .await
        .iter()
        .all(|op| matches!(op, StoreOp::List)));
}

#[tokio::test]
async fn test_unchanged_new_key_is_skipped() {
    let store = MemoryStore::new("bucket", 10);
    store.put("tmp/a", b"a".as_slice()).await;

    // A policy whose transform is the identity: flagged but unchanged.
    let identity = FnPolicy::new(|_: &str| true, |key: &str| key.to_string());
    let stats = BulkRenamer::new(&store, "bucket")
        .run(&identity)
        .await
        .unwrap();

    assert_eq!(stats.keys_matched, 1);
    assert_eq!(stats.skipped_unchanged, 1);
    assert_eq!(stats.renamed, 0);
    assert!(!store
        .ops()
        .await
        .iter()
        .any(|op| matches!(op, StoreOp::Copy { .. } | StoreOp::Delete { .. })));
}

#[tokio::test]
async fn test_panicking_policy_skips_key_and_continues() {
    let store = MemoryStore::new("bucket", 10);
    store.put("poison", b"p".as_slice()).await;
    store.put("tmp/good", b"g".as_slice()).await;

    let brittle = FnPolicy::new(
        |key: &str| {
            // Indexes into the key the way a careless policy would.
            key.split('/').nth(1).unwrap().len() < 10
        },
        |key: &str| key.replacen("tmp/", "archive/", 1),
    );

    let stats = BulkRenamer::new(&store, "bucket")
        .run(&brittle)
        .await
        .unwrap();

    assert_eq!(stats.policy_errors, 1);
    assert_eq!(stats.renamed, 1);
    assert_eq!(store.get("poison").await, Some(b"p".to_vec()));
    assert_eq!(store.get("archive/good").await, Some(b"g".to_vec()));
}

#[tokio::test]
async fn test_listing_failure_is_fatal_to_the_run() {
    let store = MemoryStore::new("bucket", 10);
    store.put("tmp/a", b"a".as_slice()).await;

    // Pointing the run at the wrong bucket fails the very first listing
    // page; there is no key set to proceed with.
    let err = BulkRenamer::new(&store, "other-bucket")
        .run(&tmp_to_archive())
        .await
        .unwrap_err();
    assert!(matches!(err, RenameError::Listing(_)));
    assert_eq!(store.keys().await, vec!["tmp/a"]);
}

#[tokio::test]
async fn test_empty_bucket_run_is_a_no_op() {
    let store = MemoryStore::new("bucket", 10);
    let stats = BulkRenamer::new(&store, "bucket")
        .run(&tmp_to_archive())
        .await
        .unwrap();
    assert_eq!(stats, rekey_core::RenameStats::default());
}

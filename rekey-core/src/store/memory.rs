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

//! In-memory storage backend.
//!
//! Used by the test suites and for local experimentation. Keys are listed
//! in lexicographic order with real continuation-token pagination, and
//! copy/delete failures can be injected per key to exercise the pipeline's
//! failure paths.

use crate::error::StoreError;
use crate::store::{ListPage, ObjectStore};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tokio::sync::Mutex;

/// One recorded backend operation, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// A listing page was served.
    List,
    /// A server-side copy completed successfully.
    Copy {
        /// Source key.
        from: String,
        /// Destination key.
        to: String,
    },
    /// A delete completed successfully.
    Delete {
        /// Deleted key.
        key: String,
    },
}

#[derive(Default)]
struct Inner {
    objects: BTreeMap<String, Vec<u8>>,
    ops: Vec<StoreOp>,
    fail_copy_from: HashSet<String>,
    fail_delete: HashSet<String>,
}

/// In-memory [`ObjectStore`] over a single bucket.
pub struct MemoryStore {
    bucket: String,
    page_size: usize,
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store serving the given bucket, returning at most
    /// `page_size` keys per listing page.
    pub fn new(bucket: impl Into<String>, page_size: usize) -> Self {
        Self {
            bucket: bucket.into(),
            page_size: page_size.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Inserts an object.
    pub async fn put(&self, key: impl Into<String>, data: impl Into<Vec<u8>>) {
        let mut inner = self.inner.lock().await;
        inner.objects.insert(key.into(), data.into());
    }

    /// Returns the content of an object, or `None` if the key is absent.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().await.objects.get(key).cloned()
    }

    /// Returns all keys currently in the bucket, sorted.
    pub async fn keys(&self) -> Vec<String> {
        self.inner.lock().await.objects.keys().cloned().collect()
    }

    /// Returns the recorded operation log.
    pub async fn ops(&self) -> Vec<StoreOp> {
        self.inner.lock().await.ops.clone()
    }

    /// Makes every copy *from* the given source key fail.
    pub async fn fail_copy_from(&self, key: impl Into<String>) {
        self.inner.lock().await.fail_copy_from.insert(key.into());
    }

    /// Makes every delete of the given key fail.
    pub async fn fail_delete(&self, key: impl Into<String>) {
        self.inner.lock().await.fail_delete.insert(key.into());
    }

    fn check_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        if bucket == self.bucket {
            Ok(())
        } else {
            Err(StoreError::Backend(format!("no such bucket: {bucket}")))
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, StoreError> {
        self.check_bucket(bucket)?;
        let mut inner = self.inner.lock().await;
        inner.ops.push(StoreOp::List);

        // The token is the last key of the previous page; resume strictly
        // after it, as ListObjectsV2 does with its opaque token.
        let keys: Vec<String> = match continuation_token {
            Some(token) => inner
                .objects
                .range::<str, _>((
                    std::ops::Bound::Excluded(token),
                    std::ops::Bound::Unbounded,
                ))
                .take(self.page_size)
                .map(|(k, _)| k.clone())
                .collect(),
            None => inner
                .objects
                .keys()
                .take(self.page_size)
                .cloned()
                .collect(),
        };

        let next_token = keys.last().and_then(|last| {
            let mut remainder = inner.objects.range::<str, _>((
                std::ops::Bound::Excluded(last.as_str()),
                std::ops::Bound::Unbounded,
            ));
            remainder.next().map(|_| last.clone())
        });

        Ok(ListPage { keys, next_token })
    }

    async fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        dest_key: &str,
    ) -> Result<(), StoreError> {
        self.check_bucket(bucket)?;
        let mut inner = self.inner.lock().await;

        if inner.fail_copy_from.contains(source_key) {
            return Err(StoreError::Backend(format!(
                "injected copy failure for '{source_key}'"
            )));
        }
        let data = inner
            .objects
            .get(source_key)
            .cloned()
            .ok_or_else(|| StoreError::ObjectNotFound {
                key: source_key.to_string(),
            })?;
        inner.objects.insert(dest_key.to_string(), data);
        inner.ops.push(StoreOp::Copy {
            from: source_key.to_string(),
            to: dest_key.to_string(),
        });
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        self.check_bucket(bucket)?;
        let mut inner = self.inner.lock().await;

        if inner.fail_delete.contains(key) {
            return Err(StoreError::Backend(format!(
                "injected delete failure for '{key}'"
            )));
        }
        // Deleting an absent key succeeds, as it does on S3.
        inner.objects.remove(key);
        inner.ops.push(StoreOp::Delete {
            key: key.to_string(),
        });
        Ok(())
    }
}

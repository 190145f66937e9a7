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

//! Storage backend trait and implementations.

pub mod memory;
pub mod s3;

pub use memory::{MemoryStore, StoreOp};
pub use s3::S3Store;

use crate::error::StoreError;
use async_trait::async_trait;

/// One page of a bucket listing.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Object keys in this page, in backend order.
    pub keys: Vec<String>,
    /// Continuation token for the next page, or `None` if this was the
    /// last page.
    pub next_token: Option<String>,
}

/// Storage backend interface.
///
/// This trait covers exactly the three operations the rename pipeline
/// consumes: paged listing, server-side copy, and delete. Credential and
/// connection handling are the implementation's concern.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists one page of object keys in a bucket.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket name
    /// * `continuation_token` - Token from the previous page, or `None`
    ///   for the first page
    ///
    /// # Returns
    ///
    /// Returns the page of keys plus a continuation token when more pages
    /// remain. Key order is whatever the backend returns; it is not
    /// guaranteed sorted or stable across calls.
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, StoreError>;

    /// Copies an object to a new key within the same bucket.
    ///
    /// The copy is server-side and preserves the object's content and
    /// metadata.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket name
    /// * `source_key` - Key of the existing object
    /// * `dest_key` - Key for the copy
    async fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        dest_key: &str,
    ) -> Result<(), StoreError>;

    /// Deletes an object from a bucket.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket name
    /// * `key` - Object key
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError>;
}

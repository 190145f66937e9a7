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

//! AWS S3 storage backend.
//!
//! Credentials are resolved by the SDK's default chain (environment,
//! profile, instance role); this module never handles them directly.

use crate::error::StoreError;
use crate::store::{ListPage, ObjectStore};
use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::Client;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters percent-encoded within a copy-source path segment: everything
/// except the RFC 3986 unreserved set. Segment separators are re-inserted
/// by [`encode_copy_source`], so `/` itself never reaches this set.
const COPY_SOURCE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// [`ObjectStore`] backed by an S3-compatible service.
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Creates a store over an already-configured SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
    ) -> Result<ListPage, StoreError> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation_token.map(str::to_string))
            .send()
            .await
            .map_err(map_list_error)?;

        let keys = resp
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(str::to_string))
            .collect();
        let next_token = resp.next_continuation_token().map(str::to_string);

        Ok(ListPage { keys, next_token })
    }

    async fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        dest_key: &str,
    ) -> Result<(), StoreError> {
        self.client
            .copy_object()
            .bucket(bucket)
            .copy_source(encode_copy_source(bucket, source_key))
            .key(dest_key)
            .send()
            .await
            .map_err(|e| map_sdk_error(source_key, e))?;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(key, e))?;
        Ok(())
    }
}

/// Builds the `CopyObject` copy-source header value.
///
/// The value is a URL path, so the key must be percent-encoded or keys
/// containing `?`, `#`, `+`, or non-ASCII bytes would be misread as a
/// path/query by the service. Each segment is encoded separately to keep
/// the `/` separators literal.
fn encode_copy_source(bucket: &str, key: &str) -> String {
    let encoded_key: Vec<String> = key
        .split('/')
        .map(|segment| utf8_percent_encode(segment, COPY_SOURCE_SEGMENT).to_string())
        .collect();
    format!("{}/{}", bucket, encoded_key.join("/"))
}

/// Maps an SDK copy/delete error onto [`StoreError`], preserving the
/// service error code where it matters for the pipeline's failure handling.
fn map_sdk_error<E, R>(key: &str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    classify_object_error(err.code(), key, format!("{}", DisplayErrorContext(&err)))
}

/// Maps an SDK listing error onto [`StoreError`].
///
/// Listing failures never name an object, so the object-not-found kind is
/// deliberately absent here: a missing bucket is a backend failure.
fn map_list_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    classify_list_error(err.code(), format!("{}", DisplayErrorContext(&err)))
}

fn classify_object_error(code: Option<&str>, key: &str, detail: String) -> StoreError {
    match code {
        Some("NoSuchKey") => StoreError::ObjectNotFound {
            key: key.to_string(),
        },
        Some("AccessDenied") => StoreError::AccessDenied(detail),
        _ => StoreError::Backend(detail),
    }
}

fn classify_list_error(code: Option<&str>, detail: String) -> StoreError {
    match code {
        Some("AccessDenied") => StoreError::AccessDenied(detail),
        _ => StoreError::Backend(detail),
    }
}

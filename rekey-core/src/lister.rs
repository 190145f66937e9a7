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

//! Full-bucket key enumeration.

use crate::error::StoreError;
use crate::store::ObjectStore;
use tracing::debug;

/// Lists every key in the bucket, following continuation tokens until the
/// backend reports no more pages.
///
/// The result is a point-in-time snapshot: the bucket is shared and
/// mutable, so a later call may return a different key set. Keys come back
/// in backend order, each exactly once.
pub async fn list_all_keys(
    store: &dyn ObjectStore,
    bucket: &str,
) -> Result<Vec<String>, StoreError> {
    let mut keys = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = store.list_objects(bucket, token.as_deref()).await?;
        keys.extend(page.keys);
        pages += 1;
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    debug!(
        "Listed {} keys from bucket '{}' across {} pages",
        keys.len(),
        bucket,
        pages
    );
    Ok(keys)
}

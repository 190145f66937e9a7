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

//! Bulk rename driver.
//!
//! Pulls the full key snapshot once, then walks it sequentially: evaluate
//! the policy per key, rename matching keys through the object mover, and
//! collect run statistics. One rename completes (or fails) before the next
//! begins; there is no parallelism across keys.

use crate::error::RenameError;
use crate::lister::list_all_keys;
use crate::mover::rename_object;
use crate::policy::RenamePolicy;
use crate::store::ObjectStore;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, info, warn};

/// Whole-run behavior when a single key's rename fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Propagate the first per-key failure as a fatal run error.
    #[default]
    Abort,
    /// Log the failure, count it, and keep renaming the remaining keys.
    Continue,
}

/// Statistics from one bulk rename run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameStats {
    /// Number of keys in the listing snapshot.
    pub keys_listed: u64,
    /// Number of keys the policy flagged for renaming.
    pub keys_matched: u64,
    /// Number of renames performed successfully.
    pub renamed: u64,
    /// Number of flagged keys skipped because the new key equaled the old.
    pub skipped_unchanged: u64,
    /// Number of keys skipped because the policy panicked on them.
    pub policy_errors: u64,
    /// Number of failed renames (only nonzero under
    /// [`FailureMode::Continue`]).
    pub failed: u64,
}

impl RenameStats {
    /// Merges another stats object into this one.
    pub fn merge(&mut self, other: RenameStats) {
        self.keys_listed += other.keys_listed;
        self.keys_matched += other.keys_matched;
        self.renamed += other.renamed;
        self.skipped_unchanged += other.skipped_unchanged;
        self.policy_errors += other.policy_errors;
        self.failed += other.failed;
    }
}

/// Drives a full rename pass over one bucket.
pub struct BulkRenamer<'a> {
    store: &'a dyn ObjectStore,
    bucket: String,
    failure_mode: FailureMode,
    dry_run: bool,
}

impl<'a> BulkRenamer<'a> {
    /// Creates a renamer over the given backend and bucket with the
    /// default failure mode ([`FailureMode::Abort`]) and dry-run disabled.
    pub fn new(store: &'a dyn ObjectStore, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            failure_mode: FailureMode::default(),
            dry_run: false,
        }
    }

    /// Sets the whole-run failure policy.
    pub fn failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Enables or disables dry-run mode. In dry-run mode matching keys are
    /// logged but no copy or delete is ever issued.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs one full rename pass.
    ///
    /// The key set is snapshotted once at the start; keys added to the
    /// bucket afterwards are not seen, and keys deleted by another actor
    /// mid-run fail through the ordinary copy-failure path.
    pub async fn run(&self, policy: &dyn RenamePolicy) -> Result<RenameStats, RenameError> {
        let keys = list_all_keys(self.store, &self.bucket)
            .await
            .map_err(RenameError::Listing)?;

        let mut stats = RenameStats {
            keys_listed: keys.len() as u64,
            ..RenameStats::default()
        };
        info!(
            "Starting rename pass over bucket '{}' ({} keys, dry_run: {})",
            self.bucket, stats.keys_listed, self.dry_run
        );

        for key in keys {
            // Policies are supposed to be total, but a third-party policy
            // panicking on one malformed key must not take down the run.
            let needs_update = match catch_unwind(AssertUnwindSafe(|| policy.needs_update(&key))) {
                Ok(flag) => flag,
                Err(_) => {
                    warn!("Policy panicked evaluating key '{key}', skipping it");
                    stats.policy_errors += 1;
                    continue;
                }
            };
            if !needs_update {
                continue;
            }
            stats.keys_matched += 1;

            let new_key = match catch_unwind(AssertUnwindSafe(|| policy.generate_new_key(&key))) {
                Ok(new_key) => new_key,
                Err(_) => {
                    warn!("Policy panicked generating a new key for '{key}', skipping it");
                    stats.policy_errors += 1;
                    continue;
                }
            };

            if new_key == key {
                // A copy onto the same key would waste two remote calls.
                info!("Key '{key}' already has its target name, skipping");
                stats.skipped_unchanged += 1;
                continue;
            }

            if self.dry_run {
                info!("[DRY-RUN] Would replace '{key}' with '{new_key}'");
                continue;
            }

            match rename_object(self.store, &self.bucket, &key, &new_key).await {
                Ok(()) => stats.renamed += 1,
                Err(e) => match self.failure_mode {
                    FailureMode::Abort => return Err(e),
                    FailureMode::Continue => {
                        error!("Rename failed, continuing: {e}");
                        stats.failed += 1;
                    }
                },
            }
        }

        info!(
            "Rename pass completed. Listed: {}, matched: {}, renamed: {}, \
             skipped unchanged: {}, policy errors: {}, failed: {}",
            stats.keys_listed,
            stats.keys_matched,
            stats.renamed,
            stats.skipped_unchanged,
            stats.policy_errors,
            stats.failed
        );
        Ok(stats)
    }
}

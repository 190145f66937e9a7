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

//! Rename policy interface.

/// Decides which keys get renamed and what they are renamed to.
///
/// Both methods must be pure: no side effects, deterministic output for a
/// given key. `needs_update` must be total over arbitrary key strings; a
/// policy that panics on a malformed key is a defect, although the
/// [`BulkRenamer`](crate::renamer::BulkRenamer) contains such panics and
/// skips the offending key rather than aborting the run.
pub trait RenamePolicy: Send + Sync {
    /// Returns true if the key should be renamed.
    fn needs_update(&self, key: &str) -> bool;

    /// Computes the replacement key.
    ///
    /// Only invoked for keys where [`needs_update`](Self::needs_update)
    /// returned true; implementations need not re-validate the key shape.
    fn generate_new_key(&self, key: &str) -> String;
}

/// Adapts a pair of plain functions into a [`RenamePolicy`].
pub struct FnPolicy<P, G>
where
    P: Fn(&str) -> bool + Send + Sync,
    G: Fn(&str) -> String + Send + Sync,
{
    needs_update: P,
    generate_new_key: G,
}

impl<P, G> FnPolicy<P, G>
where
    P: Fn(&str) -> bool + Send + Sync,
    G: Fn(&str) -> String + Send + Sync,
{
    /// Wraps a predicate and a transform.
    pub fn new(needs_update: P, generate_new_key: G) -> Self {
        Self {
            needs_update,
            generate_new_key,
        }
    }
}

impl<P, G> RenamePolicy for FnPolicy<P, G>
where
    P: Fn(&str) -> bool + Send + Sync,
    G: Fn(&str) -> String + Send + Sync,
{
    fn needs_update(&self, key: &str) -> bool {
        (self.needs_update)(key)
    }

    fn generate_new_key(&self, key: &str) -> String {
        (self.generate_new_key)(key)
    }
}

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

//! Rekey core: storage backend abstraction and the bulk rename pipeline.
//!
//! A rename is a copy-then-delete pair against a backend with no native
//! rename primitive. The pipeline guarantees that a delete is never issued
//! unless the preceding copy was confirmed, so no blob ever becomes
//! unreachable: the worst failure outcome is an object temporarily
//! reachable under both its old and new key.

pub mod error;
pub mod lister;
pub mod mover;
pub mod policy;
pub mod renamer;
pub mod store;

pub use error::{RenameError, StoreError};
pub use lister::list_all_keys;
pub use mover::rename_object;
pub use policy::{FnPolicy, RenamePolicy};
pub use renamer::{BulkRenamer, FailureMode, RenameStats};
pub use store::{ListPage, MemoryStore, ObjectStore, S3Store};

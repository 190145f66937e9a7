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

//! Two-sink logging setup.
//!
//! Every rename attempt and outcome goes to the console and to an
//! append-only log file, so a run that dies mid-way leaves a durable
//! record of which keys were touched.

use anyhow::Context;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// Call once at startup, before any events are emitted. The log file is
/// opened in append mode so successive runs accumulate in one file.
pub fn init(log_file: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rekey_cli=info,rekey_core=info,rekey_policy=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_lines_reach_the_file_sink() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rekey.log");

        init(&path).expect("logging init");
        tracing::info!("Attempting to replace 'old.key' with 'new.key'");

        let contents = std::fs::read_to_string(&path).expect("log file readable");
        assert!(contents.contains("old.key"));
        assert!(contents.contains("new.key"));
    }
}

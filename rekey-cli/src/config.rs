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

//! Configuration for the rekey binary.

use anyhow::bail;
use rekey_core::FailureMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the bucket whose keys get renamed.
    /// Set via the REKEY_BUCKET environment variable (required).
    pub bucket: String,
    /// S3 client settings.
    pub s3: S3Config,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Per-run behavior toggles.
    pub run: RunConfig,
}

/// S3 client settings.
///
/// Credentials are never configured here; the SDK resolves them through
/// its standard chain (environment, shared profile, instance role).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Region override (REKEY_AWS_REGION); falls back to the SDK chain.
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible services (REKEY_ENDPOINT_URL).
    /// Path-style addressing is enabled when this is set.
    pub endpoint_url: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Append-only log file receiving every rename attempt and outcome
    /// alongside the console sink (REKEY_LOG_FILE).
    pub log_file: PathBuf,
}

/// Per-run behavior toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Whole-run failure policy: "abort" or "continue" (REKEY_ON_ERROR).
    pub on_error: String,
    /// When true, log what would be renamed without touching the bucket
    /// (REKEY_DRY_RUN).
    pub dry_run: bool,
}

impl RunConfig {
    /// Parses the configured failure policy.
    pub fn failure_mode(&self) -> anyhow::Result<FailureMode> {
        match self.on_error.as_str() {
            "abort" => Ok(FailureMode::Abort),
            "continue" => Ok(FailureMode::Continue),
            other => bail!("invalid REKEY_ON_ERROR value '{other}' (expected 'abort' or 'continue')"),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let bucket = match std::env::var("REKEY_BUCKET") {
            Ok(bucket) if !bucket.is_empty() => bucket,
            _ => bail!("REKEY_BUCKET must name the bucket to operate on"),
        };

        let config = Self {
            bucket,
            s3: S3Config {
                region: std::env::var("REKEY_AWS_REGION").ok(),
                endpoint_url: std::env::var("REKEY_ENDPOINT_URL").ok(),
            },
            logging: LoggingConfig {
                log_file: std::env::var("REKEY_LOG_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("rekey.log")),
            },
            run: RunConfig {
                on_error: std::env::var("REKEY_ON_ERROR").unwrap_or_else(|_| "abort".to_string()),
                dry_run: std::env::var("REKEY_DRY_RUN")
                    .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            },
        };

        // Reject a bad failure policy at startup, not mid-run.
        config.run.failure_mode()?;
        Ok(config)
    }
}

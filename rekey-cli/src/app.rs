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

//! Application wiring: SDK client construction and the single rename run.

use crate::config::Config;
use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use rekey_core::{BulkRenamer, RenameStats, S3Store};
use rekey_policy::YearMonthPadPolicy;
use tracing::info;

/// Main application.
pub struct App {
    config: Config,
    store: S3Store,
}

impl App {
    /// Creates an application instance with an S3 client resolved through
    /// the SDK's standard credential chain.
    pub async fn new(config: Config) -> Result<Self> {
        info!("Initializing rekey...");

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.s3.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.s3.endpoint_url {
            // S3-compatible services usually need path-style addressing.
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());

        Ok(Self {
            store: S3Store::new(client),
            config,
        })
    }

    /// Runs one bulk rename pass and returns its statistics.
    pub async fn run(&self) -> Result<RenameStats> {
        let failure_mode = self.config.run.failure_mode()?;
        info!(
            "Renaming keys in bucket '{}' (on_error: {}, dry_run: {})",
            self.config.bucket, self.config.run.on_error, self.config.run.dry_run
        );

        let renamer = BulkRenamer::new(&self.store, self.config.bucket.clone())
            .failure_mode(failure_mode)
            .dry_run(self.config.run.dry_run);

        let stats = renamer
            .run(&YearMonthPadPolicy)
            .await
            .context("rename run aborted")?;

        if stats.failed > 0 {
            info!(
                "Run completed with {} failed renames; see the log for the affected keys",
                stats.failed
            );
        }
        Ok(stats)
    }
}

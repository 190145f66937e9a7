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

//! Rekey - Main entry point.
//!
//! Exit code 0 means the run completed (possibly with zero renames);
//! nonzero means the run aborted before exhausting the key set.

use anyhow::Result;
use rekey_cli::{logging, App, Config};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The failure is also in both log sinks when logging came up.
            eprintln!("rekey: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = Config::load()?;
    logging::init(&config.logging.log_file)?;

    info!("Rekey starting...");

    let app = App::new(config).await?;
    match app.run().await {
        Ok(stats) => {
            info!(
                "Done. {} of {} keys renamed.",
                stats.renamed, stats.keys_listed
            );
            Ok(())
        }
        Err(e) => {
            error!("Run aborted: {e:#}");
            Err(e)
        }
    }
}

// Copyright 2025 Fernando Borretti
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

use std::path::PathBuf;

use clap::Parser;

use crate::backend::http::HttpBackend;
use crate::backend::offline::OfflineBackend;
use crate::cmd::drill::SummaryFormat;
use crate::cmd::drill::run_drill;
use crate::cmd::due::print_due;
use crate::config::Config;
use crate::error::Fallible;
use crate::session::deck::FallbackPolicy;
use crate::session::study::StudySession;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study the words that are due for review.
    Drill {
        /// Path to the configuration file. Defaults to `lexicards.toml` in the current directory, if present.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Study the sample deck without contacting the backend.
        #[arg(long)]
        offline: bool,
        /// Format of the end-of-session summary.
        #[arg(long, default_value_t = SummaryFormat::Text)]
        format: SummaryFormat,
    },
    /// Print the words that are due for review as JSON.
    Due {
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the sample deck without contacting the backend.
        #[arg(long)]
        offline: bool,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            config,
            offline,
            format,
        } => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            if offline {
                let mut session = StudySession::new(OfflineBackend, FallbackPolicy::Enabled);
                run_drill(&mut session, stdin.lock(), stdout.lock(), format).await
            } else {
                let config = Config::load(config)?.with_env_overrides();
                let backend = HttpBackend::new(&config.api)?;
                let mut session = StudySession::new(backend, config.session.fallback_policy());
                run_drill(&mut session, stdin.lock(), stdout.lock(), format).await
            }
        }
        Command::Due { config, offline } => {
            let stdout = std::io::stdout();
            if offline {
                print_due(&OfflineBackend, FallbackPolicy::Enabled, stdout.lock()).await
            } else {
                let config = Config::load(config)?.with_env_overrides();
                let backend = HttpBackend::new(&config.api)?;
                print_due(&backend, config.session.fallback_policy(), stdout.lock()).await
            }
        }
    }
}

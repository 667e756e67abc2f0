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

use std::env::var;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::session::deck::FallbackPolicy;

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lexicards.toml";

const API_URL_VAR: &str = "LEXICARDS_API_URL";
const TOKEN_VAR: &str = "LEXICARDS_TOKEN";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Scheme, host and port of the backend, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub words_path: String,
    pub progress_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            token: None,
            timeout_secs: 10,
            words_path: "/api/words/".to_string(),
            progress_path: "/api/progress/review".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Substitute the sample deck when the backend fails or has nothing due.
    pub fallback_deck: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fallback_deck: true,
        }
    }
}

impl SessionConfig {
    pub fn fallback_policy(&self) -> FallbackPolicy {
        if self.fallback_deck {
            FallbackPolicy::Enabled
        } else {
            FallbackPolicy::Disabled
        }
    }
}

impl Config {
    /// Loads the configuration. An explicit path must exist; without one, the
    /// default file is read if present and the defaults are used otherwise.
    pub fn load(path: Option<PathBuf>) -> Fallible<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!(
                        "configuration file {} does not exist.",
                        path.display()
                    ));
                }
                path
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    log::debug!("No configuration file, using defaults.");
                    return Ok(Self::default());
                }
                path
            }
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Fallible<Self> {
        log::debug!("Loading configuration from {}", path.display());
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Applies `LEXICARDS_API_URL` and `LEXICARDS_TOKEN`, which take
    /// precedence over the file.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(var(API_URL_VAR).ok(), var(TOKEN_VAR).ok())
    }

    fn with_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(token) = token {
            self.api.token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.token, None);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.session.fallback_policy(), FallbackPolicy::Enabled);
    }

    #[test]
    fn test_from_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lexicards.toml");
        write(
            &path,
            "[api]\nbase_url = \"http://example.test\"\ntoken = \"abc\"\n\n[session]\nfallback_deck = false\n",
        )?;
        let config = Config::load(Some(path))?;
        assert_eq!(config.api.base_url, "http://example.test");
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        // Unspecified keys keep their defaults.
        assert_eq!(config.api.words_path, "/api/words/");
        assert_eq!(config.session.fallback_policy(), FallbackPolicy::Disabled);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = Config::load(Some(PathBuf::from("./derpherp.toml")));
        let err = result.err().unwrap();
        assert_eq!(
            err.to_string(),
            "error: configuration file ./derpherp.toml does not exist."
        );
    }

    #[test]
    fn test_unknown_key_is_rejected() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lexicards.toml");
        write(&path, "[api]\nbase_uri = \"http://typo.test\"\n")?;
        assert!(Config::from_file(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(
            Some("http://override.test".to_string()),
            Some("token".to_string()),
        );
        assert_eq!(config.api.base_url, "http://override.test");
        assert_eq!(config.api.token.as_deref(), Some("token"));

        let config = Config::default().with_overrides(None, None);
        assert_eq!(config, Config::default());
    }
}

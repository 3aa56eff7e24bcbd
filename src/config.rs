//! Source repository configuration.
//!
//! By default the built-in list of awesome-list repositories is used. A YAML
//! file can replace it:
//!
//! ```yaml
//! repositories:
//!   - https://github.com/rust-unofficial/awesome-rust
//!   - https://github.com/avelino/awesome-go
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Awesome-list repositories synced when no config file is given.
pub const DEFAULT_REPOSITORIES: [&str; 23] = [
    "https://github.com/vinta/awesome-python",
    "https://github.com/awesome-selfhosted/awesome-selfhosted",
    "https://github.com/avelino/awesome-go",
    "https://github.com/Hack-with-Github/Awesome-Hacking",
    "https://github.com/jaywcjlove/awesome-mac",
    "https://github.com/MunGell/awesome-for-beginners",
    "https://github.com/enaqx/awesome-react",
    "https://github.com/fffaraz/awesome-cpp",
    "https://github.com/binhnguyennus/awesome-scalability",
    "https://github.com/sindresorhus/awesome-nodejs",
    "https://github.com/Solido/awesome-flutter",
    "https://github.com/rust-unofficial/awesome-rust",
    "https://github.com/vsouza/awesome-ios",
    "https://github.com/dkhamsing/open-source-ios-apps",
    "https://github.com/brillout/awesome-react-components",
    "https://github.com/serhii-londar/open-source-mac-os-apps",
    "https://github.com/akullpp/awesome-java",
    "https://github.com/docker/awesome-compose",
    "https://github.com/alebcay/awesome-shell",
    "https://github.com/veggiemonk/awesome-docker",
    "https://github.com/ziadoz/awesome-php",
    "https://github.com/viatsko/awesome-vscode",
    "https://github.com/matteocrippa/awesome-swift",
];

/// Runtime configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Remote repositories to clone or pull.
    #[serde(default = "default_repositories")]
    pub repositories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repositories: default_repositories(),
        }
    }
}

fn default_repositories() -> Vec<String> {
    DEFAULT_REPOSITORIES.iter().map(|s| s.to_string()).collect()
}

/// Load the config file at `path`, or the defaults when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML.
#[instrument(level = "info", skip_all, fields(path = ?path))]
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    let config: Config = serde_yaml::from_str(&raw).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })?;

    info!(repositories = config.repositories.len(), "Loaded configuration");
    Ok(config)
}

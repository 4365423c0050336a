// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Environment variables consumed by the remote connection clients.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::error::{StorageError, StorageResult};

/// GCP project of the GCS connection
pub const GCP_PROJECT: &str = "GCP_PROJECT";
/// Bucket of the GCS connection
pub const GCP_BUCKET: &str = "GCP_BUCKET";
/// Azure storage account connection string
pub const AZ_STGACC_KEY: &str = "AZ_STGACC_KEY";

/// Snapshot of environment variables
///
/// The client factory reads credentials from this snapshot rather than from
/// the process environment directly, so callers decide which environment a
/// connection sees.
#[derive(Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Add or override a variable (for method chaining).
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Get a variable a connection cannot be built without.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::MissingCredentials`] naming the variable when it is not set.
    pub fn require(&self, name: &str) -> StorageResult<&str> {
        self.get(name)
            .ok_or_else(|| StorageError::MissingCredentials(name.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// Values may hold secrets, only names are printed.
impl Debug for EnvVars {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut names: Vec<&String> = self.vars.keys().collect();
        names.sort();
        f.debug_struct("EnvVars").field("names", &names).finish()
    }
}

/// Load a `.env` file from the current directory or its parents into the process environment.
///
/// # Arguments
///
/// * `environment` - Name of the environment being set up, used for logging only
///
/// # Returns
///
/// The path of the loaded file, or `None` when no `.env` file exists or it could not be read.
pub fn load_dotenv(environment: &str) -> Option<PathBuf> {
    info!(
        "Setting environment variables for environment: {}",
        environment
    );
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment file={}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => {
            debug!("No .env file found, using process environment only");
            None
        }
        Err(e) => {
            warn!("Failed to load .env file: {}", e);
            None
        }
    }
}

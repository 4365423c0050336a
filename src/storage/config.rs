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

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Kind of storage backing a data asset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    /// Local filesystem under the project data directory
    Local,
    /// Azure Blob Storage account
    AzBlob,
    /// Google Cloud Storage bucket
    Gcs,
}

impl ConnectionKind {
    /// Parse a kind tag strictly (case-insensitive).
    ///
    /// # Returns
    ///
    /// `Some(kind)` for `local`, `azblob` or `gcs`, `None` otherwise.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "local" => Some(ConnectionKind::Local),
            "azblob" => Some(ConnectionKind::AzBlob),
            "gcs" => Some(ConnectionKind::Gcs),
            _ => None,
        }
    }

    /// Resolve a kind tag, degrading to [`ConnectionKind::Local`] on unknown tags.
    ///
    /// Unknown tags are logged at `warn` level and never fail, so a typo in an
    /// asset declaration routes to the local data directory.
    pub fn resolve(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            warn!(
                "Unknown connection kind: {}, attempting to return a local connection",
                tag
            );
            ConnectionKind::Local
        })
    }

    /// Get the kind tag as declared in asset configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::Local => "local",
            ConnectionKind::AzBlob => "azblob",
            ConnectionKind::Gcs => "gcs",
        }
    }

    /// Default connection name used by the connector factory.
    pub fn default_connection_name(&self) -> &'static str {
        match self {
            ConnectionKind::Local => "conn_local",
            ConnectionKind::AzBlob => "conn_azblob",
            ConnectionKind::Gcs => "conn_gcs",
        }
    }
}

impl Display for ConnectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Layers every project is expected to carry under `data/`
pub const KNOWN_LAYERS: [&str; 3] = ["raw", "interim", "processed"];

/// Default configuration file name inside the `conf/` directory
pub const DEFAULT_CONF_FILE: &str = "conf.yaml";

/// Directory layout of a project
///
/// Built once at startup and handed to the components that need it:
///
/// ```text
/// <root>/
///   conf/          configuration files
///   data/<layer>/  local data assets
///   data/temp/     staging root for writes
///   models/        reserved
/// ```
///
/// # Examples
///
/// ```
/// use data_assets::storage::ProjectPaths;
///
/// let paths = ProjectPaths::new("/srv/project");
/// assert!(paths.layer("raw").ends_with("data/raw"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
    data: PathBuf,
    conf: PathBuf,
    models: PathBuf,
    temp: PathBuf,
}

impl ProjectPaths {
    /// Create the layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data = root.join("data");
        Self {
            conf: root.join("conf"),
            models: root.join("models"),
            temp: data.join("temp"),
            data,
            root,
        }
    }

    /// Create the layout rooted at the current working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root of every local data asset.
    pub fn data(&self) -> &Path {
        &self.data
    }

    pub fn conf(&self) -> &Path {
        &self.conf
    }

    pub fn models(&self) -> &Path {
        &self.models
    }

    /// Staging root used by dataset writes.
    pub fn temp(&self) -> &Path {
        &self.temp
    }

    /// Directory of a data layer, e.g. `data/raw`.
    pub fn layer(&self, layer: &str) -> PathBuf {
        self.data.join(layer)
    }

    /// Path of a configuration file inside `conf/`.
    pub fn conf_file(&self, filename: &str) -> PathBuf {
        self.conf.join(filename)
    }
}

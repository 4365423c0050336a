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

//! Declarative data asset records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::conf::{ConfError, ConfResult};
use crate::storage::ConnectionKind;

/// Metadata of a logical data asset
///
/// # Examples
///
/// ```
/// use data_assets::asset::DataAsset;
///
/// let asset = DataAsset::new("testing_source", "local", "raw", "testing_io/test_reading", "csv")
///     .with_description("features and labels from UCI datasets");
/// assert_eq!(asset.file_name(), "testing_io/test_reading.csv");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAsset {
    /// Descriptive name
    pub name: String,
    /// Storage kind tag, `local`, `azblob` or `gcs`
    pub kind: String,
    /// Layer, container or bucket folder, e.g. `raw`
    pub layer: String,
    /// Path inside the layer, without extension
    pub path: String,
    /// File extension, without the leading dot
    pub extension: String,
    #[serde(default)]
    pub description: String,
}

impl DataAsset {
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        layer: impl Into<String>,
        path: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            layer: layer.into(),
            path: path.into(),
            extension: extension.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Extension-qualified path, `{path}.{extension}`.
    pub fn file_name(&self) -> String {
        let extension = self.extension.trim_start_matches('.');
        format!("{}.{}", self.path.trim_end_matches('/'), extension)
    }

    /// Storage kind, unknown tags resolve to local with a warning.
    pub fn connection_kind(&self) -> ConnectionKind {
        ConnectionKind::resolve(&self.kind)
    }
}

/// Source and sink asset declarations of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCatalog {
    #[serde(default)]
    pub sources: Vec<DataAsset>,
    #[serde(default)]
    pub sinks: Vec<DataAsset>,
}

impl AssetCatalog {
    pub fn new(sources: Vec<DataAsset>, sinks: Vec<DataAsset>) -> Self {
        Self { sources, sinks }
    }

    /// Read the `sources` and `sinks` lists of a loaded configuration.
    ///
    /// Missing keys yield empty lists, other keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfError::Yaml`] if an entry is not a valid asset declaration.
    pub fn from_conf(conf: &HashMap<String, serde_yaml::Value>) -> ConfResult<Self> {
        let assets = |key: &str| -> ConfResult<Vec<DataAsset>> {
            match conf.get(key) {
                Some(value) => serde_yaml::from_value(value.clone()).map_err(ConfError::from),
                None => Ok(Vec::new()),
            }
        };
        Ok(Self {
            sources: assets("sources")?,
            sinks: assets("sinks")?,
        })
    }

    pub fn source(&self, name: &str) -> Option<&DataAsset> {
        self.sources.iter().find(|a| a.name == name)
    }

    pub fn sink(&self, name: &str) -> Option<&DataAsset> {
        self.sinks.iter().find(|a| a.name == name)
    }
}

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

//! YAML project configuration.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for configuration loading
pub type ConfResult<T> = Result<T, ConfError>;

/// Untyped configuration, top-level keys to YAML values
pub type Conf = HashMap<String, serde_yaml::Value>;

/// Load `<dir>/<filename>` as an untyped string-keyed mapping.
///
/// No schema is enforced, callers pick the keys they understand.
pub fn load_conf(dir: &Path, filename: &str) -> ConfResult<Conf> {
    load_conf_file(&dir.join(filename))
}

/// Load a YAML configuration file as an untyped string-keyed mapping.
///
/// An empty file loads as an empty mapping. Scalars keep their YAML types,
/// `seed: 42` loads as a number and `debug: true` as a bool, so callers that
/// expect strings must convert.
///
/// # Errors
///
/// This function will return an error if:
/// * The file cannot be read
/// * The content is not YAML or its top level is not a mapping
pub fn load_conf_file(path: &Path) -> ConfResult<Conf> {
    debug!("Loading configuration file={}", path.display());
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Conf::new());
    }
    Ok(serde_yaml::from_str(&content)?)
}

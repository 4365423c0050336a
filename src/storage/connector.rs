// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License. You may obtain a copy
// of the License at http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under
// the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR REPRESENTATIONS
// OF ANY KIND, either express or implied. See the License for the specific language
// governing permissions and limitations under the License.

use async_trait::async_trait;
use bytes::Bytes;
use object_store::path::Path as ObjectPath;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;

use super::config::ConnectionKind;
use super::error::StorageResult;

/// Byte-level access to one data asset in a storage backend
///
/// A connector is bound to a single `layer` and extension-qualified `path`
/// at construction, so reads and writes take no location arguments.
#[async_trait]
pub trait DataConnector: Send + Sync {
    /// Storage kind serving this connector.
    fn kind(&self) -> ConnectionKind;

    /// Layer the asset lives in (a `data/` subfolder, a container, or a bucket folder).
    fn layer(&self) -> &str;

    /// Path of the asset inside its layer, including the file extension.
    fn path(&self) -> &str;

    /// Full provider-specific URI of the asset, e.g. `file:///srv/data/raw/t/data.csv`.
    fn uri(&self) -> String;

    /// Read the whole asset.
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Bytes)` - The asset contents, positioned at the start
    /// * `Err(StorageError)` - If the asset cannot be read
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The file or blob does not exist
    /// * Permission denied
    /// * Network or storage access errors occur
    async fn get_data(&self) -> StorageResult<Bytes>;

    /// Persist a staged file as this asset.
    ///
    /// # Arguments
    ///
    /// * `staged_file` - Local file holding the serialized data to persist
    ///
    /// # Errors
    ///
    /// This function will return an error if the staged file cannot be read or
    /// the destination cannot be written. Read-only backends return `Ok(())`
    /// without touching the store.
    async fn write_data(&self, staged_file: &Path) -> StorageResult<()>;
}

impl Debug for dyn DataConnector {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "DataConnector(kind={}, uri={})", self.kind(), self.uri())
    }
}

/// Helper function to create an ObjectPath from a layer and a relative path
pub(crate) fn object_path(segments: &[&str]) -> ObjectPath {
    let joined = segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    ObjectPath::from(joined.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_joins_segments() {
        let path = object_path(&["raw", "t/data.csv"]);
        assert_eq!(path.as_ref(), "raw/t/data.csv");
    }

    #[test]
    fn test_object_path_trims_slashes() {
        let path = object_path(&["data/", "/raw/", "2024/01/train.csv"]);
        assert_eq!(path.as_ref(), "data/raw/2024/01/train.csv");
    }

    #[test]
    fn test_object_path_skips_empty_segments() {
        let path = object_path(&["", "raw", "", "file.csv"]);
        assert_eq!(path.as_ref(), "raw/file.csv");
    }

    #[test]
    fn test_connector_debug() {
        struct MockConnector {
            uri: String,
        }

        #[async_trait]
        impl DataConnector for MockConnector {
            fn kind(&self) -> ConnectionKind {
                ConnectionKind::Local
            }

            fn layer(&self) -> &str {
                "raw"
            }

            fn path(&self) -> &str {
                "t/data.csv"
            }

            fn uri(&self) -> String {
                self.uri.clone()
            }

            async fn get_data(&self) -> StorageResult<Bytes> {
                Ok(Bytes::new())
            }

            async fn write_data(&self, _staged_file: &Path) -> StorageResult<()> {
                Ok(())
            }
        }

        let connector: &dyn DataConnector = &MockConnector {
            uri: "file:///mock/raw/t/data.csv".to_string(),
        };
        let debug_str = format!("{:?}", connector);
        assert!(debug_str.contains("DataConnector"));
        assert!(debug_str.contains("kind=local"));
        assert!(debug_str.contains("file:///mock/raw/t/data.csv"));
    }
}

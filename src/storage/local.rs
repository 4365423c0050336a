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

use async_trait::async_trait;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use super::client::LocalClient;
use super::config::ConnectionKind;
use super::connector::{object_path, DataConnector};
use super::error::StorageResult;

/// Connector for an asset under the local data directory, `<root>/<layer>/<path>`
pub struct LocalConnector {
    client: LocalClient,
    layer: String,
    path: String,
    store: Arc<dyn ObjectStore>,
}

impl LocalConnector {
    /// Create a local connector.
    ///
    /// The data root is created when missing so sinks can be written to a fresh project.
    ///
    /// # Arguments
    ///
    /// * `client` - Local client holding the data root
    /// * `layer` - Subfolder of the data root, e.g. `raw`
    /// * `path` - Path inside the layer with file name and extension, e.g. `2024/01/data.csv`
    ///
    /// # Errors
    ///
    /// Returns an error if the data root cannot be created or resolved.
    pub fn new(
        client: LocalClient,
        layer: impl Into<String>,
        path: impl Into<String>,
    ) -> StorageResult<Self> {
        std::fs::create_dir_all(client.root())?;
        let store = LocalFileSystem::new_with_prefix(client.root())?;

        Ok(Self {
            client,
            layer: layer.into(),
            path: path.into(),
            store: Arc::new(store),
        })
    }

    /// Filesystem path of the asset.
    pub fn file_path(&self) -> PathBuf {
        self.client.root().join(&self.layer).join(&self.path)
    }

    fn location(&self) -> ObjectPath {
        object_path(&[self.layer.as_str(), self.path.as_str()])
    }
}

#[async_trait]
impl DataConnector for LocalConnector {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Local
    }

    fn layer(&self) -> &str {
        &self.layer
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn uri(&self) -> String {
        format!("file://{}", self.file_path().display())
    }

    async fn get_data(&self) -> StorageResult<Bytes> {
        info!("Reading file={} from layer={}", self.path, self.layer);
        let result = self.store.get(&self.location()).await?;
        Ok(result.bytes().await?)
    }

    async fn write_data(&self, staged_file: &Path) -> StorageResult<()> {
        let contents = tokio::fs::read(staged_file).await?;
        let size = contents.len();
        // The local store creates missing parent directories on put
        self.store
            .put(&self.location(), PutPayload::from(contents))
            .await?;
        info!(
            "Wrote file={} to layer={}, size={}",
            self.path, self.layer, size
        );
        Ok(())
    }
}

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
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::client::GcsClient;
use super::config::ConnectionKind;
use super::connector::{object_path, DataConnector};
use super::error::{StorageError, StorageResult};

/// Top-level folder of every asset in a bucket
pub const BUCKET_DATA_PREFIX: &str = "data";

/// Read-only connector for an object in a GCS bucket, `data/<layer>/<path>`
pub struct GcsConnector {
    project: String,
    bucket: String,
    layer: String,
    path: String,
    store: Arc<dyn ObjectStore>,
}

impl GcsConnector {
    /// Create a connector bound to `data/<layer>/<path>` of the client's bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket store cannot be built, e.g. the credentials file is unreadable.
    pub fn new(
        client: &GcsClient,
        layer: impl Into<String>,
        path: impl Into<String>,
    ) -> StorageResult<Self> {
        let store = client.bucket_builder().build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create GCS store: {}", e))
        })?;
        Ok(Self::with_store(client, layer, path, Arc::new(store)))
    }

    /// Create a connector over an already built bucket store.
    pub fn with_store(
        client: &GcsClient,
        layer: impl Into<String>,
        path: impl Into<String>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        info!(
            "Setting connection to GCP project={} and GCS bucket={}",
            client.project, client.bucket
        );
        Self {
            project: client.project.clone(),
            bucket: client.bucket.clone(),
            layer: layer.into(),
            path: path.into(),
            store,
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object name inside the bucket.
    pub fn location(&self) -> ObjectPath {
        object_path(&[BUCKET_DATA_PREFIX, self.layer.as_str(), self.path.as_str()])
    }
}

#[async_trait]
impl DataConnector for GcsConnector {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::Gcs
    }

    fn layer(&self) -> &str {
        &self.layer
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn uri(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.location())
    }

    async fn get_data(&self) -> StorageResult<Bytes> {
        let location = self.location();
        info!("Reading file={} from bucket={}", location, self.bucket);
        let result = self.store.get(&location).await?;
        Ok(result.bytes().await?)
    }

    async fn write_data(&self, staged_file: &Path) -> StorageResult<()> {
        warn!(
            "Writing is not supported for GCS connections, skipping file={} for {}",
            staged_file.display(),
            self.uri()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use object_store::memory::InMemory;
    use object_store::PutPayload;

    fn client() -> GcsClient {
        GcsClient::new("conn_gcs", "my-project", "my-bucket")
    }

    #[test]
    fn test_location_is_prefixed_with_data_and_layer() {
        let connector = GcsConnector::with_store(
            &client(),
            "raw",
            "2024/01/data.csv",
            Arc::new(InMemory::new()),
        );

        assert_eq!(connector.location().as_ref(), "data/raw/2024/01/data.csv");
        assert_eq!(connector.uri(), "gs://my-bucket/data/raw/2024/01/data.csv");
        assert_eq!(connector.project(), "my-project");
        assert_eq!(connector.bucket(), "my-bucket");
        assert_eq!(connector.kind(), ConnectionKind::Gcs);
    }

    #[tokio::test]
    async fn test_get_data_reads_prefixed_object() {
        let store = Arc::new(InMemory::new());
        store
            .put(
                &object_path(&["data/raw/t/data.csv"]),
                PutPayload::from_static(b"id_1,y_1\n7,1\n"),
            )
            .await
            .unwrap();
        let connector = GcsConnector::with_store(&client(), "raw", "t/data.csv", store);

        let bytes = connector.get_data().await.unwrap();
        assert_eq!(bytes.as_ref(), b"id_1,y_1\n7,1\n");
    }

    #[tokio::test]
    async fn test_get_data_ignores_unprefixed_object() {
        let store = Arc::new(InMemory::new());
        store
            .put(
                &object_path(&["raw/t/data.csv"]),
                PutPayload::from_static(b"a\n1\n"),
            )
            .await
            .unwrap();
        let connector = GcsConnector::with_store(&client(), "raw", "t/data.csv", store);

        assert!(matches!(
            connector.get_data().await,
            Err(StorageError::ObjectStoreError(object_store::Error::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_write_data_is_a_no_op() {
        let store = Arc::new(InMemory::new());
        store
            .put(
                &object_path(&["data/raw/t/data.csv"]),
                PutPayload::from_static(b"original"),
            )
            .await
            .unwrap();
        let connector = GcsConnector::with_store(&client(), "raw", "t/data.csv", store.clone());
        let temp_dir = tempfile::TempDir::new().unwrap();
        let staged = temp_dir.path().join("staged.csv");
        std::fs::write(&staged, "replacement").unwrap();

        connector.write_data(&staged).await.unwrap();

        let objects: Vec<_> = store.list(None).try_collect().await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(connector.get_data().await.unwrap().as_ref(), b"original");
    }
}

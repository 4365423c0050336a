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
use object_store::ObjectStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::client::AzureBlobClient;
use super::config::ConnectionKind;
use super::connector::{object_path, DataConnector};
use super::error::{StorageError, StorageResult};

/// Read-only connector for a blob in an Azure storage account container
///
/// The layer names the container and the path names the blob inside it.
pub struct AzureBlobConnector {
    account: String,
    container: String,
    path: String,
    store: Arc<dyn ObjectStore>,
}

impl AzureBlobConnector {
    /// Create a connector bound to `container` of the client's storage account.
    ///
    /// # Errors
    ///
    /// Returns an error if the container store cannot be built, e.g. the account key is not valid base64.
    pub fn new(
        client: &AzureBlobClient,
        container: impl Into<String>,
        path: impl Into<String>,
    ) -> StorageResult<Self> {
        let container = container.into();
        let store = client.container_builder(&container).build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create Azure store: {}", e))
        })?;
        Ok(Self::with_store(client, container, path, Arc::new(store)))
    }

    /// Create a connector over an already built container store.
    pub fn with_store(
        client: &AzureBlobClient,
        container: impl Into<String>,
        path: impl Into<String>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        let connector = Self {
            account: client.account_name().to_string(),
            container: container.into(),
            path: path.into(),
            store,
        };
        info!(
            "Setting connection storage account={} and container={}",
            connector.account, connector.container
        );
        connector
    }

    pub fn account(&self) -> &str {
        &self.account
    }
}

#[async_trait]
impl DataConnector for AzureBlobConnector {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::AzBlob
    }

    fn layer(&self) -> &str {
        &self.container
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn uri(&self) -> String {
        format!(
            "az://{}/{}",
            self.container,
            object_path(&[self.path.as_str()])
        )
    }

    async fn get_data(&self) -> StorageResult<Bytes> {
        info!(
            "Reading file={} from container={}",
            self.path, self.container
        );
        let result = self.store.get(&object_path(&[self.path.as_str()])).await?;
        Ok(result.bytes().await?)
    }

    async fn write_data(&self, staged_file: &Path) -> StorageResult<()> {
        warn!(
            "Writing is not supported for Azure Blob connections, skipping file={} for {}",
            staged_file.display(),
            self.uri()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::client::AzureConnectionString;
    use object_store::memory::InMemory;
    use futures::TryStreamExt;
    use object_store::PutPayload;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client() -> AzureBlobClient {
        let connection: AzureConnectionString =
            "AccountName=myaccount;AccountKey=c2VjcmV0LWtleS1ieXRlcw=="
                .parse()
                .unwrap();
        AzureBlobClient::new("conn_azblob", connection)
    }

    #[test]
    fn test_new_binds_container_and_path() {
        let connector = AzureBlobConnector::new(&client(), "raw", "t/data.csv").unwrap();

        assert_eq!(connector.kind(), ConnectionKind::AzBlob);
        assert_eq!(connector.account(), "myaccount");
        assert_eq!(connector.layer(), "raw");
        assert_eq!(connector.path(), "t/data.csv");
        assert_eq!(connector.uri(), "az://raw/t/data.csv");
    }

    #[tokio::test]
    async fn test_get_data_reads_blob_from_container_root() {
        let store = Arc::new(InMemory::new());
        store
            .put(
                &object_path(&["t/data.csv"]),
                PutPayload::from_static(b"x_1,split\n1,0.train\n"),
            )
            .await
            .unwrap();
        let connector = AzureBlobConnector::with_store(&client(), "raw", "t/data.csv", store);

        let bytes = connector.get_data().await.unwrap();
        assert_eq!(bytes.as_ref(), b"x_1,split\n1,0.train\n");
    }

    #[tokio::test]
    async fn test_get_data_missing_blob() {
        let connector =
            AzureBlobConnector::with_store(&client(), "raw", "none.csv", Arc::new(InMemory::new()));

        assert!(matches!(
            connector.get_data().await,
            Err(StorageError::ObjectStoreError(object_store::Error::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_write_data_is_a_no_op() {
        let store = Arc::new(InMemory::new());
        let connector =
            AzureBlobConnector::with_store(&client(), "raw", "t/data.csv", store.clone());
        let temp_dir = tempfile::TempDir::new().unwrap();
        let staged = temp_dir.path().join("staged.csv");
        std::fs::write(&staged, "a\n1\n").unwrap();

        connector.write_data(&staged).await.unwrap();

        let objects: Vec<_> = store.list(None).try_collect().await.unwrap();
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn test_sas_signature_is_sent_as_issued() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await
                .unwrap();
            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        let connection: AzureConnectionString = format!(
            "DefaultEndpointsProtocol=http;AccountName=myaccount;\
             BlobEndpoint=http://127.0.0.1:{}/myaccount;\
             SharedAccessSignature=sv=2022-11-02&sig=abc%2Bdef%3D",
            port
        )
        .parse()
        .unwrap();
        let client = AzureBlobClient::new("conn_azblob", connection);
        let connector = AzureBlobConnector::new(&client, "raw", "t/data.csv").unwrap();

        assert!(connector.get_data().await.is_err());
        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET "), "{}", request_line);
        assert!(request_line.contains("sig=abc%2Bdef%3D"), "{}", request_line);
        assert!(!request_line.contains("%252B"), "{}", request_line);
    }
}

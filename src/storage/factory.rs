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

use std::sync::Arc;
use tracing::{debug, info};

use super::azblob::AzureBlobConnector;
use super::client::{connection_client_factory, ConnectionClient};
use super::config::{ConnectionKind, ProjectPaths, KNOWN_LAYERS};
use super::connector::DataConnector;
use super::env::EnvVars;
use super::error::StorageResult;
use super::gcs::GcsConnector;
use super::local::LocalConnector;
use crate::asset::DataAsset;

/// Factory for creating data connectors from asset declarations
#[derive(Debug, Clone)]
pub struct ConnectorFactory {
    paths: ProjectPaths,
    env: EnvVars,
}

impl ConnectorFactory {
    /// Create a factory resolving local assets under `paths` and remote credentials from `env`.
    pub fn new(paths: ProjectPaths, env: EnvVars) -> Self {
        Self { paths, env }
    }

    /// Create a factory reading remote credentials from the process environment.
    pub fn from_env(paths: ProjectPaths) -> Self {
        Self::new(paths, EnvVars::from_process())
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Create the connector for a data asset.
    ///
    /// The asset kind is resolved leniently: unknown kinds log a warning and are
    /// served by the local connector.
    ///
    /// # Arguments
    ///
    /// * `asset` - The data asset to connect to
    ///
    /// # Returns
    ///
    /// A `Result` containing:
    /// * `Ok(Arc<dyn DataConnector>)` - A connector bound to the asset's layer and `{path}.{extension}`
    /// * `Err(StorageError)` - If the connection cannot be created
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Required environment variables of a remote backend are missing
    /// * The remote store cannot be initialized
    /// * The local data root cannot be created
    pub fn connector_for(&self, asset: &DataAsset) -> StorageResult<Arc<dyn DataConnector>> {
        info!(
            "Setting connection to data asset={} of kind={} to layer={} and path={}",
            asset.name, asset.kind, asset.layer, asset.path
        );
        let kind = asset.connection_kind();
        if kind == ConnectionKind::Local && !KNOWN_LAYERS.contains(&asset.layer.as_str()) {
            debug!("Layer={} is not one of {:?}", asset.layer, KNOWN_LAYERS);
        }
        let client = connection_client_factory(
            kind,
            kind.default_connection_name(),
            &self.paths,
            &self.env,
        )?;
        let path = asset.file_name();

        let connector: Arc<dyn DataConnector> = match client {
            ConnectionClient::Local(local) => {
                Arc::new(LocalConnector::new(local, &asset.layer, path)?)
            }
            ConnectionClient::AzureBlob(azure) => {
                Arc::new(AzureBlobConnector::new(&azure, &asset.layer, path)?)
            }
            ConnectionClient::Gcs(gcs) => Arc::new(GcsConnector::new(&gcs, &asset.layer, path)?),
        };
        Ok(connector)
    }
}

/// Create the connector for a data asset, see [`ConnectorFactory::connector_for`].
pub fn data_connections_factory(
    asset: &DataAsset,
    paths: &ProjectPaths,
    env: &EnvVars,
) -> StorageResult<Arc<dyn DataConnector>> {
    ConnectorFactory::new(paths.clone(), env.clone()).connector_for(asset)
}

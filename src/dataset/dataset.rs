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

use bytes::Bytes;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::{DatasetError, DatasetResult};
use super::metadata::ColumnMetadata;
use super::options::CsvOptions;
use super::split::{Split, SPLIT_COLUMN};
use crate::asset::DataAsset;
use crate::storage::{ConnectorFactory, DataConnector};

/// Staging directory name under the system temp dir, used when no project is given
const DEFAULT_STAGING_DIR: &str = "data-assets";

/// Table bound to a data connector
///
/// The table is loaded by [`Dataset::read`]; column roles are classified on
/// every load. Writes are staged as CSV in a fresh directory under the
/// staging root and handed over to the connector.
pub struct Dataset {
    connector: Arc<dyn DataConnector>,
    staging_root: PathBuf,
    data: Option<DataFrame>,
    metadata: Option<ColumnMetadata>,
}

impl Dataset {
    pub fn new(connector: Arc<dyn DataConnector>) -> Self {
        Self {
            connector,
            staging_root: std::env::temp_dir().join(DEFAULT_STAGING_DIR),
            data: None,
            metadata: None,
        }
    }

    /// Create a dataset for `asset`, staging writes under the project temp directory.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Storage`] if the connector cannot be created.
    pub fn from_asset(factory: &ConnectorFactory, asset: &DataAsset) -> DatasetResult<Self> {
        let connector = factory.connector_for(asset)?;
        Ok(Self::new(connector).with_staging_root(factory.paths().temp()))
    }

    pub fn with_staging_root(mut self, staging_root: impl Into<PathBuf>) -> Self {
        self.staging_root = staging_root.into();
        self
    }

    pub fn connector(&self) -> &Arc<dyn DataConnector> {
        &self.connector
    }

    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    /// Read the asset as CSV with default options.
    pub async fn read(&mut self) -> DatasetResult<&DataFrame> {
        self.read_with(&CsvOptions::default()).await
    }

    /// Read the asset as CSV.
    ///
    /// Replaces any previously loaded table and its column metadata.
    pub async fn read_with(&mut self, options: &CsvOptions) -> DatasetResult<&DataFrame> {
        self.read_using(|content| Ok(options.parse(content)?)).await
    }

    /// Read the asset with a custom parser.
    pub async fn read_using<F>(&mut self, parser: F) -> DatasetResult<&DataFrame>
    where
        F: FnOnce(Bytes) -> DatasetResult<DataFrame>,
    {
        let content = self.connector.get_data().await?;
        let frame = parser(content)?;
        info!(
            "Loaded rows={} columns={} from {}",
            frame.height(),
            frame.width(),
            self.connector.uri()
        );
        Ok(self.load(frame))
    }

    /// Write a table to the asset as CSV with default options.
    pub async fn write(&self, frame: &mut DataFrame) -> DatasetResult<()> {
        self.write_with(frame, &CsvOptions::default()).await
    }

    /// Write a table to the asset as CSV.
    ///
    /// The table is staged at `<staging dir>/<asset path>`, where the staging
    /// dir is created for this write only and removed once the connector is done,
    /// whether the write succeeded or not. Other content of the staging root is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The staging directory or file cannot be created
    /// * The table cannot be serialized
    /// * The connector fails to persist the staged file
    pub async fn write_with(&self, frame: &mut DataFrame, options: &CsvOptions) -> DatasetResult<()> {
        let mut content = Vec::new();
        options.serialize(&mut content, frame)?;

        tokio::fs::create_dir_all(&self.staging_root).await?;
        let staging_root = self.staging_root.clone();
        let staging_dir = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix("stage-")
                .tempdir_in(staging_root)
        })
        .await
        .map_err(std::io::Error::other)??;

        let staged_file = staging_dir.path().join(self.connector.path());
        if let Some(parent) = staged_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&staged_file, &content).await?;
        debug!(
            "Staged rows={} to file={}",
            frame.height(),
            staged_file.display()
        );

        self.connector.write_data(&staged_file).await?;
        info!("Wrote rows={} to {}", frame.height(), self.connector.uri());
        Ok(())
    }

    /// The loaded table.
    pub fn data(&self) -> DatasetResult<&DataFrame> {
        self.data.as_ref().ok_or(DatasetError::NotLoaded)
    }

    /// Column roles of the loaded table.
    pub fn metadata(&self) -> DatasetResult<&ColumnMetadata> {
        self.metadata.as_ref().ok_or(DatasetError::NotLoaded)
    }

    /// Feature columns, in table order.
    pub fn features(&self) -> DatasetResult<DataFrame> {
        self.select(&self.metadata()?.features)
    }

    /// Target columns, in table order.
    pub fn targets(&self) -> DatasetResult<DataFrame> {
        self.select(&self.metadata()?.targets)
    }

    /// Identifier columns, in table order.
    pub fn ids(&self) -> DatasetResult<DataFrame> {
        self.select(&self.metadata()?.ids)
    }

    /// Positions of numeric and categorical features within [`Dataset::features`].
    pub fn features_indexes(&self) -> DatasetResult<(Vec<usize>, Vec<usize>)> {
        Ok(self.metadata()?.features_indexes())
    }

    /// Rows whose split label is one of `splits`, as a new dataset on the same connector.
    ///
    /// Row order is kept and metadata is classified from the subset. An empty
    /// `splits` yields an empty table with all columns.
    ///
    /// # Errors
    ///
    /// * [`DatasetError::NotLoaded`] if nothing was read yet
    /// * [`DatasetError::Polars`] if the table has no string `split` column
    pub fn get_subset(&self, splits: &[Split]) -> DatasetResult<Dataset> {
        let frame = self.data()?;
        let labels: Vec<&str> = splits.iter().map(Split::as_str).collect();

        let column = frame.column(SPLIT_COLUMN)?.as_materialized_series().str()?;
        let mask: BooleanChunked = column
            .into_iter()
            .map(|label| label.map(|l| labels.iter().any(|wanted| *wanted == l)))
            .collect();
        let subset = frame.filter(&mask)?;
        debug!(
            "Selected rows={} of {} for splits={:?}",
            subset.height(),
            frame.height(),
            labels
        );

        let mut dataset = Dataset::new(Arc::clone(&self.connector))
            .with_staging_root(self.staging_root.clone());
        dataset.load(subset);
        Ok(dataset)
    }

    fn load(&mut self, frame: DataFrame) -> &DataFrame {
        self.metadata = Some(ColumnMetadata::from_frame(&frame));
        self.data.insert(frame)
    }

    fn select(&self, columns: &[String]) -> DatasetResult<DataFrame> {
        Ok(self.data()?.select(columns.iter().map(String::as_str))?)
    }
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("uri", &self.connector.uri())
            .field("staging_root", &self.staging_root)
            .field("shape", &self.data.as_ref().map(DataFrame::shape))
            .finish()
    }
}

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

//! # Data Assets
//!
//! A Rust library for reading and writing tabular data assets of a data science
//! project across the local filesystem, Azure Blob Storage and Google Cloud Storage.
//!
//! Assets are declared by name, storage kind, layer and path. The library
//! resolves each declaration into a connector, loads CSV content into a polars
//! `DataFrame` and classifies its columns by naming convention.
//!
//! ## Features
//!
//! - **Storage backends**: local data folder, Azure Blob containers, GCS buckets
//! - **Column roles**: features (`x_`), targets (`y_`), identifiers (`id_`) and the `split` column
//! - **Numeric and categorical features**: split by column type, with positional indexes
//! - **Subsets**: row selection by split label (`0.train`, `1.valid`, `2.test`)
//!
//! ## Quick Start
//!
//! ### Local Filesystem Example
//!
//! ```rust,no_run
//! use data_assets::{ConnectorFactory, DataAsset, Dataset, ProjectPaths, Split};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! // Project layout rooted at the working directory, data under ./data
//! let paths = ProjectPaths::from_current_dir()?;
//! let factory = ConnectorFactory::from_env(paths);
//!
//! // ./data/raw/testing_io/test_reading.csv
//! let asset = DataAsset::new("testing_source", "local", "raw", "testing_io/test_reading", "csv");
//! let mut dataset = Dataset::from_asset(&factory, &asset)?;
//! dataset.read().await?;
//!
//! println!("{:?}", dataset.metadata()?.to_map());
//! let train = dataset.get_subset(&[Split::Train])?;
//! println!("{}", train.features()?);
//! # Ok(())
//! # }
//! ```
//!
//! ### Azure Blob Example
//!
//! ```rust,no_run
//! use data_assets::{ConnectorFactory, DataAsset, Dataset, EnvVars, ProjectPaths};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let env = EnvVars::default().with_var(
//!     "AZ_STGACC_KEY",
//!     "DefaultEndpointsProtocol=https;AccountName=myaccount;AccountKey=KEY",
//! );
//! let factory = ConnectorFactory::new(ProjectPaths::new("."), env);
//!
//! // The layer names the container
//! let asset = DataAsset::new("landing", "azblob", "landing", "2024/01/events", "csv");
//! let mut dataset = Dataset::from_asset(&factory, &asset)?;
//! println!("{}", dataset.read().await?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`asset`] - Data asset declarations
//! - [`conf`] - YAML project configuration
//! - [`storage`] - Connection clients and data connectors
//! - [`dataset`] - Tables, column metadata and splits

pub mod asset;
pub mod conf;
pub mod dataset;
pub mod storage;

// Re-export commonly used types
pub use asset::{AssetCatalog, DataAsset};
pub use dataset::{ColumnMetadata, CsvOptions, Dataset, DatasetError, Split};
pub use storage::{
    ConnectionKind, ConnectorFactory, DataConnector, EnvVars, ProjectPaths, StorageError,
};

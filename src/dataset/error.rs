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

use polars::prelude::PolarsError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while reading, writing or querying a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset has no data loaded, read it first")]
    NotLoaded,
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

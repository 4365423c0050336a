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

//! Tabular datasets over data connectors
//!
//! A [`Dataset`] loads a CSV asset into a polars `DataFrame`, classifies its
//! columns by name prefix and filters rows by split label.

pub mod dataset;
pub mod error;
pub mod metadata;
pub mod options;
pub mod split;

// Public exports
pub use dataset::Dataset;
pub use error::{DatasetError, DatasetResult};
pub use metadata::ColumnMetadata;
pub use options::CsvOptions;
pub use split::{Split, SPLIT_COLUMN};

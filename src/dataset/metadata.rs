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

use polars::prelude::{DataFrame, DataType};
use serde::Serialize;
use std::collections::BTreeMap;

use super::split::SPLIT_COLUMN;

/// Prefix of feature columns
pub const FEATURE_PREFIX: &str = "x_";
/// Prefix of target columns
pub const TARGET_PREFIX: &str = "y_";
/// Prefix of identifier columns
pub const ID_PREFIX: &str = "id_";

/// Column roles of a table, inferred from column names
///
/// - features start with `x_`; integer and float features are numeric, all
///   others categorical
/// - targets start with `y_`
/// - identifiers start with `id_`
/// - the split column is named `split`
///
/// Column order of the table is kept in every group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub features: Vec<String>,
    #[serde(rename = "target")]
    pub targets: Vec<String>,
    #[serde(rename = "id_cols")]
    pub ids: Vec<String>,
    #[serde(rename = "split_col")]
    pub splits: Vec<String>,
    pub features_num: Vec<String>,
    pub features_cat: Vec<String>,
    /// Positions of numeric features within `features`
    #[serde(skip)]
    pub idx_features_num: Vec<usize>,
    /// Positions of categorical features within `features`
    #[serde(skip)]
    pub idx_features_cat: Vec<usize>,
}

impl ColumnMetadata {
    /// Classify the columns of a table.
    pub fn from_frame(frame: &DataFrame) -> Self {
        let mut metadata = ColumnMetadata::default();

        for column in frame.get_columns() {
            let name = column.name().as_str();
            if name.starts_with(FEATURE_PREFIX) {
                let position = metadata.features.len();
                metadata.features.push(name.to_string());
                if is_numeric(column.dtype()) {
                    metadata.features_num.push(name.to_string());
                    metadata.idx_features_num.push(position);
                } else {
                    metadata.features_cat.push(name.to_string());
                    metadata.idx_features_cat.push(position);
                }
            } else if name.starts_with(TARGET_PREFIX) {
                metadata.targets.push(name.to_string());
            } else if name.starts_with(ID_PREFIX) {
                metadata.ids.push(name.to_string());
            } else if name == SPLIT_COLUMN {
                metadata.splits.push(name.to_string());
            }
        }

        metadata
    }

    /// The six column groups keyed `features`, `target`, `id_cols`, `split_col`,
    /// `features_num` and `features_cat`.
    pub fn to_map(&self) -> BTreeMap<&'static str, Vec<String>> {
        BTreeMap::from([
            ("features", self.features.clone()),
            ("target", self.targets.clone()),
            ("id_cols", self.ids.clone()),
            ("split_col", self.splits.clone()),
            ("features_num", self.features_num.clone()),
            ("features_cat", self.features_cat.clone()),
        ])
    }

    /// Positions of numeric and categorical features within `features`.
    pub fn features_indexes(&self) -> (Vec<usize>, Vec<usize>) {
        (self.idx_features_num.clone(), self.idx_features_cat.clone())
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::Float32
            | DataType::Float64
    )
}

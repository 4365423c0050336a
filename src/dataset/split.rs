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

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Name of the column carrying split labels
pub const SPLIT_COLUMN: &str = "split";

/// Partition label of a row
///
/// Labels carry their ordinal as a prefix (`0.train`, `1.valid`, `2.test`) so
/// a plain string sort of the split column yields train, valid, test.
/// `Ord` follows the same ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Split {
    #[serde(rename = "0.train")]
    Train,
    #[serde(rename = "1.valid")]
    Valid,
    #[serde(rename = "2.test")]
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Valid, Split::Test];

    /// Label stored in the split column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "0.train",
            Split::Valid => "1.valid",
            Split::Test => "2.test",
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            Split::Train => 0,
            Split::Valid => 1,
            Split::Test => 2,
        }
    }
}

impl Display for Split {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Split::ALL
            .into_iter()
            .find(|split| split.as_str() == s)
            .ok_or_else(|| format!("Unknown split label: {}", s))
    }
}

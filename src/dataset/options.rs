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
use std::io::{Cursor, Write};

/// CSV read and write options
///
/// `separator`, `has_header` and `quote_char` apply to both directions, the
/// remaining options are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub separator: u8,
    pub has_header: bool,
    /// `None` disables quoting
    pub quote_char: Option<u8>,
    /// Rows scanned to infer column types, `None` scans the whole file
    pub infer_schema_length: Option<usize>,
    pub skip_rows: usize,
    /// Values read as null in every column
    pub null_values: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            has_header: true,
            quote_char: Some(b'"'),
            infer_schema_length: Some(100),
            skip_rows: 0,
            null_values: Vec::new(),
        }
    }
}

impl CsvOptions {
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_quote_char(mut self, quote_char: Option<u8>) -> Self {
        self.quote_char = quote_char;
        self
    }

    pub fn with_infer_schema_length(mut self, infer_schema_length: Option<usize>) -> Self {
        self.infer_schema_length = infer_schema_length;
        self
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    pub fn with_null_values<I, S>(mut self, null_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = null_values.into_iter().map(Into::into).collect();
        self
    }

    /// Parse CSV content into a table.
    pub fn parse(&self, content: Bytes) -> PolarsResult<DataFrame> {
        let null_values = (!self.null_values.is_empty()).then(|| {
            NullValues::AllColumns(self.null_values.iter().map(|v| v.as_str().into()).collect())
        });

        CsvReadOptions::default()
            .with_has_header(self.has_header)
            .with_infer_schema_length(self.infer_schema_length)
            .with_skip_rows(self.skip_rows)
            .map_parse_options(|parse| {
                parse
                    .with_separator(self.separator)
                    .with_quote_char(self.quote_char)
                    .with_null_values(null_values.clone())
            })
            .into_reader_with_file_handle(Cursor::new(content))
            .finish()
    }

    /// Serialize a table as CSV into `writer`.
    pub fn serialize<W: Write>(&self, writer: W, frame: &mut DataFrame) -> PolarsResult<()> {
        let mut csv = CsvWriter::new(writer)
            .include_header(self.has_header)
            .with_separator(self.separator);
        if let Some(quote_char) = self.quote_char {
            csv = csv.with_quote_char(quote_char);
        }
        csv.finish(frame)
    }
}

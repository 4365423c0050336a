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

use thiserror::Error;

/// Errors that can occur while resolving or using a data connection
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing required environment variable: {0}")]
    MissingCredentials(String),

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Object store error: {0}")]
    ObjectStoreError(#[from] object_store::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_missing_credentials_names_the_variable() {
        let error = StorageError::MissingCredentials("AZ_STGACC_KEY".to_string());
        assert_eq!(
            error.to_string(),
            "Missing required environment variable: AZ_STGACC_KEY"
        );
    }

    #[test]
    fn test_invalid_connection_string() {
        let error = StorageError::InvalidConnectionString("missing AccountName".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid connection string: missing AccountName"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let storage_error: StorageError = io_error.into();

        match storage_error {
            StorageError::IoError(_) => {
                assert!(storage_error.to_string().contains("IO error"));
            }
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_object_store_not_found_conversion() {
        let source = object_store::Error::NotFound {
            path: "raw/t/data.csv".to_string(),
            source: Box::new(io::Error::new(io::ErrorKind::NotFound, "gone")),
        };
        let storage_error: StorageError = source.into();

        assert!(matches!(
            storage_error,
            StorageError::ObjectStoreError(object_store::Error::NotFound { .. })
        ));
        assert!(storage_error.to_string().contains("raw/t/data.csv"));
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let url_error = url::ParseError::EmptyHost;
        let storage_error: StorageError = url_error.into();

        assert!(matches!(storage_error, StorageError::UrlParseError(_)));
        assert!(storage_error.to_string().contains("URL parse error"));
    }
}

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

//! Storage connection layer
//!
//! This module resolves a data asset declaration into a byte-level connector
//! against one of the supported backends (local filesystem, Azure Blob Storage,
//! Google Cloud Storage).
//!
//! Every backend is served through the `object_store` crate. Connection clients
//! hold the account-level state (data root, parsed connection string, project
//! and bucket), connectors bind a client to a single layer and path.

pub mod azblob;
pub mod client;
pub mod config;
pub mod connector;
pub mod env;
pub mod error;
pub mod factory;
pub mod gcs;
pub mod local;

// Public exports
pub use client::{connection_client_factory, connection_client_factory_for_tag, ConnectionClient};
pub use config::{ConnectionKind, ProjectPaths};
pub use connector::DataConnector;
pub use env::EnvVars;
pub use error::{StorageError, StorageResult};
pub use factory::{data_connections_factory, ConnectorFactory};

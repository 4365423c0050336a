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

use object_store::azure::{AzureConfigKey, MicrosoftAzureBuilder};
use object_store::gcp::GoogleCloudStorageBuilder;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;
use url::Url;

use super::config::{ConnectionKind, ProjectPaths};
use super::env::{EnvVars, AZ_STGACC_KEY, GCP_BUCKET, GCP_PROJECT};
use super::error::{StorageError, StorageResult};

/// Account name Azurite and the legacy storage emulator answer to
const EMULATOR_ACCOUNT: &str = "devstoreaccount1";

/// Endpoint suffix of the public Azure cloud
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Storage-account level handle shared by the connectors of one backend
#[derive(Debug, Clone)]
pub enum ConnectionClient {
    Local(LocalClient),
    AzureBlob(AzureBlobClient),
    Gcs(GcsClient),
}

impl ConnectionClient {
    pub fn name(&self) -> &str {
        match self {
            ConnectionClient::Local(client) => &client.name,
            ConnectionClient::AzureBlob(client) => &client.name,
            ConnectionClient::Gcs(client) => &client.name,
        }
    }

    pub fn kind(&self) -> ConnectionKind {
        match self {
            ConnectionClient::Local(_) => ConnectionKind::Local,
            ConnectionClient::AzureBlob(_) => ConnectionKind::AzBlob,
            ConnectionClient::Gcs(_) => ConnectionKind::Gcs,
        }
    }
}

/// Client of the local data directory
#[derive(Debug, Clone)]
pub struct LocalClient {
    pub name: String,
    pub root: PathBuf,
}

impl LocalClient {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Client of an Azure storage account
#[derive(Debug, Clone)]
pub struct AzureBlobClient {
    pub name: String,
    pub connection: AzureConnectionString,
}

impl AzureBlobClient {
    pub fn new(name: impl Into<String>, connection: AzureConnectionString) -> Self {
        Self {
            name: name.into(),
            connection,
        }
    }

    pub fn account_name(&self) -> &str {
        &self.connection.account
    }

    /// Builder for the store of one container of this account.
    pub fn container_builder(&self, container: &str) -> MicrosoftAzureBuilder {
        self.connection.builder(container)
    }
}

/// Client of a GCS bucket in a GCP project
#[derive(Debug, Clone)]
pub struct GcsClient {
    pub name: String,
    pub project: String,
    pub bucket: String,
}

impl GcsClient {
    pub fn new(
        name: impl Into<String>,
        project: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            bucket: bucket.into(),
        }
    }

    /// Builder for the bucket store.
    ///
    /// Credentials come from the environment, usually a service account file
    /// referenced by `GOOGLE_APPLICATION_CREDENTIALS`.
    pub fn bucket_builder(&self) -> GoogleCloudStorageBuilder {
        GoogleCloudStorageBuilder::from_env().with_bucket_name(&self.bucket)
    }
}

/// Parsed Azure storage account connection string
///
/// Accepts the `Key=Value;Key=Value` form the Azure portal hands out:
///
/// ```text
/// DefaultEndpointsProtocol=https;AccountName=acc;AccountKey=<base64>;EndpointSuffix=core.windows.net
/// ```
///
/// as well as `SharedAccessSignature`, `BlobEndpoint` and `UseDevelopmentStorage=true`.
#[derive(Clone, PartialEq, Eq)]
pub struct AzureConnectionString {
    pub account: String,
    pub access_key: Option<String>,
    pub sas_token: Option<String>,
    pub protocol: String,
    pub endpoint_suffix: Option<String>,
    pub blob_endpoint: Option<Url>,
    pub use_emulator: bool,
}

impl AzureConnectionString {
    /// Connection to the local storage emulator.
    pub fn emulator() -> Self {
        Self {
            account: EMULATOR_ACCOUNT.to_string(),
            access_key: None,
            sas_token: None,
            protocol: "http".to_string(),
            endpoint_suffix: None,
            blob_endpoint: None,
            use_emulator: true,
        }
    }

    fn builder(&self, container: &str) -> MicrosoftAzureBuilder {
        let builder = MicrosoftAzureBuilder::new().with_container_name(container);
        if self.use_emulator {
            return builder.with_use_emulator(true);
        }

        let mut builder = builder.with_account(&self.account);
        if let Some(key) = &self.access_key {
            builder = builder.with_access_key(key);
        } else if let Some(sas_token) = &self.sas_token {
            // Passed as the raw query string, the store decodes it
            builder = builder.with_config(
                AzureConfigKey::SasKey,
                sas_token.trim_start_matches('?'),
            );
        }
        if let Some(endpoint) = &self.blob_endpoint {
            builder = builder.with_endpoint(endpoint.to_string());
        } else if let Some(suffix) = self.endpoint_suffix.as_deref() {
            // Sovereign clouds, e.g. core.chinacloudapi.cn
            if suffix != DEFAULT_ENDPOINT_SUFFIX {
                builder = builder.with_endpoint(format!(
                    "{}://{}.blob.{}",
                    self.protocol, self.account, suffix
                ));
            }
        }
        if self.protocol.eq_ignore_ascii_case("http") {
            builder = builder.with_allow_http(true);
        }
        builder
    }
}

impl FromStr for AzureConnectionString {
    type Err = StorageError;

    fn from_str(s: &str) -> StorageResult<Self> {
        let mut fields: HashMap<String, String> = HashMap::new();
        for (position, segment) in s
            .split(';')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .enumerate()
        {
            // Values may contain '=' (base64 keys, SAS tokens), split on the first only
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                StorageError::InvalidConnectionString(format!(
                    "segment {} is not a Key=Value pair",
                    position
                ))
            })?;
            fields.insert(key.trim().to_lowercase(), value.trim().to_string());
        }

        if fields
            .get("usedevelopmentstorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return Ok(Self::emulator());
        }

        let account = fields.remove("accountname").ok_or_else(|| {
            StorageError::InvalidConnectionString("missing AccountName".to_string())
        })?;
        let access_key = fields.remove("accountkey");
        let sas_token = fields.remove("sharedaccesssignature");
        if access_key.is_none() && sas_token.is_none() {
            return Err(StorageError::InvalidConnectionString(format!(
                "account {} has neither AccountKey nor SharedAccessSignature",
                account
            )));
        }

        let blob_endpoint = fields
            .remove("blobendpoint")
            .map(|endpoint| Url::parse(&endpoint))
            .transpose()?;

        Ok(Self {
            account,
            access_key,
            sas_token,
            protocol: fields
                .remove("defaultendpointsprotocol")
                .unwrap_or_else(|| "https".to_string()),
            endpoint_suffix: fields.remove("endpointsuffix"),
            blob_endpoint,
            use_emulator: false,
        })
    }
}

impl Debug for AzureConnectionString {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AzureConnectionString")
            .field("account", &self.account)
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .field("sas_token", &self.sas_token.as_ref().map(|_| "<redacted>"))
            .field("protocol", &self.protocol)
            .field("endpoint_suffix", &self.endpoint_suffix)
            .field("blob_endpoint", &self.blob_endpoint.as_ref().map(Url::as_str))
            .field("use_emulator", &self.use_emulator)
            .finish()
    }
}

/// Create the connection client for a storage kind.
///
/// # Arguments
///
/// * `kind` - The storage kind to connect to
/// * `name` - Descriptive name of the connection, e.g. `source`
/// * `paths` - Project layout, the local client is rooted at its data directory
/// * `env` - Environment the remote credentials are read from
///
/// # Errors
///
/// This function will return an error if:
/// * `AZ_STGACC_KEY` is missing or not a valid connection string (Azure Blob)
/// * `GCP_PROJECT` or `GCP_BUCKET` is missing (GCS)
pub fn connection_client_factory(
    kind: ConnectionKind,
    name: &str,
    paths: &ProjectPaths,
    env: &EnvVars,
) -> StorageResult<ConnectionClient> {
    debug!("Creating connection client name={} kind={}", name, kind);
    let client = match kind {
        ConnectionKind::Local => ConnectionClient::Local(LocalClient::new(name, paths.data())),
        ConnectionKind::AzBlob => {
            let connection = env.require(AZ_STGACC_KEY)?.parse()?;
            ConnectionClient::AzureBlob(AzureBlobClient::new(name, connection))
        }
        ConnectionKind::Gcs => ConnectionClient::Gcs(GcsClient::new(
            name,
            env.require(GCP_PROJECT)?,
            env.require(GCP_BUCKET)?,
        )),
    };
    Ok(client)
}

/// Create the connection client for a raw kind tag.
///
/// Unknown tags fall back to a local client with a warning, see [`ConnectionKind::resolve`].
pub fn connection_client_factory_for_tag(
    tag: &str,
    name: &str,
    paths: &ProjectPaths,
    env: &EnvVars,
) -> StorageResult<ConnectionClient> {
    connection_client_factory(ConnectionKind::resolve(tag), name, paths, env)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT_KEY: &str = "c2VjcmV0LWtleS1ieXRlcw==";

    fn connection_string() -> String {
        format!(
            "DefaultEndpointsProtocol=https;AccountName=myaccount;AccountKey={};EndpointSuffix=core.windows.net",
            ACCOUNT_KEY
        )
    }

    #[test]
    fn test_local_client_rooted_at_data_dir() {
        let paths = ProjectPaths::new("/srv/project");
        let client =
            connection_client_factory(ConnectionKind::Local, "source", &paths, &EnvVars::default())
                .unwrap();

        match &client {
            ConnectionClient::Local(local) => {
                assert_eq!(local.root(), Path::new("/srv/project/data"))
            }
            other => panic!("Expected Local client, got {:?}", other),
        }
        assert_eq!(client.name(), "source");
        assert_eq!(client.kind(), ConnectionKind::Local);
    }

    #[test]
    fn test_unknown_tag_builds_local_client() {
        let paths = ProjectPaths::new("/srv/project");
        let client =
            connection_client_factory_for_tag("s3", "sink", &paths, &EnvVars::default()).unwrap();

        assert_eq!(client.kind(), ConnectionKind::Local);
        assert_eq!(client.name(), "sink");
    }

    #[test]
    fn test_gcs_client_from_env() {
        let env = EnvVars::default()
            .with_var(GCP_PROJECT, "my-project")
            .with_var(GCP_BUCKET, "my-bucket");
        let client = connection_client_factory(
            ConnectionKind::Gcs,
            "conn_gcs",
            &ProjectPaths::new("/p"),
            &env,
        )
        .unwrap();

        match client {
            ConnectionClient::Gcs(gcs) => {
                assert_eq!(gcs.project, "my-project");
                assert_eq!(gcs.bucket, "my-bucket");
            }
            other => panic!("Expected Gcs client, got {:?}", other),
        }
    }

    #[test]
    fn test_gcs_client_missing_bucket() {
        let env = EnvVars::default().with_var(GCP_PROJECT, "my-project");
        let result =
            connection_client_factory(ConnectionKind::Gcs, "conn_gcs", &ProjectPaths::new("/p"), &env);

        match result {
            Err(StorageError::MissingCredentials(name)) => assert_eq!(name, GCP_BUCKET),
            other => panic!("Expected MissingCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_azure_client_from_env() {
        let env = EnvVars::default().with_var(AZ_STGACC_KEY, connection_string());
        let client = connection_client_factory(
            ConnectionKind::AzBlob,
            "conn_azblob",
            &ProjectPaths::new("/p"),
            &env,
        )
        .unwrap();

        match client {
            ConnectionClient::AzureBlob(azure) => {
                assert_eq!(azure.account_name(), "myaccount");
                assert_eq!(azure.connection.access_key.as_deref(), Some(ACCOUNT_KEY));
            }
            other => panic!("Expected AzureBlob client, got {:?}", other),
        }
    }

    #[test]
    fn test_azure_client_missing_key() {
        let result = connection_client_factory(
            ConnectionKind::AzBlob,
            "conn_azblob",
            &ProjectPaths::new("/p"),
            &EnvVars::default(),
        );

        match result {
            Err(StorageError::MissingCredentials(name)) => assert_eq!(name, AZ_STGACC_KEY),
            other => panic!("Expected MissingCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_connection_string() {
        let parsed: AzureConnectionString = connection_string().parse().unwrap();

        assert_eq!(parsed.account, "myaccount");
        assert_eq!(parsed.access_key.as_deref(), Some(ACCOUNT_KEY));
        assert_eq!(parsed.protocol, "https");
        assert_eq!(parsed.endpoint_suffix.as_deref(), Some("core.windows.net"));
        assert!(parsed.sas_token.is_none());
        assert!(!parsed.use_emulator);
    }

    #[test]
    fn test_parse_connection_string_with_sas_and_endpoint() {
        let parsed: AzureConnectionString =
            "BlobEndpoint=https://myaccount.blob.core.windows.net/;AccountName=myaccount;SharedAccessSignature=sv=2022-11-02&sig=abc%3D"
                .parse()
                .unwrap();

        assert_eq!(parsed.sas_token.as_deref(), Some("sv=2022-11-02&sig=abc%3D"));
        assert_eq!(
            parsed.blob_endpoint.as_ref().map(Url::as_str),
            Some("https://myaccount.blob.core.windows.net/")
        );
    }

    #[test]
    fn test_parse_development_storage() {
        let parsed: AzureConnectionString = "UseDevelopmentStorage=true".parse().unwrap();
        assert_eq!(parsed, AzureConnectionString::emulator());
        assert_eq!(parsed.account, EMULATOR_ACCOUNT);
    }

    #[test]
    fn test_parse_connection_string_without_account() {
        let result: StorageResult<AzureConnectionString> =
            format!("AccountKey={}", ACCOUNT_KEY).parse();
        assert!(matches!(result, Err(StorageError::InvalidConnectionString(_))));
    }

    #[test]
    fn test_parse_connection_string_without_credentials() {
        let result: StorageResult<AzureConnectionString> = "AccountName=myaccount".parse();
        assert!(matches!(result, Err(StorageError::InvalidConnectionString(_))));
    }

    #[test]
    fn test_parse_connection_string_malformed_segment() {
        let result: StorageResult<AzureConnectionString> = "AccountName=a;garbage".parse();
        match result {
            Err(StorageError::InvalidConnectionString(msg)) => assert!(msg.contains("segment 1")),
            other => panic!("Expected InvalidConnectionString, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_connection_string_bad_endpoint() {
        let result: StorageResult<AzureConnectionString> = format!(
            "AccountName=a;AccountKey={};BlobEndpoint=not a url",
            ACCOUNT_KEY
        )
        .parse();
        assert!(matches!(result, Err(StorageError::UrlParseError(_))));
    }

    #[test]
    fn test_connection_string_debug_redacts_secrets() {
        let parsed: AzureConnectionString = connection_string().parse().unwrap();
        let debug_str = format!("{:?}", parsed);

        assert!(debug_str.contains("myaccount"));
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains(ACCOUNT_KEY));
    }

    #[test]
    fn test_azure_container_builder_builds_offline() {
        let parsed: AzureConnectionString = connection_string().parse().unwrap();
        let client = AzureBlobClient::new("conn_azblob", parsed);
        assert!(client.container_builder("raw").build().is_ok());
    }
}

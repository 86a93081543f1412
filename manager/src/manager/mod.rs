//! Manager operations
//!
//! Each operation is one request/response exchange with the manager's text
//! interface. Nothing is retried or cached; failures come back as
//! [`ManagerError`] and a webapp missing from the listing is reported as
//! [`WebappStatus::NotFound`], not as an error.

use tracing::info;
use url::Url;

use crate::errors::ManagerError;
use crate::http::client::HttpClient;
use crate::http::command::ManagerCommand;
use crate::http::endpoint::EndpointConfig;
use crate::http::response::{parse_listing, parse_status, ManagerResponse};
use crate::models::deploy::{Archive, DeployRequest};
use crate::models::status::{WebappListing, WebappStatus, WebappStatusRecord};

/// Client for one manager instance
pub struct Manager {
    client: HttpClient,
}

impl Manager {
    /// Create a manager client for the endpoint
    pub fn new(endpoint: EndpointConfig) -> Result<Self, ManagerError> {
        Ok(Self {
            client: HttpClient::new(endpoint)?,
        })
    }

    /// Wrap an already configured HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        self.client.endpoint()
    }

    /// Deploy an archive to `path`
    pub async fn deploy(
        &self,
        path: &str,
        archive: Archive,
        update: bool,
        tag: Option<&str>,
    ) -> Result<ManagerResponse, ManagerError> {
        let mut request = DeployRequest::new(path)
            .with_archive(archive)
            .with_update(update);
        if let Some(tag) = tag {
            request = request.with_tag(tag);
        }
        self.deploy_request(request).await
    }

    /// Deploy a context descriptor to `path`, optionally with an archive
    pub async fn deploy_context(
        &self,
        path: &str,
        descriptor: Url,
        archive: Option<Archive>,
        update: bool,
        tag: Option<&str>,
    ) -> Result<ManagerResponse, ManagerError> {
        let mut request = DeployRequest::new(path)
            .with_descriptor(descriptor)
            .with_update(update);
        if let Some(archive) = archive {
            request = request.with_archive(archive);
        }
        if let Some(tag) = tag {
            request = request.with_tag(tag);
        }
        self.deploy_request(request).await
    }

    /// Deploy any shape of deploy request
    pub async fn deploy_request(&self, request: DeployRequest) -> Result<ManagerResponse, ManagerError> {
        let path = request.path.clone();
        let (command, payload) = request.into_command();
        let response = self.client.invoke(&command, payload).await?;
        info!("Deployed webapp at {}: {}", path, response.message());
        Ok(response)
    }

    /// Undeploy the webapp at `path`, deleting its files
    pub async fn undeploy(&self, path: &str) -> Result<ManagerResponse, ManagerError> {
        self.invoke_path(ManagerCommand::Undeploy { path: path.to_string() }).await
    }

    /// Remove the webapp at `path`
    pub async fn remove(&self, path: &str) -> Result<ManagerResponse, ManagerError> {
        self.invoke_path(ManagerCommand::Remove { path: path.to_string() }).await
    }

    pub async fn reload(&self, path: &str) -> Result<ManagerResponse, ManagerError> {
        self.invoke_path(ManagerCommand::Reload { path: path.to_string() }).await
    }

    pub async fn start(&self, path: &str) -> Result<ManagerResponse, ManagerError> {
        self.invoke_path(ManagerCommand::Start { path: path.to_string() }).await
    }

    pub async fn stop(&self, path: &str) -> Result<ManagerResponse, ManagerError> {
        self.invoke_path(ManagerCommand::Stop { path: path.to_string() }).await
    }

    /// List deployed webapps, returning the raw response
    pub async fn list(&self) -> Result<String, ManagerError> {
        Ok(self.client.invoke(&ManagerCommand::List, None).await?.into_raw())
    }

    /// Deployed webapps as typed records
    pub async fn applications(&self) -> Result<Vec<WebappListing>, ManagerError> {
        parse_listing(&self.list().await?)
    }

    /// Current status of the webapp at `path`
    pub async fn status(&self, path: &str) -> Result<WebappStatusRecord, ManagerError> {
        let listing = self.list().await?;
        let status = parse_status(&listing, path)?;
        if status == WebappStatus::NotFound {
            info!("No webapp deployed at {}", path);
        }
        Ok(WebappStatusRecord {
            path: path.to_string(),
            status,
        })
    }

    /// Server and JVM version information
    pub async fn server_info(&self) -> Result<String, ManagerError> {
        Ok(self.client.invoke(&ManagerCommand::ServerInfo, None).await?.into_raw())
    }

    /// Session statistics of the webapp at `path`
    pub async fn sessions(&self, path: &str) -> Result<String, ManagerError> {
        let command = ManagerCommand::Sessions { path: path.to_string() };
        Ok(self.client.invoke(&command, None).await?.into_raw())
    }

    /// Global JNDI resources, optionally restricted to one Java type
    pub async fn resources(&self, resource_type: Option<&str>) -> Result<String, ManagerError> {
        let command = ManagerCommand::Resources {
            resource_type: resource_type.map(str::to_string),
        };
        Ok(self.client.invoke(&command, None).await?.into_raw())
    }

    async fn invoke_path(&self, command: ManagerCommand) -> Result<ManagerResponse, ManagerError> {
        let response = self.client.invoke(&command, None).await?;
        info!("{}: {}", command.name(), response.message());
        Ok(response)
    }
}

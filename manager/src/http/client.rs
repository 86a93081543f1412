//! HTTP client for the manager text interface

use reqwest::{header, Body, Client, Method, RequestBuilder, StatusCode};
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::authn::basic::basic_authorization;
use crate::errors::ManagerError;
use crate::http::command::ManagerCommand;
use crate::http::endpoint::EndpointConfig;
use crate::http::response::ManagerResponse;
use crate::models::deploy::Payload;

/// Size of the chunks an uploaded payload is read in
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

const OCTET_STREAM: &str = "application/octet-stream";

/// HTTP client bound to one manager endpoint
pub struct HttpClient {
    client: Client,
    endpoint: EndpointConfig,
    chunk_size: usize,
}

impl HttpClient {
    /// Create a new HTTP client for the endpoint
    pub fn new(endpoint: EndpointConfig) -> Result<Self, ManagerError> {
        let mut builder = Client::builder();
        if let Some(timeout) = endpoint.timeout() {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Read uploaded payloads in chunks of `chunk_size` bytes
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Prepare the request for a command.
    ///
    /// Without a payload this is a plain `GET`. With one it is a `PUT` whose
    /// body is streamed from the payload with chunked transfer encoding, so
    /// the archive is never held in memory as a whole.
    pub fn request(
        &self,
        command: &ManagerCommand,
        payload: Option<Payload>,
    ) -> Result<RequestBuilder, ManagerError> {
        let url = self.endpoint.command_url(&command.to_path(self.endpoint.charset()))?;

        let mut request = match payload {
            None => {
                debug!("GET {}", url);
                self.client.request(Method::GET, url)
            }
            Some(reader) => {
                debug!("PUT {} (streamed, {} byte chunks)", url, self.chunk_size);
                let stream = ReaderStream::with_capacity(reader, self.chunk_size);
                self.client
                    .request(Method::PUT, url)
                    .header(header::CONTENT_TYPE, OCTET_STREAM)
                    .body(Body::wrap_stream(stream))
            }
        };

        if let Some(user_agent) = self.endpoint.user_agent() {
            request = request.header(header::USER_AGENT, user_agent);
        }

        if let Some(username) = self.endpoint.username() {
            request = request.header(
                header::AUTHORIZATION,
                basic_authorization(username, self.endpoint.password()),
            );
        }

        Ok(request)
    }

    /// Invoke a command and classify the response
    pub async fn invoke(
        &self,
        command: &ManagerCommand,
        payload: Option<Payload>,
    ) -> Result<ManagerResponse, ManagerError> {
        let response = self.request(command, payload)?.send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                warn!("Manager rejected credentials for {} command", command.name());
                return Err(ManagerError::InvalidCredentials);
            }
            StatusCode::FORBIDDEN => {
                warn!("Manager denied {} command to the configured user", command.name());
                return Err(ManagerError::Forbidden);
            }
            _ => {}
        }

        let response = response.error_for_status()?;
        let bytes = response.bytes().await?;
        // Response bodies are always UTF-8, whatever the query charset
        let body = String::from_utf8_lossy(&bytes).into_owned();

        ManagerResponse::parse(body)
    }
}

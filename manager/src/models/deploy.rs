//! Deployment request models

use std::fmt;

use tokio::io::AsyncRead;
use url::Url;

use crate::http::command::ManagerCommand;

/// A byte source streamed as a request body
pub type Payload = Box<dyn AsyncRead + Send + Unpin + 'static>;

/// Where the manager gets the webapp archive from
pub enum Archive {
    /// A URL the server resolves itself, sent as the `war` parameter
    Url(Url),

    /// Archive bytes uploaded in the request body
    Stream(Payload),
}

impl Archive {
    /// Upload the archive from a reader
    pub fn stream(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Archive::Stream(Box::new(reader))
    }
}

impl fmt::Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Archive::Url(url) => f.debug_tuple("Url").field(&url.as_str()).finish(),
            Archive::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A deployment at one context path.
///
/// Covers every deploy shape: path only (deploy from the host's app base),
/// descriptor only, archive only, or descriptor plus archive.
#[derive(Debug)]
pub struct DeployRequest {
    pub path: String,
    pub descriptor: Option<Url>,
    pub archive: Option<Archive>,
    pub update: bool,
    pub tag: Option<String>,
}

impl DeployRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            descriptor: None,
            archive: None,
            update: false,
            tag: None,
        }
    }

    /// Deploy the given context descriptor
    pub fn with_descriptor(mut self, descriptor: Url) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    pub fn with_archive(mut self, archive: Archive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Replace an existing webapp at the same path instead of failing
    pub fn with_update(mut self, update: bool) -> Self {
        self.update = update;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Split into the command to invoke and the body to upload, if any
    pub fn into_command(self) -> (ManagerCommand, Option<Payload>) {
        let (war, payload) = match self.archive {
            Some(Archive::Url(url)) => (Some(url.to_string()), None),
            Some(Archive::Stream(reader)) => (None, Some(reader)),
            None => (None, None),
        };

        let command = ManagerCommand::Deploy {
            path: self.path,
            config: self.descriptor.map(|d| d.to_string()),
            war,
            update: self.update,
            tag: self.tag,
        };
        (command, payload)
    }
}

//! Manager response parsing

use crate::errors::ManagerError;
use crate::models::status::{WebappListing, WebappStatus};

/// Prefix of every successful manager response
pub const SUCCESS_PREFIX: &str = "OK - ";

/// A successful manager response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerResponse {
    raw: String,
}

impl ManagerResponse {
    /// Classify a response body. Anything not starting with the success
    /// prefix is a protocol failure carrying the full body.
    pub fn parse(body: String) -> Result<Self, ManagerError> {
        if body.starts_with(SUCCESS_PREFIX) {
            Ok(Self { raw: body })
        } else {
            Err(ManagerError::Protocol(body))
        }
    }

    /// The body exactly as received
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn into_raw(self) -> String {
        self.raw
    }

    /// First line of the body without the success prefix
    pub fn message(&self) -> &str {
        let first = self.raw.lines().next().unwrap_or_default();
        first.strip_prefix(SUCCESS_PREFIX).unwrap_or(first)
    }
}

fn records(listing: &str) -> impl Iterator<Item = &str> {
    listing
        .split('\n')
        .map(|record| record.trim_end_matches('\r'))
        .filter(|record| !record.is_empty())
}

/// Find the status of `path` in a listing.
///
/// The first field equal to `path` in listing order selects the field right
/// after it as the status token. A path missing from the listing is
/// `NotFound`.
pub fn parse_status(listing: &str, path: &str) -> Result<WebappStatus, ManagerError> {
    for record in records(listing) {
        let mut fields = record.split(':').filter(|field| !field.is_empty());
        while let Some(field) = fields.next() {
            if field == path {
                return match fields.next() {
                    Some(token) => token.parse(),
                    None => Err(ManagerError::MalformedListing(record.to_string())),
                };
            }
        }
    }
    Ok(WebappStatus::NotFound)
}

/// Parse every `path:status:sessions:docbase` record of a listing
pub fn parse_listing(listing: &str) -> Result<Vec<WebappListing>, ManagerError> {
    records(listing)
        .filter(|record| !record.starts_with(SUCCESS_PREFIX))
        .map(|record| -> Result<WebappListing, ManagerError> {
            let malformed = || ManagerError::MalformedListing(record.to_string());
            let mut fields = record.splitn(4, ':');
            let path = fields.next().ok_or_else(malformed)?;
            let status: WebappStatus = fields.next().ok_or_else(malformed)?.parse()?;
            let sessions: u32 = fields
                .next()
                .and_then(|s| s.trim().parse().ok())
                .ok_or_else(malformed)?;
            let docbase = fields.next().unwrap_or_default();

            Ok(WebappListing {
                path: path.to_string(),
                status,
                sessions,
                docbase: docbase.to_string(),
            })
        })
        .collect()
}

//! catmgr library
//!
//! Client for the text-based manager of a servlet container: deploy,
//! undeploy, reload, start, stop and inspect webapps over HTTP.

pub mod authn;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod manager;
pub mod models;
pub mod storage;
pub mod utils;

pub use errors::{FailureKind, ManagerError};
pub use http::endpoint::EndpointConfig;
pub use manager::Manager;
pub use models::deploy::{Archive, DeployRequest};
pub use models::status::{WebappStatus, WebappStatusRecord};

//! Manager command paths

use url::form_urlencoded::byte_serialize;

use crate::http::endpoint::QueryCharset;

/// A text-interface manager command and its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerCommand {
    Deploy {
        path: String,
        config: Option<String>,
        war: Option<String>,
        update: bool,
        tag: Option<String>,
    },
    Undeploy { path: String },
    Remove { path: String },
    Reload { path: String },
    Start { path: String },
    Stop { path: String },
    List,
    ServerInfo,
    Sessions { path: String },
    Resources { resource_type: Option<String> },
}

impl ManagerCommand {
    /// Command name as it appears in the URL
    pub fn name(&self) -> &'static str {
        match self {
            ManagerCommand::Deploy { .. } => "deploy",
            ManagerCommand::Undeploy { .. } => "undeploy",
            ManagerCommand::Remove { .. } => "remove",
            ManagerCommand::Reload { .. } => "reload",
            ManagerCommand::Start { .. } => "start",
            ManagerCommand::Stop { .. } => "stop",
            ManagerCommand::List => "list",
            ManagerCommand::ServerInfo => "serverinfo",
            ManagerCommand::Sessions { .. } => "sessions",
            ManagerCommand::Resources { .. } => "resources",
        }
    }

    /// Query parameters in wire order
    fn params(&self) -> Vec<(&'static str, &str)> {
        match self {
            ManagerCommand::Deploy {
                path,
                config,
                war,
                update,
                tag,
            } => {
                let mut params = vec![("path", path.as_str())];
                if let Some(config) = config {
                    params.push(("config", config.as_str()));
                }
                if let Some(war) = war {
                    params.push(("war", war.as_str()));
                }
                if *update {
                    params.push(("update", "true"));
                }
                if let Some(tag) = tag {
                    params.push(("tag", tag.as_str()));
                }
                params
            }
            ManagerCommand::Undeploy { path }
            | ManagerCommand::Remove { path }
            | ManagerCommand::Reload { path }
            | ManagerCommand::Start { path }
            | ManagerCommand::Stop { path }
            | ManagerCommand::Sessions { path } => vec![("path", path.as_str())],
            ManagerCommand::Resources {
                resource_type: Some(resource_type),
            } => vec![("type", resource_type.as_str())],
            ManagerCommand::List
            | ManagerCommand::ServerInfo
            | ManagerCommand::Resources { resource_type: None } => Vec::new(),
        }
    }

    /// Render the command as a path relative to the manager URL, with
    /// parameter values transcoded to `charset` and form-urlencoded
    pub fn to_path(&self, charset: QueryCharset) -> String {
        let mut path = format!("/{}", self.name());
        for (i, (name, value)) in self.params().into_iter().enumerate() {
            path.push(if i == 0 { '?' } else { '&' });
            path.push_str(name);
            path.push('=');
            path.push_str(&encode_value(value, charset));
        }
        path
    }
}

fn encode_value(value: &str, charset: QueryCharset) -> String {
    byte_serialize(&charset.encode(value)).collect()
}

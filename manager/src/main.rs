//! catmgr - Entry Point
//!
//! Command-line front end for the servlet container's text manager.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{debug, error};
use url::Url;

use catmgr::errors::{FailureKind, ManagerError};
use catmgr::filesys::file::File;
use catmgr::logs::{init_logging, LogLevel, LogOptions};
use catmgr::storage::settings::{default_settings_path, Settings};
use catmgr::utils::{default_user_agent, version_info};
use catmgr::{Archive, DeployRequest, Manager};

const EXIT_GENERIC_FAILURE: u8 = 1;
const EXIT_PROTOCOL_FAILURE: u8 = 2;
const EXIT_AUTH_FAILURE: u8 = 3;
const EXIT_TRANSPORT_FAILURE: u8 = 4;
const EXIT_CONFIG_FAILURE: u8 = 5;

#[derive(Parser, Debug)]
#[command(name = "catmgr")]
#[command(about = "Deploy and manage webapps through the text-based manager", long_about = None)]
struct Args {
    /// Settings file (defaults to ~/.catmgr/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Manager URL, e.g. http://localhost:8080/manager/text
    #[arg(long, env = "CATMGR_URL")]
    url: Option<String>,

    #[arg(long, env = "CATMGR_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "CATMGR_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Send no Authorization header
    #[arg(long, default_value_t = false)]
    no_auth: bool,

    /// Charset for query-string values
    #[arg(long)]
    charset: Option<String>,

    #[arg(long)]
    user_agent: Option<String>,

    /// Connect and read timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(ClapArgs, Debug)]
struct ArchiveArgs {
    /// URL (or local path) of an archive the server reads itself
    #[arg(long, conflicts_with = "file")]
    war: Option<String>,

    /// Local archive uploaded in the request body
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct DeployOptions {
    /// Replace an existing webapp at the same path
    #[arg(long, default_value_t = false)]
    update: bool,

    #[arg(long)]
    tag: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deploy an archive
    Deploy {
        /// Context path
        path: String,
        #[command(flatten)]
        archive: ArchiveArgs,
        #[command(flatten)]
        options: DeployOptions,
    },

    /// Deploy a context descriptor, optionally with an archive
    DeployContext {
        /// Context path
        path: String,
        /// URL (or local path) of the context descriptor
        #[arg(long)]
        descriptor: String,
        #[command(flatten)]
        archive: ArchiveArgs,
        #[command(flatten)]
        options: DeployOptions,
    },

    Undeploy { path: String },
    Remove { path: String },
    Reload { path: String },
    Start { path: String },
    Stop { path: String },

    /// List deployed webapps
    List {
        /// Print typed records as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the status of one webapp
    Status { path: String },

    /// Show server and JVM information
    ServerInfo,

    /// Show session statistics of one webapp
    Sessions { path: String },

    /// List global JNDI resources
    Resources {
        /// Restrict to a Java type, e.g. javax.sql.DataSource
        #[arg(long = "type")]
        resource_type: Option<String>,
    },

    /// Print version information
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(args: Args) -> Result<()> {
    if matches!(args.cmd, Command::Version) {
        println!("{}", serde_json::to_string_pretty(&version_info())?);
        return Ok(());
    }

    let settings_file = File::new(args.config.clone().unwrap_or_else(default_settings_path));
    let settings = load_settings(&settings_file, &args).await?;

    let log_options = LogOptions {
        log_level: settings.log_level,
        json_format: args.json_logs,
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }
    debug!("Using settings {:?}", settings);

    let manager = Manager::new(settings.manager.endpoint()?)?;

    match args.cmd {
        Command::Deploy {
            path,
            archive,
            options,
        } => {
            let archive = archive_source(&archive)
                .await?
                .context("deploy needs --war or --file")?;
            let mut request = DeployRequest::new(path)
                .with_archive(archive)
                .with_update(options.update);
            if let Some(tag) = options.tag {
                request = request.with_tag(tag);
            }
            print_message(manager.deploy_request(request).await?.message());
        }
        Command::DeployContext {
            path,
            descriptor,
            archive,
            options,
        } => {
            let mut request = DeployRequest::new(path)
                .with_descriptor(to_url(&descriptor)?)
                .with_update(options.update);
            if let Some(archive) = archive_source(&archive).await? {
                request = request.with_archive(archive);
            }
            if let Some(tag) = options.tag {
                request = request.with_tag(tag);
            }
            print_message(manager.deploy_request(request).await?.message());
        }
        Command::Undeploy { path } => print_message(manager.undeploy(&path).await?.message()),
        Command::Remove { path } => print_message(manager.remove(&path).await?.message()),
        Command::Reload { path } => print_message(manager.reload(&path).await?.message()),
        Command::Start { path } => print_message(manager.start(&path).await?.message()),
        Command::Stop { path } => print_message(manager.stop(&path).await?.message()),
        Command::List { json: false } => print!("{}", manager.list().await?),
        Command::List { json: true } => {
            println!("{}", serde_json::to_string_pretty(&manager.applications().await?)?)
        }
        Command::Status { path } => {
            let record = manager.status(&path).await?;
            println!("{}\t{}", record.path, record.status);
        }
        Command::ServerInfo => print!("{}", manager.server_info().await?),
        Command::Sessions { path } => print!("{}", manager.sessions(&path).await?),
        Command::Resources { resource_type } => {
            print!("{}", manager.resources(resource_type.as_deref()).await?)
        }
        Command::Version => {}
    }

    Ok(())
}

/// Load the settings file and apply command-line overrides on top
async fn load_settings(file: &File, args: &Args) -> Result<Settings> {
    let mut settings = if args.config.is_some() {
        Settings::load(file).await
    } else {
        Settings::load_or_default(file).await
    }
    .with_context(|| format!("Unable to read settings file {}", file.path().display()))?;

    let manager = &mut settings.manager;
    if let Some(url) = &args.url {
        manager.url = url.clone();
    }
    if let Some(username) = &args.username {
        manager.username = Some(username.clone());
    }
    if let Some(password) = &args.password {
        manager.password = Some(password.clone());
    }
    if args.no_auth {
        manager.username = None;
        manager.password = None;
    }
    if let Some(charset) = &args.charset {
        manager.charset = charset.clone();
    }
    if let Some(user_agent) = &args.user_agent {
        manager.user_agent = Some(user_agent.clone());
    }
    if manager.user_agent.is_none() {
        manager.user_agent = Some(default_user_agent());
    }
    if let Some(timeout) = args.timeout_secs {
        manager.timeout_secs = Some(timeout);
    }
    if let Some(level) = args.log_level {
        settings.log_level = level;
    }

    Ok(settings)
}

async fn archive_source(args: &ArchiveArgs) -> Result<Option<Archive>> {
    if let Some(war) = &args.war {
        return Ok(Some(Archive::Url(to_url(war)?)));
    }
    if let Some(path) = &args.file {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Unable to open archive {}", path.display()))?;
        return Ok(Some(Archive::stream(file)));
    }
    Ok(None)
}

/// Schemes the manager resolves on its own
const ARCHIVE_SCHEMES: &[&str] = &["http", "https", "file", "jar"];

/// Accept either a URL or a local path, which becomes a `file:` URL
fn to_url(value: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(value) {
        if ARCHIVE_SCHEMES.contains(&url.scheme()) {
            return Ok(url);
        }
    }
    let path = std::path::absolute(Path::new(value))
        .with_context(|| format!("Invalid path {}", value))?;
    Url::from_file_path(&path).map_err(|_| anyhow::anyhow!("Cannot convert {} to a URL", path.display()))
}

fn print_message(message: &str) {
    println!("{}", message);
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ManagerError>().map(ManagerError::kind) {
        Some(FailureKind::Protocol) => EXIT_PROTOCOL_FAILURE,
        Some(FailureKind::Authentication | FailureKind::Authorization) => EXIT_AUTH_FAILURE,
        Some(FailureKind::Transport) => EXIT_TRANSPORT_FAILURE,
        Some(FailureKind::Configuration) => EXIT_CONFIG_FAILURE,
        None => EXIT_GENERIC_FAILURE,
    }
}

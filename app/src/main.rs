//! Terminal host for the blog pages.
//!
//! Reads `BLOG_API_BASE_URL` / `BLOG_FIELD_SET` (a `.env` file is honoured),
//! executes the core's requests with ureq and prints each page.

use std::process::ExitCode;

use blog_core::{ApiConfig, BlogClient, FieldSet, PostId};
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod transport;

use commands::{Host, PostFields};
use transport::Transport;

#[derive(Parser, Debug)]
#[command(version, about = "Create, list, edit and delete blog posts", long_about = None)]
struct Cli {
    /// API base URL; overrides BLOG_API_BASE_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Post fields to expose; overrides BLOG_FIELD_SET
    #[arg(long, value_enum)]
    fields: Option<FieldsArg>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldsArg {
    /// Title, author, category, cover image and card color
    Minimal,
    /// Minimal plus second and third categories
    Extended,
}

impl From<FieldsArg> for FieldSet {
    fn from(arg: FieldsArg) -> Self {
        match arg {
            FieldsArg::Minimal => FieldSet::Minimal,
            FieldsArg::Extended => FieldSet::Extended,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Landing page and navigation
    Home,
    /// All posts
    List,
    /// One post
    Show { id: PostId },
    /// Publish a new post
    Create(PostFields),
    /// Edit an existing post
    Edit {
        id: PostId,
        #[command(flatten)]
        fields: PostFields,
    },
    /// Delete a post after confirmation
    Delete {
        id: PostId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a route path such as /all-blogs or /blogs/3
    Open { path: String },
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,blog=info,blog_core=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let mut config = ApiConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = Some(url);
    }
    if let Some(fields) = cli.fields {
        config.field_set = fields.into();
    }
    if config.base_url.is_none() {
        tracing::warn!("no API base URL configured");
    }

    let host = Host {
        client: BlogClient::from_config(&config),
        fields: config.field_set,
        transport: Transport::new(),
    };

    let result = match &cli.command {
        Command::Home => host.home(),
        Command::List => host.list(),
        Command::Show { id } => host.show(*id),
        Command::Create(fields) => host.create(fields),
        Command::Edit { id, fields } => host.edit(*id, fields),
        Command::Delete { id, yes } => host.delete(*id, *yes),
        Command::Open { path } => host.open(path),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

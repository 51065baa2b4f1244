//! CLI entry and dispatch.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use postdesk_core::config;
use postdesk_core::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "postdesk")]
#[command(version)]
#[command(about = "Terminal admin for a blog API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out and clear the saved session
    Logout,

    /// Show who is logged in
    Whoami {
        /// Also show the masked session token
        #[arg(short, long)]
        verbose: bool,
    },

    /// Manage posts
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum PostCommands {
    /// Lists all posts in server order
    List,
    /// Shows a single post with its comments
    Show {
        /// The ID of the post to show
        #[arg(value_name = "POST_ID")]
        id: String,
    },
    /// Publishes (or unpublishes) a post
    Publish {
        /// The ID of the post
        #[arg(value_name = "POST_ID")]
        id: String,
        /// Unpublish instead
        #[arg(long)]
        unpublish: bool,
    },
    /// Deletes a post
    Delete {
        /// The ID of the post to delete
        #[arg(value_name = "POST_ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Creates a new post
    New {
        /// Post title (5 to 60 characters)
        #[arg(short, long)]
        title: String,

        /// Post content (at least 10 characters)
        #[arg(short, long, required_unless_present = "content_file")]
        content: Option<String>,

        /// Read the content from a file
        #[arg(long, value_name = "PATH", conflicts_with = "content")]
        content_file: Option<PathBuf>,

        /// Image URL shown with the post
        #[arg(long, value_name = "URL", default_value = "")]
        image_url: String,

        /// Publish immediately
        #[arg(long)]
        publish: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load().context("load config")?;

    let target = if cli.command.is_none() {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    let _log_guard = logging::init(&config.log, target).context("init logging")?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    let Some(command) = cli.command else {
        let _enter = rt.enter();
        return commands::tui::run(&config);
    };

    rt.block_on(async move { dispatch(command, &config).await })
}

async fn dispatch(command: Commands, config: &config::Config) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            commands::auth::login(config, &email, password).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Whoami { verbose } => commands::auth::whoami(verbose),

        Commands::Posts { command } => match command {
            PostCommands::List => commands::posts::list(config).await,
            PostCommands::Show { id } => commands::posts::show(config, &id).await,
            PostCommands::Publish { id, unpublish } => {
                commands::posts::publish(config, &id, !unpublish).await
            }
            PostCommands::Delete { id, yes } => commands::posts::delete(config, &id, yes).await,
            PostCommands::New {
                title,
                content,
                content_file,
                image_url,
                publish,
            } => {
                let content = match (content, content_file) {
                    (Some(content), _) => content,
                    (None, Some(path)) => fs::read_to_string(&path)
                        .with_context(|| format!("read content from {}", path.display()))?,
                    (None, None) => anyhow::bail!("Either --content or --content-file is required"),
                };
                commands::posts::create(
                    config,
                    commands::posts::NewPost {
                        title,
                        content,
                        image_url,
                        publish,
                    },
                )
                .await
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

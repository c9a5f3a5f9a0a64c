//! comment-mod - moderation console for the comment store
//!
//! ```bash
//! comment-mod init
//! comment-mod user add mod --display-name Moderator
//! comment-mod list --status pending
//! comment-mod status 42 approved
//! comment-mod --user mod reply --post 3 --parent 42 "Thanks, fixed."
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use comment_moderation::application::commands::{list_comments, reply_to_comment, update_comment_status};
use comment_moderation::application::dto::{ActionResponse, CommentViewDto, ReplyCommentDto};
use comment_moderation::application::state::AppState;
use comment_moderation::config::AppConfig;
use comment_moderation::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity,
};
use comment_moderation::domain::CommentStatus;
use comment_moderation::identity::{IdentityProvider, SessionIdentity};
use comment_moderation::repositories::*;
use comment_moderation::services::CommentModerationService;

/// Moderate comments: list by status, change status, reply
#[derive(Debug, Parser)]
#[command(name = "comment-mod")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, overrides the configuration
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Act as this user, overrides the configuration
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or verify the database schema
    Init,

    /// Show all comments grouped by moderation status
    List {
        /// Only show this bucket (approved, pending, spam, trash)
        #[arg(long)]
        status: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Set the moderation status of a comment
    Status {
        comment_id: i64,
        status: String,
    },

    /// Reply to a comment as the current user
    Reply {
        #[arg(long)]
        post: i64,

        #[arg(long)]
        parent: i64,

        body: String,
    },

    /// Manage users
    #[command(subcommand)]
    User(UserCommand),

    /// Manage posts
    #[command(subcommand)]
    Post(PostCommand),

    /// Run an integrity check and print row counts
    Check,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Add a user
    Add {
        user_name: String,

        #[arg(long)]
        display_name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum PostCommand {
    /// Add a post
    Add { title: String },

    /// List posts
    List,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = cli.database {
        config.database.path = Some(path);
    }
    if let Some(user) = cli.user {
        config.identity.user_name = user;
    }
    config.validate()?;

    // 1. INFRASTRUCTURE
    let pool = Arc::new(create_connection_pool(&config.database)?);
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
    }

    // 2. REPOSITORIES
    let comment_repo: Arc<dyn CommentRepository> = Arc::new(SqliteCommentRepository::new());
    let post_repo: Arc<dyn PostRepository> = Arc::new(SqlitePostRepository::new());
    let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new());

    // 3. SERVICES
    let comment_service = Arc::new(CommentModerationService::new(
        pool.clone(),
        comment_repo,
        post_repo.clone(),
    ));
    let identity: Arc<dyn IdentityProvider> = Arc::new(SessionIdentity::new(
        config.identity.user_name.clone(),
        pool.clone(),
        user_repo.clone(),
    ));

    // 4. APPLICATION STATE
    let state = AppState {
        comment_service,
        identity,
    };

    match cli.command {
        Commands::Init => {
            println!("Database ready");
        }
        Commands::List { status, json } => {
            let dashboard = list_comments(&state).await.map_err(anyhow::Error::msg)?;
            let filter = status
                .map(|s| s.parse::<CommentStatus>())
                .transpose()?;

            match (filter, json) {
                (None, true) => println!("{}", serde_json::to_string_pretty(&dashboard)?),
                (Some(status), true) => {
                    let bucket: Vec<&CommentViewDto> = dashboard
                        .all_comments
                        .iter()
                        .filter(|c| c.status == status.as_str())
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&bucket)?);
                }
                (filter, false) => {
                    println!(
                        "{} comments: {} approved, {} pending, {} spam, {} trash",
                        dashboard.number_of_comments,
                        dashboard.number_of_approved_comments,
                        dashboard.number_of_pending_comments,
                        dashboard.number_of_spam_comments,
                        dashboard.number_of_deleted_comments,
                    );
                    for comment in dashboard
                        .all_comments
                        .iter()
                        .filter(|c| filter.map_or(true, |s| c.status == s.as_str()))
                    {
                        print_comment(comment);
                    }
                }
            }
        }
        Commands::Status { comment_id, status } => {
            let response = update_comment_status(&state, comment_id, &status).await;
            report(&response)?;
            println!("Comment {} is now {}", comment_id, status.to_lowercase());
        }
        Commands::Reply { post, parent, body } => {
            let response = reply_to_comment(
                &state,
                ReplyCommentDto {
                    post_id: post,
                    parent_id: parent,
                    comment_body: body,
                },
            )
            .await;
            report(&response)?;
            if let Some(id) = response.comment_id {
                println!(
                    "Reply {} submitted by {} (pending)",
                    id,
                    state.identity.current_identity()
                );
            }
        }
        Commands::User(UserCommand::Add {
            user_name,
            display_name,
            email,
        }) => {
            let conn = get_connection(&pool)?;
            let new_user = NewUser {
                display_name: display_name.unwrap_or_else(|| user_name.clone()),
                user_name,
                email,
            };
            let user = user_repo.insert(&conn, &new_user)?;
            println!("User {} added ({})", user.id, user.user_name);
        }
        Commands::Post(PostCommand::Add { title }) => {
            let conn = get_connection(&pool)?;
            let post = post_repo.insert(&conn, &title)?;
            println!("Post {} added", post.id);
        }
        Commands::Post(PostCommand::List) => {
            let conn = get_connection(&pool)?;
            for post in post_repo.list_all(&conn)? {
                println!("{:>6}  {}", post.id, post.title);
            }
        }
        Commands::Check => {
            let conn = get_connection(&pool)?;
            verify_database_integrity(&conn)?;
            let stats = get_database_stats(&conn)?;
            println!("Integrity: ok");
            println!("Schema version: {}", stats.schema_version);
            println!("Size: {} bytes ({} pages)", stats.size_bytes, stats.page_count);
            println!(
                "Rows: {} users, {} posts, {} comments",
                stats.user_count, stats.post_count, stats.comment_count
            );
        }
    }

    Ok(())
}

fn print_comment(comment: &CommentViewDto) {
    let parent = comment
        .parent_id
        .map(|p| format!(" -> {}", p))
        .unwrap_or_default();
    println!(
        "{:>6}{}  [{}]  {} on \"{}\": {}",
        comment.comment_id,
        parent,
        comment.status,
        comment.author_display_name,
        comment.post_title,
        comment.content
    );
}

fn report(response: &ActionResponse) -> anyhow::Result<()> {
    if response.success {
        return Ok(());
    }
    match &response.error {
        Some(error) => match &error.details {
            Some(details) => bail!("{} ({})", error.message, details),
            None => bail!("{}", error.message),
        },
        None => bail!("operation failed"),
    }
}

fn setup_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();
}

use anyhow::Result;
use chrono::NaiveDate;
use cinedex_application::status_code;
use cinedex_core::CinedexError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "cinedex")]
#[command(about = "Cinedex CLI - movie catalog accounts and favorites", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding users and the catalog (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage a user's favorite movies
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Browse the movie catalog
    Movie {
        #[command(subcommand)]
        action: MovieAction,
    },
    /// Look up genres
    Genre {
        #[command(subcommand)]
        action: GenreAction,
    },
    /// Look up directors
    Director {
        #[command(subcommand)]
        action: DirectorAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account. The password is read from CINEDEX_PASSWORD or stdin.
    Register {
        username: String,
        #[arg(long)]
        email: String,
        /// YYYY-MM-DD
        #[arg(long)]
        birthday: Option<NaiveDate>,
    },
    /// Check a username and password. The password is read from
    /// CINEDEX_PASSWORD or stdin.
    Login { username: String },
    /// Show one account
    Show { username: String },
    /// List all accounts
    List,
    /// Update fields of an account; omitted fields are kept
    Update {
        username: String,
        /// Must equal USERNAME when given
        #[arg(long = "set-username")]
        new_username: Option<String>,
        /// Change the password, reading the new one from CINEDEX_PASSWORD or stdin
        #[arg(long)]
        password: bool,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        birthday: Option<NaiveDate>,
        /// Replaces the whole favorites list (repeatable)
        #[arg(long = "favorite")]
        favorites: Vec<String>,
    },
    /// Delete an account
    Delete { username: String },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Add a movie by id, or by title with --title
    Add {
        username: String,
        movie: String,
        #[arg(long)]
        title: bool,
    },
    /// Remove a movie by id, or by title with --title
    Remove {
        username: String,
        movie: String,
        #[arg(long)]
        title: bool,
    },
    /// List the favorite movies of a user
    List { username: String },
}

#[derive(Subcommand)]
enum MovieAction {
    /// List every movie
    List,
    /// Show the first movie whose title starts with TITLE
    Show { title: String },
}

#[derive(Subcommand)]
enum GenreAction {
    /// List every genre
    List,
    /// Show the first genre whose name starts with NAME
    Show { name: String },
}

#[derive(Subcommand)]
enum DirectorAction {
    /// Show the first director whose name contains NAME
    Show { name: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        match err.downcast_ref::<CinedexError>() {
            Some(domain) => eprintln!("Error [{}]: {}", status_code(domain), domain),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = commands::context::load_config(cli.config)?;
    commands::context::init_logging(&config.logging.level);
    let ctx = commands::context::AppContext::build(&config, cli.data_dir.as_deref())?;

    match cli.command {
        Commands::User { action } => match action {
            UserAction::Register {
                username,
                email,
                birthday,
            } => {
                let password = commands::password::read_password()?;
                commands::user::register(&ctx, username, password, email, birthday).await?
            }
            UserAction::Login { username } => {
                let password = commands::password::read_password()?;
                commands::user::login(&ctx, &username, &password).await?
            }
            UserAction::Show { username } => commands::user::show(&ctx, &username).await?,
            UserAction::List => commands::user::list(&ctx).await?,
            UserAction::Update {
                username,
                new_username,
                password,
                email,
                birthday,
                favorites,
            } => {
                let password = if password {
                    Some(commands::password::read_password()?)
                } else {
                    None
                };
                let update = commands::user::profile_update(
                    new_username,
                    password,
                    email,
                    birthday,
                    favorites,
                );
                commands::user::update(&ctx, &username, update).await?
            }
            UserAction::Delete { username } => commands::user::delete(&ctx, &username).await?,
        },
        Commands::Favorite { action } => match action {
            FavoriteAction::Add {
                username,
                movie,
                title,
            } => commands::favorite::add(&ctx, &username, &movie, title).await?,
            FavoriteAction::Remove {
                username,
                movie,
                title,
            } => commands::favorite::remove(&ctx, &username, &movie, title).await?,
            FavoriteAction::List { username } => {
                commands::favorite::list(&ctx, &username).await?
            }
        },
        Commands::Movie { action } => match action {
            MovieAction::List => commands::catalog::list_movies(&ctx).await?,
            MovieAction::Show { title } => commands::catalog::show_movie(&ctx, &title).await?,
        },
        Commands::Genre { action } => match action {
            GenreAction::List => commands::catalog::list_genres(&ctx).await?,
            GenreAction::Show { name } => commands::catalog::show_genre(&ctx, &name).await?,
        },
        Commands::Director { action } => match action {
            DirectorAction::Show { name } => commands::catalog::show_director(&ctx, &name).await?,
        },
    }

    Ok(())
}

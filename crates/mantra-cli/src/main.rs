mod posts;
mod shows;

use clap::{Parser, Subcommand};
use mantra_core::browse::{GenreFilter, ViewMode};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mantra-cli")]
#[command(about = "Find live shows near you and browse published posts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse upcoming shows near a zip code, or search by artist
    Shows(ShowsArgs),
    /// Query published posts
    Posts {
        #[command(subcommand)]
        command: PostsCommands,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowsArgs {
    /// 5-digit US zip code; defaults to the last one used
    #[arg(long)]
    pub zip: Option<String>,
    /// Search radius in miles; defaults to the last one used
    #[arg(long)]
    pub radius: Option<u32>,
    /// 0-indexed result page
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    /// date, date-desc, name, distance or relevance
    #[arg(long)]
    pub sort: Option<String>,
    /// Artist or event keyword
    #[arg(long, short = 'q')]
    pub query: Option<String>,
    /// Genre filter applied to the fetched page
    #[arg(long, default_value = "all")]
    pub genre: GenreFilter,
    /// list or calendar
    #[arg(long, default_value = "list")]
    pub view: ViewMode,
}

#[derive(Debug, Subcommand)]
enum PostsCommands {
    /// Most recent posts
    Latest {
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// One post by slug
    Get { slug: String },
    /// Case-insensitive search over titles, tags and excerpts
    Search { query: String },
    /// Posts in a category (name or slug)
    Category { slug: String },
    /// Posts carrying a tag slug
    Tag { slug: String },
    /// Posts related to the given post
    Related {
        slug: String,
        #[arg(long, default_value_t = 4)]
        count: usize,
    },
    /// Recent, well-tagged posts
    Trending {
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Tags in use, most popular first
    Tags {
        #[arg(long, default_value_t = 30)]
        count: usize,
    },
    /// Categories in use
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mantra_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Shows(args)) => shows::run_shows(&config, &args).await?,
        Some(Commands::Posts { command }) => posts::run_posts(&config, command)?,
        None => println!("mantra-cli ready; try `mantra-cli shows --zip 94102`"),
    }

    Ok(())
}

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tunescout::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP backend
    Serve,

    /// Import a Spotify playlist
    Import(ImportOptions),

    /// Generate recommendations from the imported playlist
    Recommend(RecommendOptions),

    /// Show discovery statistics for the stored lists
    Stats,

    /// Search Spotify for tracks
    Search(SearchOptions),

    /// Show or replace the built playlist
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// Spotify playlist URL
    pub playlist_url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Only recommend songs with this mood (happy, sad, energetic, chill)
    #[clap(long)]
    pub mood: Option<String>,

    /// Number of recommendations to request
    #[clap(long)]
    pub count: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Free text query, e.g. "song title artist"
    pub query: String,
}

#[derive(Parser, Debug, Clone)]
#[command(args_conflicts_with_subcommands = true)]
pub struct PlaylistOptions {
    /// Subcommands under `playlist` (e.g., `set`)
    #[command(subcommand)]
    pub command: Option<PlaylistSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    /// Replace the playlist with the given recommendation ids
    Set(PlaylistSetOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistSetOpts {
    /// Recommendation ids, in playlist order
    pub song_ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            if let Err(e) = cli::serve().await {
                error!("Server stopped: {}", e);
            }
        }
        Command::Import(opt) => cli::import(opt.playlist_url).await,
        Command::Recommend(opt) => cli::recommend(opt.mood, opt.count).await,
        Command::Stats => cli::stats().await,
        Command::Search(opt) => cli::search(opt.query).await,
        Command::Playlist(opt) => match opt.command {
            Some(PlaylistSubcommand::Set(s)) => cli::set_playlist(s.song_ids).await,
            None => cli::list_playlist().await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

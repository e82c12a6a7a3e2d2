use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use artistmix::{cli, config, types::PkceToken, warning};
use tokio::sync::Mutex;

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Remove the cached Spotify token
    Logout,

    /// Show the signed-in Spotify user
    Profile,

    /// Search artists by name
    Search(SearchOptions),

    /// Show your long-term top artists as suggestions
    TopArtists,

    /// Manage the artists used for generation
    Select(SelectOptions),

    /// List playlists you own or collaborate on
    Playlists,

    /// Generate a playlist from the selected artists
    Generate(GenerateArgs),

    /// Run the local HTTP server
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Artist name to look for
    query: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SelectOptions {
    #[command(subcommand)]
    command: SelectSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SelectSubcommand {
    /// Add artists by id, or the best match of a search
    Add(SelectAddOpts),
    /// Remove artists by id
    Remove(SelectRemoveOpts),
    /// Remove all artists
    Clear,
    /// Show the selected artists
    List,
}

#[derive(Parser, Debug, Clone)]
pub struct SelectAddOpts {
    /// Spotify artist ids
    #[clap(required_unless_present = "search")]
    artist_ids: Vec<String>,

    /// Add the first artist matching this name
    #[clap(long)]
    search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SelectRemoveOpts {
    /// Spotify artist ids
    #[clap(required = true)]
    artist_ids: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Use these artist ids instead of the saved selection; can be repeated
    #[clap(long = "artist")]
    artist_ids: Vec<String>,

    /// Number of songs (defaults to 25 unless --minutes is given)
    #[clap(long, conflicts_with = "minutes")]
    count: Option<u32>,

    /// Minimum total duration in minutes
    #[clap(long)]
    minutes: Option<u32>,

    /// Shuffle each artist's tracks instead of taking the most popular first
    #[clap(long)]
    random: bool,

    /// Draw from the artists' albums instead of their top tracks
    #[clap(long)]
    from_albums: bool,

    /// Title of the new playlist
    #[clap(long, conflicts_with = "playlist_id")]
    name: Option<String>,

    /// Add to this existing playlist instead of creating one
    #[clap(long)]
    playlist_id: Option<String>,

    /// Remove the existing playlist's tracks first
    #[clap(long, requires = "playlist_id")]
    clear_existing: bool,

    /// Only print the track list
    #[clap(long)]
    dry_run: bool,
}

impl From<GenerateArgs> for cli::GenerateOptions {
    fn from(args: GenerateArgs) -> Self {
        cli::GenerateOptions {
            artist_ids: args.artist_ids,
            count: args.count,
            minutes: args.minutes,
            random: args.random,
            from_albums: args.from_albums,
            name: args.name,
            playlist_id: args.playlist_id,
            clear_existing: args.clear_existing,
            dry_run: args.dry_run,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file, using the process environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let oauth_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));

    match cli.command {
        Command::Auth => cli::auth(Arc::clone(&oauth_state)).await,
        Command::Logout => cli::logout().await,
        Command::Profile => cli::profile().await,
        Command::Search(opt) => cli::search(opt.query).await,
        Command::TopArtists => cli::top_artists().await,
        Command::Select(opt) => match opt.command {
            SelectSubcommand::Add(a) => cli::select_add(a.artist_ids, a.search).await,
            SelectSubcommand::Remove(r) => cli::select_remove(r.artist_ids).await,
            SelectSubcommand::Clear => cli::select_clear().await,
            SelectSubcommand::List => cli::select_list().await,
        },
        Command::Playlists => cli::list_playlists().await,
        Command::Generate(args) => cli::generate(args.into()).await,
        Command::Serve => cli::serve(Arc::clone(&oauth_state)).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

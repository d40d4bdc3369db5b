//! Clap derive structures for the `encore` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use encore_core::{PageQuery, SortOrder};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// encore -- browse a music catalog from the command line
#[derive(Debug, Parser)]
#[command(
    name = "encore",
    version,
    about = "Browse artists, albums and tracks of a music catalog service",
    long_about = "A CLI for the music catalog REST API.\n\n\
        Fetches artists, albums and tracks by identifier, lists paged\n\
        collections, and can follow a stream of identifiers with `watch`.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Catalog profile to use
    #[arg(long, short = 'p', env = "ENCORE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Catalog service URL (overrides profile)
    #[arg(long, short = 'S', env = "ENCORE_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ENCORE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ENCORE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ENCORE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up artists
    #[command(alias = "ar")]
    Artist(ArtistArgs),

    /// Look up albums and their tracks
    #[command(alias = "al")]
    Album(AlbumArgs),

    /// Follow identifiers read from stdin and print the bound view
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared paging and ordering arguments for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u64>,

    /// Results per page
    #[arg(long, short = 'l')]
    pub per_page: Option<u64>,

    /// Sort direction
    #[arg(long, value_parser = parse_sort_order)]
    pub order: Option<SortOrder>,

    /// Field to sort by (repeatable)
    #[arg(long = "sort", value_name = "FIELD")]
    pub sort_fields: Vec<String>,
}

impl ListArgs {
    pub fn to_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            per_page: self.per_page,
            order: self.order,
            sort_fields: self.sort_fields.clone(),
        }
    }
}

fn parse_sort_order(s: &str) -> Result<SortOrder, String> {
    s.parse()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ARTISTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ArtistArgs {
    #[command(subcommand)]
    pub command: ArtistCommand,
}

#[derive(Debug, Subcommand)]
pub enum ArtistCommand {
    /// Fetch one artist by identifier
    Get {
        /// Artist identifier
        id: String,
    },

    /// Print the resource URL of an artist without fetching it
    Url {
        /// Artist identifier
        id: String,
    },

    /// List artists page by page
    #[command(alias = "ls")]
    List(ListArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALBUMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlbumArgs {
    #[command(subcommand)]
    pub command: AlbumCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlbumCommand {
    /// Fetch one album by identifier or slug
    Get {
        /// Album identifier
        #[arg(required_unless_present = "slug", conflicts_with = "slug")]
        id: Option<String>,

        /// Look the album up by its URL slug instead
        #[arg(long)]
        slug: Option<String>,
    },

    /// Print the resource URL of an album without fetching it
    Url {
        /// Album identifier
        id: String,
    },

    /// List albums page by page
    #[command(alias = "ls")]
    List(ListArgs),

    /// List the tracks of an album
    Tracks {
        /// Album identifier
        album_id: String,
    },

    /// Fetch one track of an album
    Track {
        /// Album identifier
        album_id: String,

        /// Track identifier
        track_id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Route parameter name (defaults to the resource's own key)
    #[arg(long, global = true)]
    pub key: Option<String>,

    #[command(subcommand)]
    pub target: WatchTarget,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum WatchTarget {
    /// Bind an artist view (`artistId`)
    Artist,

    /// Bind an album view (`albumId`)
    Album,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with a profile
    Init {
        /// Catalog service URL
        #[arg(value_name = "SERVER_URL")]
        url: String,

        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Path prefix of the REST resources
        #[arg(long)]
        api_prefix: Option<String>,

        /// Replace an existing profile of the same name
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

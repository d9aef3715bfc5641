//! CLI command definitions.

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Scrollback - fetch message history from Discord channels, threads and guilds
#[derive(Parser, Debug)]
#[command(name = "scrollback")]
#[command(about = "Fetch message history from Discord channels, threads and guilds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file, used instead of the default search path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one or more channels, in the order given
    Channel {
        /// Channel IDs
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Also fetch each channel's active threads
        #[arg(long)]
        threads: bool,
    },

    /// Fetch every text channel of a guild
    Guild {
        /// Guild ID
        id: u64,

        /// Also fetch active threads
        #[arg(long)]
        threads: bool,
    },

    /// Fetch several guilds, or every guild the bot is in
    Guilds {
        /// Guild IDs (all known guilds when omitted)
        ids: Vec<u64>,

        /// Also fetch active threads
        #[arg(long)]
        threads: bool,
    },

    /// Fetch threads of a guild, of a channel, or by ID
    #[command(group(
        ArgGroup::new("scope")
            .required(true)
            .args(["guild", "channel", "ids"]),
    ))]
    Threads {
        /// Every active thread in this guild
        #[arg(long)]
        guild: Option<u64>,

        /// Every active thread under this channel
        #[arg(long)]
        channel: Option<u64>,

        /// Specific thread IDs
        #[arg(long, num_args = 1.., requires = "parent")]
        ids: Vec<u64>,

        /// Parent channel of the threads given with --ids
        #[arg(long, requires = "ids")]
        parent: Option<u64>,
    },

    /// Fetch a single thread
    Thread {
        /// Thread ID
        id: u64,

        /// Parent channel ID
        #[arg(long)]
        parent: u64,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Message counts per channel
    Human,
    /// One JSON message per line
    Json,
    /// Message contents grouped per channel, as JSON
    Grouped,
}

impl OutputFormat {
    /// Whether the output is meant to be parsed by another program.
    pub fn is_machine_readable(self) -> bool {
        !matches!(self, Self::Human)
    }
}

//! Fetch command handler.

use super::{Commands, OutputFormat};
use scrollback::{
    ChannelId, ChannelMessages, ChannelRef, Fetcher, FetcherConfig, GuildId, GuildRef,
    GuildSelection, ResultSet, SerenityMessageSource, ThreadRef,
    ThreadSelection, TracingObserver, report::{self, ReportTarget},
};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, instrument};

/// What a command produced, before rendering.
enum Fetched {
    Messages(ResultSet),
    Grouped(Vec<ChannelMessages>),
}

/// Run one fetch command against Discord and write the result to `target`.
///
/// `--threads` on the command line forces thread fetching on; otherwise
/// the configured default applies.
#[instrument(skip_all, fields(format = ?format))]
pub async fn run_command(
    command: Commands,
    token: &str,
    config: FetcherConfig,
    format: OutputFormat,
    target: ReportTarget,
) -> Result<(), Box<dyn std::error::Error>> {
    let observer = Arc::new(TracingObserver::new());
    let fetcher = Fetcher::new(SerenityMessageSource::new(token))
        .with_config(config)
        .with_shared_observer(observer.clone());
    let with_threads = |flag: bool| flag || *config.include_threads();
    let grouped = format == OutputFormat::Grouped;

    let fetched = match command {
        Commands::Channel { ids, threads } => Fetched::Messages(
            fetcher
                .fetch_channels(ids.into_iter().map(ChannelId), with_threads(threads))
                .await?,
        ),
        Commands::Guild { id, threads } if grouped && !with_threads(threads) => {
            Fetched::Grouped(fetcher.fetch_guild_grouped(GuildId(id)).await?)
        }
        Commands::Guild { id, threads } => Fetched::Messages(
            fetcher
                .fetch_guild(GuildId(id), with_threads(threads))
                .await?,
        ),
        Commands::Guilds { ids, threads } => {
            let selection = if ids.is_empty() {
                GuildSelection::Known
            } else {
                GuildSelection::Only(ids.into_iter().map(|id| GuildRef::Id(GuildId(id))).collect())
            };
            Fetched::Messages(
                fetcher
                    .fetch_guilds(selection, with_threads(threads))
                    .await?,
            )
        }
        Commands::Threads {
            guild,
            channel,
            ids,
            parent,
        } => Fetched::Messages(
            fetcher
                .fetch_threads(thread_selection(guild, channel, ids, parent))
                .await?,
        ),
        Commands::Thread { id, parent } => Fetched::Messages(
            fetcher
                .fetch_thread(ThreadRef::by_id(ChannelId(id), ChannelId(parent)))
                .await?,
        ),
    };

    info!(
        pages = observer.pages(),
        messages = observer.messages(),
        skipped = observer.skipped(),
        "Fetch complete"
    );

    let mut out = target.open()?;
    match (fetched, format) {
        (Fetched::Grouped(groups), _) => report::write_grouped(&mut out, &groups)?,
        (Fetched::Messages(messages), OutputFormat::Grouped) => {
            report::write_grouped(&mut out, &messages.group_by_channel())?
        }
        (Fetched::Messages(messages), OutputFormat::Json) => {
            report::write_json_lines(&mut out, &messages)?
        }
        (Fetched::Messages(messages), OutputFormat::Human) => {
            report::write_summary(&mut out, &messages)?
        }
    }
    out.flush()?;

    Ok(())
}

/// Build the thread selection from the mutually exclusive scope flags.
fn thread_selection(
    guild: Option<u64>,
    channel: Option<u64>,
    ids: Vec<u64>,
    parent: Option<u64>,
) -> ThreadSelection {
    match (guild, channel) {
        (Some(guild), _) => ThreadSelection::Guild(GuildRef::Id(GuildId(guild))),
        (None, Some(channel)) => ThreadSelection::Channel(ChannelRef::Id(ChannelId(channel))),
        (None, None) => ThreadSelection::Threads(
            ids.into_iter()
                .map(|id| ThreadRef::Id {
                    thread: ChannelId(id),
                    parent: parent.map(|p| ChannelRef::Id(ChannelId(p))),
                })
                .collect(),
        ),
    }
}

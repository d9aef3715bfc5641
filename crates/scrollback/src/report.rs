//! Rendering fetch results for the terminal.

use scrollback_core::{ChannelId, ChannelMessages, ResultSet};
use scrollback_error::ConfigError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    /// Standard output
    Stdout,
    /// A file, created or truncated
    File(PathBuf),
}

impl ReportTarget {
    /// Pick the report destination.
    ///
    /// Machine-readable reports are refused on stdout when span export also
    /// writes there, since the two would interleave.
    ///
    /// # Examples
    ///
    /// ```
    /// use scrollback::report::ReportTarget;
    ///
    /// assert!(ReportTarget::select(None, true, true).is_err());
    /// assert_eq!(
    ///     ReportTarget::select(None, false, true).unwrap(),
    ///     ReportTarget::Stdout
    /// );
    /// ```
    #[track_caller]
    pub fn select(
        output: Option<PathBuf>,
        machine_readable: bool,
        spans_on_stdout: bool,
    ) -> Result<Self, ConfigError> {
        match output {
            Some(path) => Ok(Self::File(path)),
            None if machine_readable && spans_on_stdout => Err(ConfigError::new(
                "span export writes to stdout; pass --output to write JSON reports to a file",
            )),
            None => Ok(Self::Stdout),
        }
    }

    /// Open the destination for writing.
    pub fn open(&self) -> io::Result<Box<dyn Write>> {
        Ok(match self {
            Self::Stdout => Box::new(io::stdout().lock()),
            Self::File(path) => Box::new(BufWriter::new(File::create(path)?)),
        })
    }
}

/// One line per channel with its message count, then a total.
pub fn write_summary(out: &mut impl Write, messages: &ResultSet) -> io::Result<()> {
    let mut counts: Vec<(ChannelId, usize)> = Vec::new();
    for message in messages {
        match counts.iter_mut().find(|(id, _)| *id == message.channel_id) {
            Some((_, count)) => *count += 1,
            None => counts.push((message.channel_id, 1)),
        }
    }

    for (channel, count) in &counts {
        writeln!(out, "{channel}\t{count} messages")?;
    }
    writeln!(
        out,
        "{} messages from {} channels",
        messages.len(),
        counts.len()
    )
}

/// Each message as one JSON object per line.
pub fn write_json_lines(out: &mut impl Write, messages: &ResultSet) -> io::Result<()> {
    for message in messages {
        serde_json::to_writer(&mut *out, message)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Per-channel message contents as a pretty JSON array.
pub fn write_grouped(out: &mut impl Write, groups: &[ChannelMessages]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, groups)?;
    writeln!(out)
}

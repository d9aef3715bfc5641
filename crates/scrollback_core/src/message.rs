//! Message records returned by the history endpoint.

use crate::{ChannelId, MessageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat message as retrieved from the platform.
///
/// The fetcher only reads `id` (cursor and deduplication), `channel_id`
/// (grouping) and `content` (grouped text output).
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use scrollback_core::{ChannelId, MessageId, MessageRecord};
///
/// let message = MessageRecord {
///     id: MessageId(1),
///     channel_id: ChannelId(10),
///     author: "ferris".to_string(),
///     content: "hello".to_string(),
///     timestamp: Utc::now(),
/// };
///
/// assert_eq!(message.id.get(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Unique message identifier
    pub id: MessageId,
    /// Channel or thread the message was posted in
    pub channel_id: ChannelId,
    /// Display name of the author
    pub author: String,
    /// Textual content
    pub content: String,
    /// When the message was posted
    pub timestamp: DateTime<Utc>,
}

//! Arrival-ordered, deduplicated message collections.

use crate::{ChannelId, MessageId, MessageRecord};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Messages in the order they arrived, deduplicated by [`MessageId`].
///
/// Pages are appended as they come back from the platform and result sets
/// from several resources are concatenated in iteration order. No
/// chronological reordering is ever applied.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use scrollback_core::{ChannelId, MessageId, MessageRecord, ResultSet};
///
/// let record = |id| MessageRecord {
///     id: MessageId(id),
///     channel_id: ChannelId(1),
///     author: "a".into(),
///     content: format!("#{id}"),
///     timestamp: Utc::now(),
/// };
///
/// let mut set = ResultSet::new();
/// assert!(set.insert(record(3)));
/// assert!(set.insert(record(2)));
/// assert!(!set.insert(record(3)));
/// assert_eq!(set.ids().collect::<Vec<_>>(), vec![MessageId(3), MessageId(2)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    messages: Vec<MessageRecord>,
    index: HashMap<MessageId, usize>,
}

impl ResultSet {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message unless one with the same ID is already present.
    ///
    /// Returns `true` when the message was added.
    pub fn insert(&mut self, record: MessageRecord) -> bool {
        if self.index.contains_key(&record.id) {
            return false;
        }
        self.index.insert(record.id, self.messages.len());
        self.messages.push(record);
        true
    }

    /// Concatenate another result set after this one.
    pub fn merge(&mut self, other: ResultSet) {
        self.extend(other.messages);
    }

    /// Number of distinct messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when no message has been collected.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Look a message up by ID.
    pub fn get(&self, id: MessageId) -> Option<&MessageRecord> {
        self.index.get(&id).map(|&pos| &self.messages[pos])
    }

    /// True when a message with this ID was collected.
    pub fn contains(&self, id: MessageId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterate in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, MessageRecord> {
        self.messages.iter()
    }

    /// Message IDs in arrival order.
    pub fn ids(&self) -> impl Iterator<Item = MessageId> + '_ {
        self.messages.iter().map(|m| m.id)
    }

    /// The most recently appended message.
    pub fn last(&self) -> Option<&MessageRecord> {
        self.messages.last()
    }

    /// Borrow the messages as a slice.
    pub fn as_slice(&self) -> &[MessageRecord] {
        &self.messages
    }

    /// Consume the set, keeping arrival order.
    pub fn into_vec(self) -> Vec<MessageRecord> {
        self.messages
    }

    /// Group message contents per channel, channels in first-seen order.
    pub fn group_by_channel(&self) -> Vec<ChannelMessages> {
        let mut groups: Vec<ChannelMessages> = Vec::new();
        let mut positions: HashMap<ChannelId, usize> = HashMap::new();

        for message in &self.messages {
            let pos = *positions.entry(message.channel_id).or_insert_with(|| {
                groups.push(ChannelMessages {
                    channel_id: message.channel_id,
                    contents: Vec::new(),
                });
                groups.len() - 1
            });
            groups[pos].contents.push(message.content.clone());
        }

        groups
    }
}

impl Extend<MessageRecord> for ResultSet {
    fn extend<I: IntoIterator<Item = MessageRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<MessageRecord> for ResultSet {
    fn from_iter<I: IntoIterator<Item = MessageRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ResultSet {
    type Item = MessageRecord;
    type IntoIter = std::vec::IntoIter<MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a MessageRecord;
    type IntoIter = std::slice::Iter<'a, MessageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.messages)
    }
}

/// Text content of one channel's messages, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessages {
    /// Channel the messages came from
    pub channel_id: ChannelId,
    /// Message contents
    pub contents: Vec<String>,
}

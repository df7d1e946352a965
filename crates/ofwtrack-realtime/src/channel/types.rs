//! Channel type definitions and parsing.

use serde::{Deserialize, Serialize};

use ofwtrack_core::types::UserId;

/// Typed channel identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum ChannelType {
    /// Personal user channel carrying notifications and unread counts.
    User(UserId),
}

impl ChannelType {
    /// Parses a channel string into a typed channel.
    pub fn parse(channel: &str) -> Option<Self> {
        match channel.split_once(':') {
            Some(("user", id)) => id.parse().ok().map(ChannelType::User),
            _ => None,
        }
    }

    /// Converts back to a channel string.
    pub fn to_channel_string(&self) -> String {
        match self {
            ChannelType::User(id) => format!("user:{id}"),
        }
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_channel_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_channel_round_trip() {
        let id = UserId::new();
        let channel = ChannelType::User(id);
        let key = channel.to_channel_string();
        assert_eq!(key, format!("user:{id}"));
        assert_eq!(ChannelType::parse(&key), Some(channel));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(ChannelType::parse("folder:abc"), None);
        assert_eq!(ChannelType::parse("user:not-a-uuid"), None);
        assert_eq!(ChannelType::parse("user"), None);
    }
}

use serde::{Deserialize, Serialize};

/// A user or bot account on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The conversation an activity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Everything needed to proactively message a conversation later:
/// the channel, the service endpoint, and the participants.
///
/// The store treats this as an opaque JSON value; the concrete shape
/// matters only to the bot layer that replays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ChannelAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot: Option<ChannelAccount>,
    pub conversation: ConversationAccount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl ConversationReference {
    /// Conventional storage key: channel id plus conversation id.
    pub fn storage_key(&self) -> String {
        match &self.channel_id {
            Some(channel) => format!("{}/{}", channel, self.conversation.id),
            None => self.conversation.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_is_camel_case() {
        let reference = ConversationReference {
            activity_id: Some("act-1".into()),
            user: Some(ChannelAccount {
                id: "user-1".into(),
                name: Some("Sam".into()),
            }),
            bot: None,
            conversation: ConversationAccount {
                id: "conv-1".into(),
                name: None,
                conversation_type: Some("personal".into()),
                tenant_id: None,
            },
            channel_id: Some("msteams".into()),
            service_url: Some("https://smba.example.com/".into()),
            locale: None,
        };

        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(json["activityId"], "act-1");
        assert_eq!(json["conversation"]["conversationType"], "personal");
        assert_eq!(json["channelId"], "msteams");
        assert!(json.get("locale").is_none());
    }

    #[test]
    fn storage_key_combines_channel_and_conversation() {
        let conversation = ConversationAccount {
            id: "19:meeting".into(),
            name: None,
            conversation_type: None,
            tenant_id: None,
        };
        let reference = ConversationReference {
            activity_id: None,
            user: None,
            bot: None,
            conversation,
            channel_id: Some("msteams".into()),
            service_url: None,
            locale: None,
        };

        assert_eq!(reference.storage_key(), "msteams/19:meeting");
    }
}

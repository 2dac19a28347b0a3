use chrono::Utc;
use uuid::Uuid;

use crate::{Author, CommentId, Time, UserId};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EventId(pub Uuid);

/// One mutation of a thread, as handed to whoever wants to persist it
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Event {
    pub id: EventId,
    pub actor: UserId,
    pub date: Time,

    pub data: EventData,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum EventData {
    AddComment {
        comment_id: CommentId,
        parent_id: Option<CommentId>,
        author: Author,
        text: String,
    },
    SetLiked {
        comment_id: CommentId,
        now_liked: bool,
    },
}

impl Event {
    pub fn now(actor: UserId, data: EventData) -> Event {
        Event {
            id: EventId(Uuid::new_v4()),
            actor,
            date: Utc::now(),
            data,
        }
    }
}

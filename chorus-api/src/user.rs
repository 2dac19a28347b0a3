use uuid::Uuid;

use crate::STUB_UUID;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn stub() -> UserId {
        UserId(STUB_UUID)
    }
}

/// Who wrote a comment, along with what is needed to display them
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Author {
    pub id: UserId,
    pub name: String,
    pub avatar: Option<String>,

    /// Free-form label shown next to the name, eg. "Member" or "Trainer"
    pub role: String,
}

impl Author {
    pub fn new(id: UserId, name: String, role: String) -> Author {
        Author {
            id,
            name,
            avatar: None,
            role,
        }
    }

    pub fn stub() -> Author {
        Author::new(UserId::stub(), String::from("You"), String::from("Member"))
    }
}

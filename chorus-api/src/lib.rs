pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<chrono::Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod comment;
pub use comment::{Comment, CommentId, LikeState};

mod error;
pub use error::Error;

mod event;
pub use event::{Event, EventData, EventId};

mod post;
pub use post::{Goal, Milestone, PostId};

mod user;
pub use user::{Author, UserId};

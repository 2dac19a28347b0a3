mod comment;
pub use comment::Walk;

pub mod compose;

mod flat;
pub use flat::FlatComment;

mod post;
pub use post::Post;

mod thread;
pub use thread::Thread;

pub mod view;

pub mod api {
    pub use chorus_api::*;
}

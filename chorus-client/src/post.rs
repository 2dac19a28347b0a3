use crate::{
    api::{Author, Goal, LikeState, PostId, UserId},
    Thread,
};

/// A feed post, along with the discussion under it
#[derive(Clone, Debug)]
pub struct Post {
    pub id: PostId,
    pub author: Author,
    pub content: String,

    /// Only set on request posts
    pub goal: Option<Goal>,

    pub like_count: u64,
    pub liked: bool,

    pub thread: Thread,
}

impl Post {
    pub fn new(id: PostId, author: Author, content: String, viewer: UserId) -> Post {
        Post {
            id,
            author,
            content,
            goal: None,
            like_count: 0,
            liked: false,
            thread: Thread::new(viewer),
        }
    }

    pub fn toggle_like(&mut self) -> LikeState {
        self.liked = !self.liked;
        self.like_count = match self.liked {
            true => self.like_count.saturating_add(1),
            false => self.like_count.saturating_sub(1),
        };
        tracing::debug!(post = self.id.0, liked = self.liked, "toggled post like");
        LikeState {
            liked: self.liked,
            like_count: self.like_count,
        }
    }

    /// The number shown under the post, ie. top-level comments only
    pub fn comment_count(&self) -> usize {
        self.thread.top_level_len()
    }
}

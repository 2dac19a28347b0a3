use std::{fmt, sync::Arc};

use crate::{Author, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub author: Author,
    pub content: String,
    pub created_at: Time,

    pub like_count: u64,

    /// Whether the thread's viewer liked this comment
    pub liked: bool,

    /// Replies, oldest first. Each reply sits behind its own `Arc` so versions
    /// of the tree share untouched subtrees.
    #[serde(default)]
    pub replies: im::Vector<Arc<Comment>>,
}

impl Comment {
    pub fn new(id: CommentId, author: Author, content: String, created_at: Time) -> Comment {
        Comment {
            id,
            author,
            content,
            created_at,
            like_count: 0,
            liked: false,
            replies: im::Vector::new(),
        }
    }

    pub fn like_state(&self) -> LikeState {
        LikeState {
            liked: self.liked,
            like_count: self.like_count,
        }
    }

    /// Flips `liked`, keeping `like_count` in sync. Never goes below zero.
    pub fn toggle_like(&mut self) -> LikeState {
        self.set_liked(!self.liked);
        self.like_state()
    }

    /// Returns false if the comment already was in the requested state
    pub fn set_liked(&mut self, now_liked: bool) -> bool {
        if self.liked == now_liked {
            return false;
        }
        self.liked = now_liked;
        self.like_count = match now_liked {
            true => self.like_count.saturating_add(1),
            false => self.like_count.saturating_sub(1),
        };
        true
    }
}

// Dropping a deep chain of replies recursively could overflow the stack, so
// unlink the children first and drop them one level at a time. Replies still
// held by another version of the tree are only released, never walked.
impl Drop for Comment {
    fn drop(&mut self) {
        if self.replies.is_empty() {
            return;
        }
        let mut pending = vec![std::mem::take(&mut self.replies)];
        while let Some(mut replies) = pending.pop() {
            while let Some(child) = replies.pop_back() {
                if let Ok(mut child) = Arc::try_unwrap(child) {
                    let grandchildren = std::mem::take(&mut child.replies);
                    if !grandchildren.is_empty() {
                        pending.push(grandchildren);
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LikeState {
    pub liked: bool,
    pub like_count: u64,
}

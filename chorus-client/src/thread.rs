use std::{collections::HashSet, sync::Arc};

use crate::{
    api::{Author, Comment, CommentId, Error, Event, EventData, LikeState, UserId},
    comment::{self, Walk},
};

/// All the comments of one post, owned by a single local actor (the viewer).
///
/// Top-level comments are kept newest first, replies oldest first. Cloning a
/// thread is cheap, and mutating it only copies the path down to the comment
/// being changed, so clones taken before a mutation never observe it.
#[derive(Clone, Debug)]
pub struct Thread {
    viewer: UserId,
    comments: im::Vector<Arc<Comment>>,
    next_id: u64,

    /// Mutations not yet handed out through `take_events`
    events: Vec<Event>,
}

fn check_content(content: &str) -> Result<String, Error> {
    if content.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    Ok(String::from(content))
}

impl Thread {
    pub fn new(viewer: UserId) -> Thread {
        Thread {
            viewer,
            comments: im::Vector::new(),
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Adopts an already-built list of top-level comments, newest first
    pub fn from_comments(viewer: UserId, comments: Vec<Comment>) -> Thread {
        let mut thread = Thread::new(viewer);
        thread.comments = comments.into_iter().map(Arc::new).collect();
        let mut seen = HashSet::new();
        let mut max_id = 0;
        for (_, c) in thread.iter() {
            if !seen.insert(c.id) {
                tracing::warn!(id = %c.id, "duplicate comment id in adopted thread");
            }
            max_id = max_id.max(c.id.0);
        }
        thread.next_id = max_id.saturating_add(1);
        thread
    }

    /// Rebuilds a thread from a log of events, applied in order
    pub fn replay(viewer: UserId, events: impl IntoIterator<Item = Event>) -> Thread {
        let mut thread = Thread::new(viewer);
        for e in events {
            thread.apply(&e);
        }
        thread
    }

    pub fn viewer(&self) -> UserId {
        self.viewer
    }

    /// Top-level comments, newest first
    pub fn comments(&self) -> &im::Vector<Arc<Comment>> {
        &self.comments
    }

    pub fn iter(&self) -> Walk<'_> {
        Walk::new(&self.comments)
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn top_level_len(&self) -> usize {
        self.comments.len()
    }

    /// Number of comments at all depths
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn count_by_author(&self, author: &UserId) -> usize {
        self.iter().filter(|(_, c)| c.author.id == *author).count()
    }

    pub fn find(&self, id: CommentId) -> Option<&Comment> {
        comment::locate(&self.comments, id).and_then(|path| comment::resolve(&self.comments, &path))
    }

    pub fn contains(&self, id: CommentId) -> bool {
        self.find(id).is_some()
    }

    pub fn depth_of(&self, id: CommentId) -> Result<usize, Error> {
        self.iter()
            .find(|(_, c)| c.id == id)
            .map(|(depth, _)| depth)
            .ok_or(Error::CommentNotFound(id))
    }

    pub fn reply_count(&self, id: CommentId) -> Result<usize, Error> {
        self.find(id)
            .map(|c| c.replies.len())
            .ok_or(Error::CommentNotFound(id))
    }

    /// Hands out the mutations made since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[Event] {
        &self.events
    }

    fn peek_id(&self) -> Result<CommentId, Error> {
        if self.next_id == u64::MAX {
            return Err(Error::IdsExhausted);
        }
        Ok(CommentId(self.next_id))
    }

    fn locate(&self, id: CommentId) -> Result<Vec<usize>, Error> {
        comment::locate(&self.comments, id).ok_or_else(|| {
            tracing::debug!(%id, "comment not found in thread");
            Error::CommentNotFound(id)
        })
    }

    pub fn append_top_level(&mut self, content: &str, author: Author) -> Result<Comment, Error> {
        let content = check_content(content)?;
        let id = self.peek_id()?;
        let event = Event::now(
            self.viewer,
            EventData::AddComment {
                comment_id: id,
                parent_id: None,
                author: author.clone(),
                text: content.clone(),
            },
        );
        let comment = Comment::new(id, author, content, event.date);
        self.comments.push_front(Arc::new(comment.clone()));
        self.next_id = id.0 + 1;
        self.events.push(event);
        tracing::debug!(%id, "added top-level comment");
        Ok(comment)
    }

    pub fn append_reply(
        &mut self,
        parent_id: CommentId,
        content: &str,
        author: Author,
    ) -> Result<Comment, Error> {
        let content = check_content(content)?;
        let path = self.locate(parent_id)?;
        let id = self.peek_id()?;
        let event = Event::now(
            self.viewer,
            EventData::AddComment {
                comment_id: id,
                parent_id: Some(parent_id),
                author: author.clone(),
                text: content.clone(),
            },
        );
        let comment = Comment::new(id, author, content, event.date);
        comment::resolve_mut(&mut self.comments, &path)
            .ok_or(Error::CommentNotFound(parent_id))?
            .replies
            .push_back(Arc::new(comment.clone()));
        self.next_id = id.0 + 1;
        self.events.push(event);
        tracing::debug!(%id, parent = %parent_id, depth = path.len(), "added reply");
        Ok(comment)
    }

    pub fn toggle_like(&mut self, id: CommentId) -> Result<LikeState, Error> {
        let path = self.locate(id)?;
        let state = comment::resolve_mut(&mut self.comments, &path)
            .ok_or(Error::CommentNotFound(id))?
            .toggle_like();
        self.events.push(Event::now(
            self.viewer,
            EventData::SetLiked {
                comment_id: id,
                now_liked: state.liked,
            },
        ));
        tracing::debug!(%id, liked = state.liked, like_count = state.like_count, "toggled like");
        Ok(state)
    }

    /// Applies an event coming from a log, without recording a new one.
    ///
    /// Comments follow the same rules as `append_*`: blank ones and replies to
    /// a comment that is not there are skipped with a warning. Their id still
    /// counts as used. Likes from the viewer flip `liked`, likes from anyone
    /// else only move the counter.
    pub fn apply(&mut self, e: &Event) {
        match &e.data {
            EventData::AddComment {
                comment_id,
                parent_id,
                author,
                text,
            } => {
                self.next_id = self.next_id.max(comment_id.0.saturating_add(1));
                if self.contains(*comment_id) {
                    tracing::warn!(id = %comment_id, "ignoring re-add of an existing comment");
                    return;
                }
                if text.trim().is_empty() {
                    tracing::warn!(id = %comment_id, "ignoring comment with blank content");
                    return;
                }
                let comment = Comment::new(*comment_id, author.clone(), text.clone(), e.date);
                let comment = Arc::new(comment);
                let parent_id = match parent_id {
                    Some(p) => *p,
                    None => {
                        self.comments.push_front(comment);
                        return;
                    }
                };
                let parent = match comment::locate(&self.comments, parent_id) {
                    Some(path) => comment::resolve_mut(&mut self.comments, &path),
                    None => None,
                };
                match parent {
                    Some(parent) => parent.replies.push_back(comment),
                    None => tracing::warn!(
                        id = %comment_id,
                        parent = %parent_id,
                        "ignoring reply to a comment not in the thread"
                    ),
                }
            }
            EventData::SetLiked {
                comment_id,
                now_liked,
            } => {
                let target = match comment::locate(&self.comments, *comment_id) {
                    Some(path) => comment::resolve_mut(&mut self.comments, &path),
                    None => None,
                };
                let comment = match target {
                    Some(c) => c,
                    None => {
                        tracing::warn!(id = %comment_id, "like event for unknown comment");
                        return;
                    }
                };
                if e.actor == self.viewer {
                    if !comment.set_liked(*now_liked) {
                        tracing::debug!(id = %comment_id, "like event does not change anything");
                    }
                } else {
                    comment.like_count = match now_liked {
                        true => comment.like_count.saturating_add(1),
                        false => comment.like_count.saturating_sub(1),
                    };
                }
            }
        }
    }
}

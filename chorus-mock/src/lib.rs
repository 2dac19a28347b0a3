//! Reference thread used to check `chorus_client::Thread` against.
//!
//! Every operation rebuilds the whole tree by recursive mapping, which is slow
//! and recursion-bound but simple enough to trust.

use chorus_client::api::{Author, CommentId, Error, LikeState, UserId};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MockComment {
    pub id: CommentId,
    pub author: UserId,
    pub content: String,
    pub like_count: u64,
    pub liked: bool,
    pub replies: Vec<MockComment>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MockThread {
    comments: Vec<MockComment>,
    next_id: u64,
}

/// (depth, id, author, content, like_count, liked), in pre-order
pub type Shape = Vec<(usize, CommentId, UserId, String, u64, bool)>;

fn contains(comments: &[MockComment], id: CommentId) -> bool {
    comments
        .iter()
        .any(|c| c.id == id || contains(&c.replies, id))
}

/// Applies `f` to the first comment with this id, in pre-order
fn update_first(
    comments: Vec<MockComment>,
    id: CommentId,
    done: &mut bool,
    f: &mut dyn FnMut(&mut MockComment),
) -> Vec<MockComment> {
    comments
        .into_iter()
        .map(|mut c| {
            if !*done && c.id == id {
                *done = true;
                f(&mut c);
            }
            if !*done {
                c.replies = update_first(std::mem::take(&mut c.replies), id, done, f);
            }
            c
        })
        .collect()
}

fn shape_of(comments: &[MockComment], depth: usize, res: &mut Shape) {
    for c in comments {
        res.push((
            depth,
            c.id,
            c.author,
            c.content.clone(),
            c.like_count,
            c.liked,
        ));
        shape_of(&c.replies, depth + 1, res);
    }
}

impl MockThread {
    pub fn new() -> MockThread {
        MockThread {
            comments: Vec::new(),
            next_id: 1,
        }
    }

    fn new_comment(&mut self, content: &str, author: &Author) -> MockComment {
        let id = CommentId(self.next_id);
        self.next_id += 1;
        MockComment {
            id,
            author: author.id,
            content: String::from(content),
            like_count: 0,
            liked: false,
            replies: Vec::new(),
        }
    }

    pub fn append_top_level(&mut self, content: &str, author: &Author) -> Result<CommentId, Error> {
        if content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        let c = self.new_comment(content, author);
        let id = c.id;
        self.comments.insert(0, c);
        Ok(id)
    }

    pub fn append_reply(
        &mut self,
        parent: CommentId,
        content: &str,
        author: &Author,
    ) -> Result<CommentId, Error> {
        if content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        if !contains(&self.comments, parent) {
            return Err(Error::CommentNotFound(parent));
        }
        let reply = self.new_comment(content, author);
        let id = reply.id;
        let mut reply = Some(reply);
        let mut done = false;
        self.comments = update_first(
            std::mem::take(&mut self.comments),
            parent,
            &mut done,
            &mut |c: &mut MockComment| c.replies.extend(reply.take()),
        );
        Ok(id)
    }

    pub fn toggle_like(&mut self, id: CommentId) -> Result<LikeState, Error> {
        if !contains(&self.comments, id) {
            return Err(Error::CommentNotFound(id));
        }
        let mut state = None;
        let mut done = false;
        let mut flip = |c: &mut MockComment| {
            if c.liked {
                c.like_count = c.like_count.saturating_sub(1);
            } else {
                c.like_count += 1;
            }
            c.liked = !c.liked;
            state = Some(LikeState {
                liked: c.liked,
                like_count: c.like_count,
            });
        };
        self.comments = update_first(std::mem::take(&mut self.comments), id, &mut done, &mut flip);
        state.ok_or(Error::CommentNotFound(id))
    }

    pub fn depth_of(&self, id: CommentId) -> Result<usize, Error> {
        self.shape()
            .into_iter()
            .find(|(_, cid, ..)| *cid == id)
            .map(|(depth, ..)| depth)
            .ok_or(Error::CommentNotFound(id))
    }

    /// Every comment id, in pre-order
    pub fn ids(&self) -> Vec<CommentId> {
        self.shape().into_iter().map(|(_, id, ..)| id).collect()
    }

    pub fn shape(&self) -> Shape {
        let mut res = Vec::new();
        shape_of(&self.comments, 0, &mut res);
        res
    }
}

use std::{collections::HashMap, sync::Arc};

use crate::{
    api::{Author, Comment, CommentId, Error, Time, UserId},
    Thread,
};

/// A comment without its replies, pointing at its parent instead
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FlatComment {
    pub id: CommentId,
    pub parent_id: Option<CommentId>,
    pub author: Author,
    pub content: String,
    pub created_at: Time,
    pub like_count: u64,
    pub liked: bool,
}

impl FlatComment {
    fn into_comment(self) -> Comment {
        let mut c = Comment::new(self.id, self.author, self.content, self.created_at);
        c.like_count = self.like_count;
        c.liked = self.liked;
        c
    }
}

impl Thread {
    /// Lists every comment in pre-order, so parents always come before their
    /// replies
    pub fn to_flat(&self) -> Vec<FlatComment> {
        let mut ancestors: Vec<CommentId> = Vec::new();
        self.iter()
            .map(|(depth, c)| {
                ancestors.truncate(depth);
                let parent_id = ancestors.last().copied();
                ancestors.push(c.id);
                FlatComment {
                    id: c.id,
                    parent_id,
                    author: c.author.clone(),
                    content: c.content.clone(),
                    created_at: c.created_at,
                    like_count: c.like_count,
                    liked: c.liked,
                }
            })
            .collect()
    }

    /// Rebuilds a thread from rows listing each parent before its replies.
    /// Top-level rows and the replies of each comment keep their relative order.
    pub fn from_flat(viewer: UserId, rows: Vec<FlatComment>) -> Result<Thread, Error> {
        let mut index = HashMap::with_capacity(rows.len());
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];
        let mut roots = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if index.insert(row.id, i).is_some() {
                return Err(Error::DuplicateId(row.id));
            }
            match row.parent_id {
                None => roots.push(i),
                Some(p) => match index.get(&p) {
                    Some(&parent) if parent != i => children[parent].push(i),
                    _ => return Err(Error::CommentNotFound(p)),
                },
            }
        }

        // replies always come after their parent, so building from the end
        // means every reply is ready by the time its parent gets built
        let mut built: Vec<Option<Comment>> = vec![None; rows.len()];
        for (i, row) in rows.into_iter().enumerate().rev() {
            let mut comment = row.into_comment();
            comment.replies = children[i]
                .iter()
                .filter_map(|&child| built[child].take())
                .map(Arc::new)
                .collect();
            built[i] = Some(comment);
        }
        let comments = roots
            .into_iter()
            .filter_map(|i| built[i].take())
            .collect::<Vec<_>>();
        Ok(Thread::from_comments(viewer, comments))
    }
}

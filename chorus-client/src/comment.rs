use std::sync::Arc;

use crate::api::{Comment, CommentId};

/// Pre-order walk over a comment forest, yielding each comment with its depth.
///
/// The walk keeps its own stack of levels instead of recursing, so arbitrarily
/// deep reply chains are fine.
pub struct Walk<'a> {
    levels: Vec<&'a im::Vector<Arc<Comment>>>,
    path: Vec<usize>,
    started: bool,
}

impl<'a> Walk<'a> {
    pub fn new(comments: &'a im::Vector<Arc<Comment>>) -> Walk<'a> {
        Walk {
            levels: vec![comments],
            path: vec![0],
            started: false,
        }
    }

    /// Index path of the comment last returned by `next`: its position among
    /// the top-level comments, then among each successive parent's replies
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    fn step_past_current(&mut self) {
        let depth = match self.levels.len().checked_sub(1) {
            Some(d) => d,
            None => return,
        };
        let level: &'a im::Vector<Arc<Comment>> = self.levels[depth];
        match level.get(self.path[depth]) {
            Some(c) if !c.replies.is_empty() => {
                self.levels.push(&c.replies);
                self.path.push(0);
            }
            _ => self.path[depth] += 1,
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Comment);

    fn next(&mut self) -> Option<(usize, &'a Comment)> {
        if self.started {
            self.step_past_current();
        }
        self.started = true;
        loop {
            let depth = self.levels.len().checked_sub(1)?;
            let level: &'a im::Vector<Arc<Comment>> = self.levels[depth];
            match level.get(self.path[depth]) {
                Some(c) => return Some((depth, &**c)),
                None => {
                    self.levels.pop();
                    self.path.pop();
                    if let Some(idx) = self.path.last_mut() {
                        *idx += 1;
                    }
                }
            }
        }
    }
}

/// Finds the first comment with this id, in pre-order and top-level order
pub fn locate(comments: &im::Vector<Arc<Comment>>, id: CommentId) -> Option<Vec<usize>> {
    let mut walk = Walk::new(comments);
    while let Some((_, c)) = walk.next() {
        if c.id == id {
            return Some(walk.path().to_vec());
        }
    }
    None
}

pub fn resolve<'a>(
    comments: &'a im::Vector<Arc<Comment>>,
    path: &[usize],
) -> Option<&'a Comment> {
    let (last, parents) = path.split_last()?;
    let mut level = comments;
    for &idx in parents {
        level = &level.get(idx)?.replies;
    }
    level.get(*last).map(Arc::as_ref)
}

/// Only the comments along `path` get copied if they are shared with another
/// version of the tree, everything hanging off that path stays shared.
pub fn resolve_mut<'a>(
    comments: &'a mut im::Vector<Arc<Comment>>,
    path: &[usize],
) -> Option<&'a mut Comment> {
    let (last, parents) = path.split_last()?;
    let mut level = comments;
    for &idx in parents {
        level = &mut Arc::make_mut(level.get_mut(idx)?).replies;
    }
    level.get_mut(*last).map(Arc::make_mut)
}

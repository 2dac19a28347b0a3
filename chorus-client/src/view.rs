//! Helpers for whoever draws a thread: which rows are visible given the
//! comments the reader folded away, and the small labels shown next to them.

use std::collections::HashSet;

use chrono::Duration;

use crate::{
    api::{Comment, CommentId, Time},
    Thread,
};

/// Which comments the reader folded. Lives next to the thread, never in it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CollapseState(HashSet<CommentId>);

impl CollapseState {
    pub fn new() -> CollapseState {
        CollapseState::default()
    }

    /// Returns whether the comment is now collapsed
    pub fn toggle(&mut self, id: CommentId) -> bool {
        if !self.0.remove(&id) {
            self.0.insert(id);
            return true;
        }
        false
    }

    pub fn collapse(&mut self, id: CommentId) {
        self.0.insert(id);
    }

    pub fn expand(&mut self, id: CommentId) {
        self.0.remove(&id);
    }

    pub fn is_collapsed(&self, id: CommentId) -> bool {
        self.0.contains(&id)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Row<'a> {
    pub depth: usize,
    pub comment: &'a Comment,

    /// Set when the comment is collapsed and has replies: how many are hidden
    pub hidden_replies: Option<usize>,
}

/// Rows to draw, in reading order
pub fn visible_rows<'a>(thread: &'a Thread, collapsed: &CollapseState) -> Vec<Row<'a>> {
    let mut res = Vec::new();
    let mut stack = thread
        .comments()
        .iter()
        .rev()
        .map(|c| (0, &**c))
        .collect::<Vec<_>>();
    while let Some((depth, comment)) = stack.pop() {
        let folded = collapsed.is_collapsed(comment.id) && !comment.replies.is_empty();
        res.push(Row {
            depth,
            comment,
            hidden_replies: folded.then(|| comment.replies.len()),
        });
        if !folded {
            stack.extend(comment.replies.iter().rev().map(|c| (depth + 1, &**c)));
        }
    }
    res
}

pub fn like_label(comment: &Comment) -> String {
    match comment.like_count {
        0 => String::from("Like"),
        n => n.to_string(),
    }
}

pub fn hidden_label(hidden: usize) -> String {
    match hidden {
        1 => String::from("1 reply hidden"),
        n => format!("{n} replies hidden"),
    }
}

pub fn relative_label(created_at: Time, now: Time) -> String {
    let elapsed = now.signed_duration_since(created_at);
    if elapsed < Duration::minutes(1) {
        String::from("Just now")
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

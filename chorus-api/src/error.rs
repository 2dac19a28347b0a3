use crate::CommentId;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Comment content is empty")]
    EmptyContent,

    #[error("Comment not found {0}")]
    CommentNotFound(CommentId),

    #[error("Comment id already used {0}")]
    DuplicateId(CommentId),

    #[error("No comment id left to allocate")]
    IdsExhausted,
}

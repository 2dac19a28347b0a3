use std::{cmp, fmt::Debug, ops::RangeTo};
use bolero::generator::TypeGenerator;

use chorus_client::{
    api::{Author, CommentId, UserId, Uuid},
    Thread,
};
use chorus_mock::{MockThread, Shape};

const NUM_AUTHORS: usize = 4;

// Never allocated: fuzz runs stay far below this many comments
const MISSING_ID: CommentId = CommentId(u64::MAX / 2);

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum Text {
    Empty,
    Blank,
    Words(u8),
}

impl Text {
    fn render(&self) -> String {
        match self {
            Text::Empty => String::new(),
            Text::Blank => String::from(" \n\t "),
            Text::Words(n) => format!("comment number {n}"),
        }
    }
}

#[derive(Clone, Debug, bolero::generator::TypeGenerator)]
enum FuzzOp {
    AddTopLevel { author: usize, text: Text },
    Reply { parent: usize, author: usize, text: Text },
    ReplyToMissing { author: usize },
    Like { target: usize },
    LikeMissing,
    Depth { target: usize },
}

fn resize_int(fuzz_id: usize, RangeTo { end }: RangeTo<usize>) -> Option<usize> {
    if end == 0 {
        return None;
    }
    let bucket_size = cmp::max(1, usize::MAX / end); // in case we rounded to 0
    let id = fuzz_id / bucket_size;
    Some(cmp::min(id, end - 1)) // in case id was actually over end - 1 due to rounding
}

fn compare<T>(name: &str, app_res: T, mock_res: T)
where
    T: Debug + PartialEq,
{
    assert_eq!(
        app_res, mock_res,
        "thread and mock did not return the same result for {name}"
    );
}

fn shape(thread: &Thread) -> Shape {
    thread
        .iter()
        .map(|(depth, c)| {
            (
                depth,
                c.id,
                c.author.id,
                c.content.clone(),
                c.like_count,
                c.liked,
            )
        })
        .collect()
}

struct ComparativeFuzzer {
    authors: Vec<Author>,
    thread: Thread,
    mock: MockThread,
}

impl ComparativeFuzzer {
    fn new() -> ComparativeFuzzer {
        let authors = (0..NUM_AUTHORS)
            .map(|i| {
                Author::new(
                    UserId(Uuid::new_v4()),
                    format!("user {i}"),
                    String::from("Member"),
                )
            })
            .collect::<Vec<_>>();
        ComparativeFuzzer {
            thread: Thread::new(authors[0].id),
            authors,
            mock: MockThread::new(),
        }
    }

    fn author(&self, fuzz_id: usize) -> Author {
        let idx = resize_int(fuzz_id, ..self.authors.len()).unwrap_or(0);
        self.authors[idx].clone()
    }

    fn existing(&self, fuzz_id: usize) -> Option<CommentId> {
        let ids = self.mock.ids();
        resize_int(fuzz_id, ..ids.len()).map(|i| ids[i])
    }

    fn execute_fuzz_op(&mut self, op: FuzzOp) {
        let before = self.thread.clone();
        let mut liked = None;
        let mut added = None;
        match op {
            FuzzOp::AddTopLevel { author, text } => {
                let (author, text) = (self.author(author), text.render());
                let app = self
                    .thread
                    .append_top_level(&text, author.clone())
                    .map(|c| c.id);
                compare(
                    "AddTopLevel",
                    app.clone(),
                    self.mock.append_top_level(&text, &author),
                );
                added = app.ok().map(|id| (None, id));
            }
            FuzzOp::Reply {
                parent,
                author,
                text,
            } => match self.existing(parent) {
                Some(parent) => {
                    let (author, text) = (self.author(author), text.render());
                    let app = self
                        .thread
                        .append_reply(parent, &text, author.clone())
                        .map(|c| c.id);
                    compare(
                        "Reply",
                        app.clone(),
                        self.mock.append_reply(parent, &text, &author),
                    );
                    added = app.ok().map(|id| (Some(parent), id));
                }
                None => return self.execute_fuzz_op(FuzzOp::AddTopLevel { author, text }),
            },
            FuzzOp::ReplyToMissing { author } => {
                let author = self.author(author);
                compare(
                    "ReplyToMissing",
                    self.thread
                        .append_reply(MISSING_ID, "x", author.clone())
                        .map(|c| c.id),
                    self.mock.append_reply(MISSING_ID, "x", &author),
                );
            }
            FuzzOp::Like { target } => match self.existing(target) {
                Some(target) => {
                    compare(
                        "Like",
                        self.thread.toggle_like(target),
                        self.mock.toggle_like(target),
                    );
                    liked = Some(target);
                }
                None => return self.execute_fuzz_op(FuzzOp::LikeMissing),
            },
            FuzzOp::LikeMissing => {
                compare(
                    "LikeMissing",
                    self.thread.toggle_like(MISSING_ID),
                    self.mock.toggle_like(MISSING_ID),
                );
            }
            FuzzOp::Depth { target } => {
                let target = self.existing(target).unwrap_or(MISSING_ID);
                compare(
                    "Depth",
                    self.thread.depth_of(target),
                    self.mock.depth_of(target),
                );
            }
        }
        compare("shape", shape(&self.thread), self.mock.shape());

        // apart from the targeted comment, nothing changed but the new reply list
        for (_, old) in before.iter() {
            let now = self
                .thread
                .find(old.id)
                .unwrap_or_else(|| panic!("comment {} disappeared", old.id));
            assert_eq!(now.author, old.author);
            assert_eq!(now.content, old.content);
            assert_eq!(now.created_at, old.created_at);
            if liked != Some(old.id) {
                assert_eq!(now.like_state(), old.like_state(), "comment {}", old.id);
            }
            let mut expected_replies = old.replies.iter().map(|c| c.id).collect::<Vec<_>>();
            if let Some((Some(parent), new)) = added {
                if parent == old.id {
                    expected_replies.push(new);
                }
            }
            let replies = now.replies.iter().map(|c| c.id).collect::<Vec<_>>();
            assert_eq!(replies, expected_replies, "replies of comment {}", old.id);
        }
        let expected_len = before.len() + usize::from(added.is_some());
        assert_eq!(self.thread.len(), expected_len);
        if liked.is_none() && added.is_none() {
            assert_eq!(self.thread.comments(), before.comments());
        }
    }
}

#[test]
fn compare_with_mock() {
    bolero::check!()
        .with_type::<Vec<FuzzOp>>()
        .cloned()
        .for_each(|ops| {
            let mut fuzzer = ComparativeFuzzer::new();
            for op in ops {
                fuzzer.execute_fuzz_op(op);
            }
        });
}

#[test]
fn events_replay_to_the_same_thread() {
    bolero::check!()
        .with_type::<Vec<FuzzOp>>()
        .cloned()
        .for_each(|ops| {
            let mut fuzzer = ComparativeFuzzer::new();
            for op in ops {
                fuzzer.execute_fuzz_op(op);
            }
            let viewer = fuzzer.thread.viewer();
            let replayed = Thread::replay(viewer, fuzzer.thread.take_events());
            assert_eq!(replayed.comments(), fuzzer.thread.comments());
        });
}

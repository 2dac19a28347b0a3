use std::path::{Path, PathBuf};

use anyhow::Context;
use chorus_client::{
    api::{Author, CommentId, UserId, Uuid},
    view::{self, CollapseState},
    FlatComment, Thread,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Thread file to operate on
    #[structopt(short, long, env = "CHORUS_FILE")]
    file: PathBuf,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Create an empty thread, owned by a new viewer
    Init {
        /// Viewer's display name
        #[structopt(long)]
        name: String,

        #[structopt(long, default_value = "Member")]
        role: String,

        #[structopt(long)]
        avatar: Option<String>,
    },

    /// Post a new top-level comment as the viewer
    Comment { text: String },

    /// Reply to any comment as the viewer
    Reply { parent: u64, text: String },

    /// Like or unlike a comment
    Like { id: u64 },

    /// Print how deeply nested a comment is
    Depth { id: u64 },

    /// Print the thread
    Show {
        /// Hide the replies of this comment
        #[structopt(long)]
        collapse: Vec<u64>,
    },
}

#[derive(serde::Deserialize, serde::Serialize)]
struct ThreadFile {
    viewer: Author,
    comments: Vec<FlatComment>,
}

fn load(path: &Path) -> anyhow::Result<(Author, Thread)> {
    let data = std::fs::read(path).with_context(|| format!("reading thread file {path:?}"))?;
    let file: ThreadFile = serde_json::from_slice(&data)
        .with_context(|| format!("parsing thread file {path:?}"))?;
    let thread = Thread::from_flat(file.viewer.id, file.comments)
        .with_context(|| format!("rebuilding thread from {path:?}"))?;
    Ok((file.viewer, thread))
}

fn save(path: &Path, viewer: Author, thread: &mut Thread) -> anyhow::Result<()> {
    for e in thread.take_events() {
        tracing::info!(event = ?e, "thread changed");
    }
    let file = ThreadFile {
        viewer,
        comments: thread.to_flat(),
    };
    let data = serde_json::to_vec_pretty(&file).context("serializing thread")?;
    std::fs::write(path, data).with_context(|| format!("writing thread file {path:?}"))
}

fn render(thread: &Thread, collapsed: &CollapseState) -> String {
    let now = chrono::Utc::now();
    let mut res = String::new();
    for row in view::visible_rows(thread, collapsed) {
        let c = row.comment;
        let indent = "  ".repeat(row.depth);
        res.push_str(&format!(
            "{indent}[{}] {} ({}) · {} · {}{}\n",
            c.id,
            c.author.name,
            c.author.role,
            view::relative_label(c.created_at, now),
            view::like_label(c),
            if c.liked { " (liked)" } else { "" },
        ));
        for line in c.content.lines() {
            res.push_str(&format!("{indent}    {line}\n"));
        }
        if let Some(hidden) = row.hidden_replies {
            res.push_str(&format!("{indent}    … {}\n", view::hidden_label(hidden)));
        }
    }
    res
}

fn run(opt: Opt) -> anyhow::Result<()> {
    if let Command::Init { name, role, avatar } = opt.cmd {
        if opt.file.exists() {
            anyhow::bail!("thread file {:?} already exists", opt.file);
        }
        let mut viewer = Author::new(UserId(Uuid::new_v4()), name, role);
        viewer.avatar = avatar;
        let mut thread = Thread::new(viewer.id);
        return save(&opt.file, viewer, &mut thread);
    }

    let (viewer, mut thread) = load(&opt.file)?;
    match opt.cmd {
        Command::Init { .. } => unreachable!("handled above"),
        Command::Comment { text } => {
            let c = thread
                .append_top_level(&text, viewer.clone())
                .context("posting comment")?;
            println!("{}", c.id);
        }
        Command::Reply { parent, text } => {
            let c = thread
                .append_reply(CommentId(parent), &text, viewer.clone())
                .with_context(|| format!("replying to comment {parent}"))?;
            println!("{}", c.id);
        }
        Command::Like { id } => {
            let state = thread
                .toggle_like(CommentId(id))
                .with_context(|| format!("liking comment {id}"))?;
            println!(
                "{} {}",
                if state.liked { "liked" } else { "unliked" },
                state.like_count
            );
        }
        Command::Depth { id } => {
            let depth = thread
                .depth_of(CommentId(id))
                .with_context(|| format!("looking up comment {id}"))?;
            println!("{depth}");
            return Ok(());
        }
        Command::Show { collapse } => {
            let mut collapsed = CollapseState::new();
            for id in collapse {
                collapsed.collapse(CommentId(id));
            }
            print!("{}", render(&thread, &collapsed));
            return Ok(());
        }
    }
    save(&opt.file, viewer, &mut thread)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    run(opt)
}

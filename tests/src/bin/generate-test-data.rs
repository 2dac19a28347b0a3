use anyhow::Context;
use chorus_client::{
    api::{Author, CommentId, UserId, Uuid},
    Thread,
};
use rand::{seq::SliceRandom, Rng};

const NUM_USERS: usize = 8;

const NUM_TOP_LEVEL: usize = 20;
const NUM_REPLIES: usize = 300;
const DEEP_CHAIN_LEN: usize = 12;
const NUM_LIKES: usize = 150;

const MAX_WORDS: usize = 25;

const NAMES: [&str; 8] = [
    "Grace Adebayo",
    "Samuel Okafor",
    "Amina Yusuf",
    "David Mensah",
    "Fatima Bello",
    "John Kamau",
    "Esther Nwosu",
    "Peter Otieno",
];
const ROLES: [&str; 4] = ["Member", "Trainer", "Volunteer", "Donor"];

fn gen_author(rng: &mut impl Rng, i: usize) -> Author {
    let mut author = Author::new(
        UserId(Uuid::new_v4()),
        String::from(NAMES[i % NAMES.len()]),
        String::from(*ROLES.choose(rng).expect("roles is not empty")),
    );
    if rng.gen_bool(0.8) {
        author.avatar = Some(format!("https://avatars.example.org/{}.jpg", author.id.0));
    }
    author
}

fn gen_text(rng: &mut impl Rng) -> String {
    lipsum::lipsum_words(rng.gen_range(1..=MAX_WORDS))
}

fn pick(rng: &mut impl Rng, ids: &[CommentId]) -> anyhow::Result<CommentId> {
    ids.choose(rng)
        .copied()
        .context("picking a comment in an empty thread")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut rng = rand::thread_rng();
    let users = (0..NUM_USERS)
        .map(|i| gen_author(&mut rng, i))
        .collect::<Vec<_>>();
    let gen_user = |rng: &mut rand::rngs::ThreadRng| -> Author {
        users
            .choose(rng)
            .cloned()
            .expect("there is at least one user")
    };
    let viewer = users[0].clone();
    let mut thread = Thread::new(viewer.id);

    // Generate top-level comments
    let mut ids = Vec::new();
    for _ in 0..NUM_TOP_LEVEL {
        let text = gen_text(&mut rng);
        let c = thread
            .append_top_level(&text, gen_user(&mut rng))
            .context("adding top-level comment")?;
        ids.push(c.id);
    }

    // Then replies anywhere in the tree
    for _ in 0..NUM_REPLIES {
        let parent = pick(&mut rng, &ids)?;
        let text = gen_text(&mut rng);
        let c = thread
            .append_reply(parent, &text, gen_user(&mut rng))
            .with_context(|| format!("replying to comment {parent}"))?;
        ids.push(c.id);
    }

    // Make sure there is at least one properly deep conversation
    let mut parent = pick(&mut rng, &ids)?;
    for _ in 0..DEEP_CHAIN_LEN {
        let text = gen_text(&mut rng);
        parent = thread
            .append_reply(parent, &text, gen_user(&mut rng))
            .with_context(|| format!("replying to comment {parent}"))?
            .id;
    }

    // Finally, the viewer likes (and sometimes unlikes) a few comments
    for _ in 0..NUM_LIKES {
        let target = pick(&mut rng, &ids)?;
        thread
            .toggle_like(target)
            .with_context(|| format!("liking comment {target}"))?;
    }

    let deepest = thread.depth_of(parent)?;
    tracing::info!(
        comments = thread.len(),
        top_level = thread.top_level_len(),
        deepest,
        "generated thread"
    );
    let out = serde_json::json!({
        "viewer": viewer,
        "comments": thread.to_flat(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serializing thread")?
    );
    Ok(())
}

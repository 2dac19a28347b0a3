//! Text editing for the comment box, as pure functions of the text and the
//! cursor position. Cursors count chars, not bytes, and are clamped to the end
//! of the text.

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Trigger {
    /// Typing `@partial`
    Mention(String),

    /// Typing `#partial`
    Hashtag(String),
}

fn byte_offset(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\n'
}

pub fn insert_at(text: &str, cursor: usize, insertion: &str) -> (String, usize) {
    replace_from(text, byte_offset(text, cursor), cursor, insertion)
}

/// Replaces `text[start..cursor]` (byte offset, char cursor) with `insertion`
fn replace_from(text: &str, start: usize, cursor: usize, insertion: &str) -> (String, usize) {
    let end = byte_offset(text, cursor);
    let mut res = String::with_capacity(text.len() + insertion.len());
    res.push_str(&text[..start]);
    res.push_str(insertion);
    res.push_str(&text[end..]);
    let new_cursor = text[..start].chars().count() + insertion.chars().count();
    (res, new_cursor)
}

/// What the word under the cursor is being typed as, if anything
pub fn active_trigger(text: &str, cursor: usize) -> Option<Trigger> {
    let before = &text[..byte_offset(text, cursor)];
    let word_start = before.rfind(is_separator);
    let starts_word = |pos: Option<usize>| match (pos, word_start) {
        (Some(p), Some(sep)) => p > sep,
        (Some(_), None) => true,
        (None, _) => false,
    };
    let at = before.rfind('@');
    let hash = before.rfind('#');
    if starts_word(at) {
        at.map(|p| Trigger::Mention(String::from(&before[p + 1..])))
    } else if starts_word(hash) {
        hash.map(|p| Trigger::Hashtag(String::from(&before[p + 1..])))
    } else {
        None
    }
}

fn complete(text: &str, cursor: usize, trigger: char, word: &str) -> (String, usize) {
    let end = byte_offset(text, cursor);
    let start = text[..end].rfind(trigger).unwrap_or(end);
    replace_from(text, start, cursor, &format!("{trigger}{word} "))
}

/// Replaces the `@partial` being typed with `@name `
pub fn complete_mention(text: &str, cursor: usize, name: &str) -> (String, usize) {
    complete(text, cursor, '@', name)
}

/// Replaces the `#partial` being typed with `#tag `
pub fn complete_hashtag(text: &str, cursor: usize, tag: &str) -> (String, usize) {
    complete(text, cursor, '#', tag)
}

/// What gets added to the comment box when replying to someone
pub fn mention_prefix(name: &str) -> String {
    format!("@{name} ")
}

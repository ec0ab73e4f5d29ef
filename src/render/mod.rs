//! Pure rendering of the poem board.
//!
//! Everything here is a function of its inputs: the poem list, the search
//! text and whether a session is active. No state, no side effects, so the
//! client can redraw from its cache without touching the network.

use crate::forum_store::Poem;

/// Shown when the search filter leaves nothing to display.
pub const NO_POEMS_PLACEHOLDER: &str = "No poems found.";

/// Shown instead of the comment affordance when nobody is logged in.
pub const LOGIN_TO_COMMENT: &str = "Login to comment";

/// Case-insensitive substring filter over title, author name and content.
/// An empty search matches every poem.
pub fn filter_poems<'a>(poems: &'a [Poem], search: &str) -> Vec<&'a Poem> {
    let query = search.to_lowercase();
    poems
        .iter()
        .filter(|poem| {
            poem.title.to_lowercase().contains(&query)
                || poem.author_name.to_lowercase().contains(&query)
                || poem.content.to_lowercase().contains(&query)
        })
        .collect()
}

/// Renders the filtered board as display text. Poems are numbered 1-based in
/// display order; those numbers are what the `comment <n> <text>` command
/// refers to.
pub fn render_poems(poems: &[Poem], search: &str, logged_in: bool) -> String {
    let visible = filter_poems(poems, search);
    if visible.is_empty() {
        return NO_POEMS_PLACEHOLDER.to_string();
    }

    let mut out = String::new();
    for (index, poem) in visible.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}. {}\n", index + 1, poem.title));
        out.push_str(&format!("   by {}\n\n", poem.author_name));
        for line in poem.content.lines() {
            out.push_str(&format!("   {}\n", line));
        }
        out.push('\n');
        if poem.comments.is_empty() {
            out.push_str("   (no comments yet)\n");
        } else {
            for comment in poem.comments.iter() {
                out.push_str(&format!("   {}: {}\n", comment.username, comment.text));
            }
        }
        if logged_in {
            out.push_str(&format!("   reply with: comment {} <text>\n", index + 1));
        } else {
            out.push_str(&format!("   {}\n", LOGIN_TO_COMMENT));
        }
    }
    out
}

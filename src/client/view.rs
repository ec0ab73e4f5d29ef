use crate::forum_store::{Comment, Poem};
use crate::render::render_poems;

/// Client-side cache of the board plus the active search filter.
///
/// Commands update it, the main loop renders it. Writes merge the server's
/// response straight into the cache so the board reflects them without a
/// full refetch.
#[derive(Default, Clone)]
pub struct ViewState {
    poems: Vec<Poem>,
    search: String,
}

impl ViewState {
    pub fn set_poems(&mut self, poems: Vec<Poem>) {
        self.poems = poems;
    }

    pub fn set_search(&mut self, search: String) {
        self.search = search;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replaces the cached poem with the same id, or appends it.
    pub fn merge_poem(&mut self, poem: Poem) {
        match self.poems.iter_mut().find(|p| p.id == poem.id) {
            Some(existing) => *existing = poem,
            None => self.poems.push(poem),
        }
    }

    /// Appends the comment to the cached poem. Returns false if the poem is
    /// not in the cache.
    pub fn merge_comment(&mut self, poem_id: &str, comment: Comment) -> bool {
        match self.poems.iter_mut().find(|p| p.id == poem_id) {
            Some(poem) => {
                poem.comments.push(comment);
                true
            }
            None => false,
        }
    }

    /// Resolves a 1-based display number, as rendered under the active
    /// search, to the poem's id.
    pub fn poem_id_at(&self, display_number: usize) -> Option<String> {
        if display_number == 0 {
            return None;
        }
        crate::render::filter_poems(&self.poems, &self.search)
            .get(display_number - 1)
            .map(|poem| poem.id.clone())
    }

    pub fn render(&self, logged_in: bool) -> String {
        render_poems(&self.poems, &self.search, logged_in)
    }
}

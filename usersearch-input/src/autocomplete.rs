/// Matches candidates which contain a word, ignoring case.
pub struct AutoCompleter {
    word: String,
}

impl AutoCompleter {
    /// Returns a new `AutoCompleter` for the given word fragment.
    ///
    /// # Arguments
    /// * ` word ` - The text which candidates must contain. An empty word matches
    ///              every candidate.
    pub fn new<S: AsRef<str>>(word: S) -> Self {
        AutoCompleter {
            word: word.as_ref().to_lowercase(),
        }
    }

    /// Returns true if `candidate`, lowercased, contains the word.
    pub fn matches(&self, candidate: &str) -> bool {
        self.word.is_empty() || candidate.to_lowercase().contains(&self.word)
    }

    /// Returns the items of `candidates` whose key matches, in their original order.
    ///
    /// # Arguments
    /// * ` candidates ` - The items to filter.
    /// * ` key ` - Reads the text to match from an item.
    pub fn filter<T, I, F>(&self, candidates: I, key: F) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> &str,
    {
        candidates
            .into_iter()
            .filter(|item| self.matches(key(item)))
            .collect()
    }
}

/// A cursor over a list of `len` items, which wraps around at both ends.
/// Starts out pointing at nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RingCursor {
    len: usize,
    curr_state: Option<usize>,
}

impl RingCursor {
    pub fn new(len: usize) -> Self {
        RingCursor {
            len,
            curr_state: None,
        }
    }

    pub fn get(&self) -> Option<usize> {
        self.curr_state
    }

    /// Moves to the item after the current one, or to the first item if nothing is
    /// selected. Returns None only if the ring is empty.
    pub fn next_item(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let next = match self.curr_state {
            Some(i) => (i + 1) % self.len,
            None => 0,
        };
        self.curr_state = Some(next);
        self.curr_state
    }

    /// Moves to the item before the current one, or to the last item if nothing is
    /// selected. Returns None only if the ring is empty.
    pub fn prev_item(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let prev = match self.curr_state {
            Some(0) | None => self.len - 1,
            Some(i) => i - 1,
        };
        self.curr_state = Some(prev);
        self.curr_state
    }

    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.curr_state = None;
    }
}

//! Token-sequence command matcher.
//!
//! Phrases are registered either as exact commands or as prefixes. Each
//! registration carries an action value (typically an enum variant holding its
//! bound arguments); `dispatch` hands the matched action and the full cleaned
//! token sequence to the caller.

use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Cleaned words of an utterance, in order.
pub type Tokens = SmallVec<[String; 6]>;

pub fn tokenize(text: &str) -> Tokens {
    text.split_whitespace().map(str::to_owned).collect()
}

pub struct Dispatcher<A> {
    exact: FnvHashMap<Tokens, A>,
    // Scanned in registration order; the first matching prefix wins.
    starts_with: Vec<(Tokens, A)>,
    junk: Vec<String>,
}

impl<A> Default for Dispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Dispatcher<A> {
    pub fn new() -> Self {
        Self::with_junk(Vec::<String>::new())
    }

    /// Dispatcher that strips the given filler phrases before matching.
    pub fn with_junk<I, S>(junk: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exact: FnvHashMap::default(),
            starts_with: Vec::new(),
            junk: junk
                .into_iter()
                .map(Into::into)
                .filter(|j: &String| !j.is_empty())
                .collect(),
        }
    }

    /// Match `phrase` exactly. Re-registering a phrase replaces its action.
    pub fn register(&mut self, phrase: &str, action: A) {
        self.exact.insert(tokenize(phrase), action);
    }

    /// Match any command whose leading words are `phrase`.
    pub fn register_starts_with(&mut self, phrase: &str, action: A) {
        self.starts_with.push((tokenize(phrase), action));
    }

    /// Strip junk phrases and split into words.
    ///
    /// Junk is removed from the raw text, not from whole words, so a junk
    /// phrase embedded in a longer word is cut out of that word as well
    /// ("to" turns "tomato" into "ma").
    pub fn clean(&self, raw: &str) -> Tokens {
        let mut text = raw.to_owned();
        for junk in &self.junk {
            text = text.replace(junk.as_str(), "");
        }
        tokenize(&text)
    }

    /// Find the action for a raw utterance without running it.
    pub fn resolve(&self, raw: Option<&str>) -> Option<(&A, Tokens)> {
        let raw = raw?;
        let cleaned = self.clean(raw);
        log::debug!("Cleaned: {:?}", cleaned.as_slice());
        if let Some(action) = self.exact.get(&cleaned) {
            return Some((action, cleaned));
        }
        let action = self
            .starts_with
            .iter()
            .find(|(prefix, _)| cleaned.starts_with(prefix.as_slice()))
            .map(|(_, action)| action)?;
        Some((action, cleaned))
    }

    /// Run `handler` with the matched action and the cleaned tokens.
    /// Returns whether anything matched.
    pub fn dispatch<F>(&self, raw: Option<&str>, handler: F) -> bool
    where
        F: FnOnce(&A, &[String]),
    {
        match self.resolve(raw) {
            Some((action, tokens)) => {
                handler(action, &tokens);
                true
            }
            None => {
                if let Some(raw) = raw {
                    log::debug!("No command matched: {raw:?}");
                }
                false
            }
        }
    }
}

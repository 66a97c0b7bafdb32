use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::category::Category;
use super::corpus::{ContentError, Corpus};

/// Anything that can hand the session its next snippet
pub trait SnippetSource {
    /// Returns the next snippet to type. Never empty.
    fn next_snippet(&mut self) -> String;
}

/// Draws snippets from a [`Corpus`], pairing each abbreviation's short form
/// with its full form on the next abbreviation draw.
#[derive(Debug, Clone)]
pub struct ContentProvider<R: Rng = StdRng> {
    corpus: Corpus,
    categories: Vec<Category>,
    /// Index of the abbreviation whose short form was the last abbreviation
    /// drawn and whose full form is still owed.
    pending_full: Option<usize>,
    rng: R,
}

impl ContentProvider<StdRng> {
    pub fn new(corpus: Corpus, categories: &[Category]) -> Result<Self, ContentError> {
        Self::with_rng(corpus, categories, StdRng::from_entropy())
    }

    pub fn seeded(corpus: Corpus, categories: &[Category], seed: u64) -> Result<Self, ContentError> {
        Self::with_rng(corpus, categories, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ContentProvider<R> {
    pub fn with_rng(corpus: Corpus, categories: &[Category], rng: R) -> Result<Self, ContentError> {
        let mut enabled: Vec<Category> = Vec::with_capacity(categories.len());
        for &category in categories {
            if !enabled.contains(&category) {
                enabled.push(category);
            }
        }
        corpus.validate(&enabled)?;

        Ok(Self {
            corpus,
            categories: enabled,
            pending_full: None,
            rng,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The full form that the next abbreviation draw will return, if any
    pub fn pending_full_form(&self) -> Option<&str> {
        self.pending_full
            .map(|idx| self.corpus.abbreviations[idx].full.as_str())
    }

    /// Draws from a specific category, applying the pairing rule
    pub fn draw(&mut self, category: Category) -> String {
        match category {
            Category::Term => {
                self.pending_full = None;
                let idx = self.rng.gen_range(0..self.corpus.terms.len());
                self.corpus.terms[idx].clone()
            }
            Category::Code => {
                self.pending_full = None;
                let idx = self.rng.gen_range(0..self.corpus.snippets.len());
                self.corpus.snippets[idx].clone()
            }
            Category::Abbreviation => {
                if let Some(idx) = self.pending_full.take() {
                    return self.corpus.abbreviations[idx].full.clone();
                }
                let idx = self.rng.gen_range(0..self.corpus.abbreviations.len());
                self.pending_full = Some(idx);
                self.corpus.abbreviations[idx].short.clone()
            }
        }
    }
}

impl<R: Rng> SnippetSource for ContentProvider<R> {
    fn next_snippet(&mut self) -> String {
        let category = self.categories[self.rng.gen_range(0..self.categories.len())];
        let snippet = self.draw(category);
        log::trace!("drew {category} snippet {snippet:?}");
        snippet
    }
}

/// Replays a fixed list of snippets in order, wrapping around at the end.
/// Used to drive sessions deterministically.
///
/// # Panics
///
/// `ScriptedSource::new` panics when no non-empty snippet is given.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    snippets: Vec<String>,
    next: usize,
    draws: usize,
}

impl ScriptedSource {
    pub fn new<I, S>(snippets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let snippets: Vec<String> = snippets
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();
        assert!(!snippets.is_empty(), "ScriptedSource needs a non-empty snippet");
        Self {
            snippets,
            next: 0,
            draws: 0,
        }
    }

    /// Number of snippets handed out so far
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl SnippetSource for ScriptedSource {
    fn next_snippet(&mut self) -> String {
        let snippet = self.snippets[self.next].clone();
        self.next = (self.next + 1) % self.snippets.len();
        self.draws += 1;
        snippet
    }
}

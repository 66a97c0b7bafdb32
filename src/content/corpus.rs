use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::category::Category;

static CORPUS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/corpus");

const EMBEDDED_CORPUS: &str = "programming.json";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid corpus json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("embedded corpus {0} not found")]
    MissingEmbedded(String),
    #[error("no snippet categories enabled")]
    NoCategories,
    #[error("the {0} pool is empty")]
    EmptyPool(Category),
    #[error("the {0} pool contains an empty snippet")]
    EmptySnippet(Category),
}

/// A short form and the full form it stands for
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Abbreviation {
    pub short: String,
    pub full: String,
}

/// The three pools snippets are drawn from
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Corpus {
    pub name: String,
    pub terms: Vec<String>,
    pub abbreviations: Vec<Abbreviation>,
    pub snippets: Vec<String>,
}

impl Corpus {
    /// The corpus compiled into the binary
    pub fn embedded() -> Result<Self, ContentError> {
        let file = CORPUS_DIR
            .get_file(EMBEDDED_CORPUS)
            .ok_or_else(|| ContentError::MissingEmbedded(EMBEDDED_CORPUS.to_string()))?;
        let json = file
            .contents_utf8()
            .ok_or_else(|| ContentError::MissingEmbedded(EMBEDDED_CORPUS.to_string()))?;
        Self::from_json(json)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_json(&json)?;
        log::info!(
            "loaded corpus {} from {}: {} terms, {} abbreviations, {} snippets",
            corpus.name,
            path.display(),
            corpus.terms.len(),
            corpus.abbreviations.len(),
            corpus.snippets.len()
        );
        Ok(corpus)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks that every enabled category can always produce a non-empty snippet
    pub fn validate(&self, enabled: &[Category]) -> Result<(), ContentError> {
        if enabled.is_empty() {
            return Err(ContentError::NoCategories);
        }

        for &category in enabled {
            let empty_pool = match category {
                Category::Term => self.terms.is_empty(),
                Category::Abbreviation => self.abbreviations.is_empty(),
                Category::Code => self.snippets.is_empty(),
            };
            if empty_pool {
                return Err(ContentError::EmptyPool(category));
            }

            let has_blank = match category {
                Category::Term => self.terms.iter().any(|t| t.is_empty()),
                Category::Abbreviation => self
                    .abbreviations
                    .iter()
                    .any(|a| a.short.is_empty() || a.full.is_empty()),
                Category::Code => self.snippets.iter().any(|s| s.is_empty()),
            };
            if has_blank {
                return Err(ContentError::EmptySnippet(category));
            }
        }

        Ok(())
    }

    /// Whether `text` can be produced by this corpus
    pub fn contains(&self, text: &str) -> bool {
        self.terms.iter().any(|t| t == text)
            || self.snippets.iter().any(|s| s == text)
            || self
                .abbreviations
                .iter()
                .any(|a| a.short == text || a.full == text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn tiny_corpus() -> Corpus {
        Corpus {
            name: "tiny".to_string(),
            terms: vec!["recursion".to_string()],
            abbreviations: vec![Abbreviation {
                short: "API".to_string(),
                full: "Application Programming Interface".to_string(),
            }],
            snippets: vec!["git add .".to_string()],
        }
    }

    #[test]
    fn test_embedded_corpus_loads() {
        let corpus = Corpus::embedded().unwrap();

        assert_eq!(corpus.name, "programming");
        assert!(!corpus.terms.is_empty());
        assert!(!corpus.abbreviations.is_empty());
        assert!(!corpus.snippets.is_empty());
        assert!(corpus.validate(&Category::all()).is_ok());
    }

    #[test]
    fn test_embedded_corpus_has_api_pair() {
        let corpus = Corpus::embedded().unwrap();
        let api = corpus
            .abbreviations
            .iter()
            .find(|a| a.short == "API")
            .unwrap();
        assert_eq!(api.full, "Application Programming Interface");
    }

    #[test]
    fn test_from_json() {
        let json = r#"
        {
            "name": "test",
            "terms": ["kanban"],
            "abbreviations": [{ "short": "DNS", "full": "Domain Name System" }],
            "snippets": ["EXPOSE 3000"]
        }
        "#;

        let corpus = Corpus::from_json(json).unwrap();
        assert_eq!(corpus.name, "test");
        assert_eq!(corpus.terms, vec!["kanban"]);
        assert_eq!(corpus.abbreviations[0].full, "Domain Name System");
        assert_eq!(corpus.snippets, vec!["EXPOSE 3000"]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert_matches!(Corpus::from_json("{ not json"), Err(ContentError::Parse(_)));
    }

    #[test]
    fn test_from_path_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        fs::write(
            &path,
            r#"{"name":"file","terms":["a"],"abbreviations":[],"snippets":["b"]}"#,
        )
        .unwrap();

        let corpus = Corpus::from_path(&path).unwrap();
        assert_eq!(corpus.name, "file");
        assert!(corpus.validate(&[Category::Term, Category::Code]).is_ok());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempdir().unwrap();
        let result = Corpus::from_path(dir.path().join("nope.json"));
        assert_matches!(result, Err(ContentError::Io { .. }));
    }

    #[test]
    fn test_validate_empty_pool() {
        let mut corpus = tiny_corpus();
        corpus.abbreviations.clear();

        assert_matches!(
            corpus.validate(&Category::all()),
            Err(ContentError::EmptyPool(Category::Abbreviation))
        );
        // Disabled categories are not checked
        assert!(corpus.validate(&[Category::Term, Category::Code]).is_ok());
    }

    #[test]
    fn test_validate_empty_snippet() {
        let mut corpus = tiny_corpus();
        corpus.snippets.push(String::new());

        assert_matches!(
            corpus.validate(&[Category::Code]),
            Err(ContentError::EmptySnippet(Category::Code))
        );
    }

    #[test]
    fn test_validate_no_categories() {
        assert_matches!(tiny_corpus().validate(&[]), Err(ContentError::NoCategories));
    }

    #[test]
    fn test_contains() {
        let corpus = tiny_corpus();
        assert!(corpus.contains("API"));
        assert!(corpus.contains("Application Programming Interface"));
        assert!(corpus.contains("git add ."));
        assert!(!corpus.contains("monad"));
    }
}

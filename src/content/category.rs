use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of snippet the provider can draw
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Term,
    Abbreviation,
    Code,
}

impl Category {
    pub fn all() -> [Category; 3] {
        [Category::Term, Category::Abbreviation, Category::Code]
    }
}

//! Category filter for product teasers.

use serde::{Deserialize, Serialize};

/// Class marking the selected filter button.
pub const ACTIVE_CLASS: &str = "on";
/// Class marking the other filter buttons.
pub const PASSIVE_CLASS: &str = "passive";
/// Class hiding a product teaser.
pub const HIDDEN_CLASS: &str = "hidden";

/// Which teasers a filter button shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every teaser.
    #[default]
    All,
    /// Teasers carrying this class, e.g. `rings`.
    Category(String),
}

impl CategoryFilter {
    /// Build from a button's `data-target`; `all` or nothing means all.
    pub fn from_target(target: Option<&str>) -> Self {
        match target.map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(class) => CategoryFilter::Category(class.to_string()),
        }
    }

    /// The `data-target` value for this filter.
    pub fn target(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(class) => class,
        }
    }

    /// CSS selector for the elements a category reveals; `None` for all.
    ///
    /// The selector is not restricted to teasers: every element carrying
    /// the class is revealed.
    pub fn selector(&self) -> Option<String> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(class) => Some(format!(".{}", class)),
        }
    }
}

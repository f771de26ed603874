use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::LocatorError;

/// Logical page number as cited in the content and stored in bookmarks.
pub type Page = NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentId {
    Pmbok,
    Prince2,
    Iso21500,
    Iso21502,
}

impl DocumentId {
    pub const ALL: [DocumentId; 4] = [
        DocumentId::Pmbok,
        DocumentId::Prince2,
        DocumentId::Iso21500,
        DocumentId::Iso21502,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentId::Pmbok => "pmbok",
            DocumentId::Prince2 => "prince2",
            DocumentId::Iso21500 => "iso21500",
            DocumentId::Iso21502 => "iso21502",
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentId {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LocatorError::NotFound(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub standard: DocumentId,
    pub page: Page,
}

impl Citation {
    pub fn new(standard: DocumentId, page: u32) -> Option<Self> {
        Some(Citation {
            standard,
            page: Page::new(page)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub page: Page,
    #[serde(default)]
    pub note: String,
    pub timestamp: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(page: Page, note: &str) -> Self {
        Bookmark {
            page,
            note: note.to_string(),
            timestamp: Utc::now(),
        }
    }
}

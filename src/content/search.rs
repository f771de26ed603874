use super::ContentItem;

/// Repository filter chip: every document, or exactly one document id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Standard(String),
}

impl Filter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some("all") => Filter::All,
            Some(other) => Filter::Standard(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Standard(s) => s,
        }
    }

    fn matches(&self, item: &ContentItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Standard(s) => item.standard.as_str() == s,
        }
    }
}

#[derive(Debug)]
pub enum Listing<'a> {
    Items(Vec<&'a ContentItem>),
    NoResults,
}

impl<'a> Listing<'a> {
    pub fn items(&self) -> &[&'a ContentItem] {
        match self {
            Listing::Items(items) => items.as_slice(),
            Listing::NoResults => &[],
        }
    }
}

fn matches_term(item: &ContentItem, term: &str) -> bool {
    item.title.to_lowercase().contains(term)
        || item.content.to_lowercase().contains(term)
        || item.keywords.iter().any(|k| k.to_lowercase().contains(term))
}

/// Filters the repository, preserving input order. An empty `term` matches everything.
pub fn search_repository<'a>(items: &'a [ContentItem], term: &str, filter: &Filter) -> Listing<'a> {
    let term = term.to_lowercase();

    let found: Vec<&ContentItem> = items
        .iter()
        .filter(|item| filter.matches(item))
        .filter(|item| term.is_empty() || matches_term(item, &term))
        .collect();

    if found.is_empty() {
        Listing::NoResults
    } else {
        Listing::Items(found)
    }
}

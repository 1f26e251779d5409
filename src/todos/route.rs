//! Filter routes.
//!
//! The active filter is driven by a navigation fragment (`#/`, `#/active`,
//! `#/completed`). Anything unrecognized falls back to showing everything.

use crate::todo::TodoQuery;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    All,
    Active,
    Completed,
}

impl Route {
    /// Parses a navigation fragment such as `#/active`.
    ///
    /// Only the segment after the leading `#/` is considered; `""`, `"#/"` and
    /// unknown segments all map to [`Route::All`].
    pub fn from_fragment(fragment: &str) -> Self {
        let segment = fragment.strip_prefix("#/").unwrap_or("");
        let segment = segment.split('/').next().unwrap_or("");
        match segment {
            "active" => Route::Active,
            "completed" => Route::Completed,
            _ => Route::All,
        }
    }

    /// The page name used for filter highlighting (`""` for all).
    pub fn page_name(self) -> &'static str {
        match self {
            Route::All => "",
            Route::Active => "active",
            Route::Completed => "completed",
        }
    }

    pub fn fragment(self) -> String {
        format!("#/{}", self.page_name())
    }

    /// The store query implied by the route, `None` meaning every record.
    pub fn query(self) -> Option<TodoQuery> {
        match self {
            Route::All => None,
            Route::Active => Some(TodoQuery::completed(false)),
            Route::Completed => Some(TodoQuery::completed(true)),
        }
    }

    pub fn all() -> &'static [Route] {
        &[Route::All, Route::Active, Route::Completed]
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::All => "All",
            Route::Active => "Active",
            Route::Completed => "Completed",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fragment().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_root_fragments_are_all() {
        assert_eq!(Route::from_fragment(""), Route::All);
        assert_eq!(Route::from_fragment("#/"), Route::All);
    }

    #[test]
    fn known_fragments() {
        assert_eq!(Route::from_fragment("#/active"), Route::Active);
        assert_eq!(Route::from_fragment("#/completed"), Route::Completed);
    }

    #[test]
    fn unknown_fragments_fall_back_to_all() {
        assert_eq!(Route::from_fragment("#/archived"), Route::All);
        assert_eq!(Route::from_fragment("active"), Route::All);
        assert_eq!(Route::from_fragment("#active"), Route::All);
    }

    #[test]
    fn trailing_segments_are_ignored() {
        assert_eq!(Route::from_fragment("#/active/extra"), Route::Active);
    }

    #[test]
    fn queries_per_route() {
        assert_eq!(Route::All.query(), None);
        assert_eq!(Route::Active.query(), Some(TodoQuery::completed(false)));
        assert_eq!(Route::Completed.query(), Some(TodoQuery::completed(true)));
    }

    #[test]
    fn fragment_round_trips() {
        for route in Route::all() {
            assert_eq!(Route::from_fragment(&route.fragment()), *route);
        }
    }
}

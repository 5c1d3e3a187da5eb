use std::fmt::{Display, Error, Formatter};

use crate::engine::substring::SubstringEngine;
use crate::engine::util::contains_upper;
use crate::{CaseMatching, CommandItem, MatchEngine, MatchResult};

//------------------------------------------------------------------------------
// Exact-first engine: a ranking variant of the substring match

/// Substring matching with exact-match-first ordering.
///
/// Items whose label equals the query rank first, label-prefix matches
/// second, everything else that merely contains the query third. Within a
/// tier the pool order is preserved (the controller sorts stably).
pub struct ExactFirstEngine {
    query: String,
    case_sensitive: bool,
    inner: SubstringEngine,
}

impl ExactFirstEngine {
    /// Builds an engine for one query
    pub fn new(query: &str, case: CaseMatching) -> Self {
        let query = query.trim();
        let case_sensitive = match case {
            CaseMatching::Respect => true,
            CaseMatching::Ignore => false,
            CaseMatching::Smart => contains_upper(query),
        };
        Self {
            query: query.to_string(),
            case_sensitive,
            inner: SubstringEngine::new(query, case),
        }
    }
}

impl MatchEngine for ExactFirstEngine {
    fn match_item(&self, item: &CommandItem) -> Option<MatchResult> {
        let mut result = self.inner.match_item(item)?;
        if self.query.is_empty() {
            return Some(result);
        }

        let (label, query) = if self.case_sensitive {
            (item.label.clone(), self.query.clone())
        } else {
            (item.label.to_lowercase(), self.query.to_lowercase())
        };

        result.rank = if label == query {
            0
        } else if label.starts_with(&query) {
            1
        } else {
            2
        };
        Some(result)
    }
}

impl Display for ExactFirstEngine {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "(ExactFirst|{})", self.query)
    }
}

/// Factory for [`ExactFirstEngine`]
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactFirstEngineFactory;

impl crate::MatchEngineFactory for ExactFirstEngineFactory {
    fn create_engine_with_case(&self, query: &str, case: CaseMatching) -> Box<dyn MatchEngine> {
        Box::new(ExactFirstEngine::new(query, case))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_of(engine: &ExactFirstEngine, label: &str) -> i32 {
        engine
            .match_item(&CommandItem::new(label, label))
            .map(|r| r.rank)
            .unwrap_or(i32::MAX)
    }

    #[test]
    fn ranks_exact_before_prefix_before_substring() {
        let engine = ExactFirstEngine::new("git", CaseMatching::Ignore);
        assert_eq!(rank_of(&engine, "Git"), 0);
        assert_eq!(rank_of(&engine, "Git Push"), 1);
        assert_eq!(rank_of(&engine, "Open Git Log"), 2);
        assert_eq!(rank_of(&engine, "Quit"), i32::MAX);
    }

    #[test]
    fn empty_query_keeps_flat_rank() {
        let engine = ExactFirstEngine::new("", CaseMatching::Ignore);
        assert_eq!(rank_of(&engine, "anything"), 0);
        assert_eq!(rank_of(&engine, "else"), 0);
    }

    #[test]
    fn secondary_field_matches_rank_last() {
        let engine = ExactFirstEngine::new("yank", CaseMatching::Ignore);
        let item = CommandItem::new("copy", "Copy").keywords(["yank"]);
        assert_eq!(engine.match_item(&item).unwrap().rank, 2);
    }
}

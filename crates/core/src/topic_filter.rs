//! Course ownership of topics.
//!
//! Topics carry no course reference. Ownership is decided by an explicit rule
//! table evaluated in precedence order: exact matches first, prefixes next,
//! and the remainder rule last. The first matching rule wins, which keeps the
//! partition exclusive; the trailing remainder rule keeps it exhaustive.

use crate::model::{Topic, TopicId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicMatch {
    Exact(&'static str),
    Prefix(&'static str),
    Remainder,
}

impl TopicMatch {
    fn matches(self, topic_id: &str) -> bool {
        match self {
            TopicMatch::Exact(id) => topic_id == id,
            TopicMatch::Prefix(prefix) => topic_id.starts_with(prefix),
            TopicMatch::Remainder => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicRule {
    pub course: &'static str,
    pub matcher: TopicMatch,
}

/// One rule per course, in evaluation order.
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        course: "typescript",
        matcher: TopicMatch::Exact("topic-typescript"),
    },
    TopicRule {
        course: "go",
        matcher: TopicMatch::Prefix("topic-go"),
    },
    TopicRule {
        course: "javascript",
        matcher: TopicMatch::Remainder,
    },
];

/// Course slug owning a topic id, by rule precedence.
#[must_use]
pub fn owning_course(topic_id: &TopicId) -> Option<&'static str> {
    TOPIC_RULES
        .iter()
        .find(|rule| rule.matcher.matches(topic_id.as_str()))
        .map(|rule| rule.course)
}

/// Membership predicate for one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicFilter {
    course: Option<&'static str>,
}

impl TopicFilter {
    /// The filter that matches nothing, used for unknown course slugs.
    #[must_use]
    pub fn none() -> Self {
        Self { course: None }
    }

    #[must_use]
    pub fn course(&self) -> Option<&'static str> {
        self.course
    }

    #[must_use]
    pub fn matches(&self, topic_id: &TopicId) -> bool {
        match self.course {
            Some(course) => owning_course(topic_id) == Some(course),
            None => false,
        }
    }

    /// Topics owned by this filter's course, in input order.
    #[must_use]
    pub fn select<'a>(&self, topics: &'a [Topic]) -> Vec<&'a Topic> {
        topics.iter().filter(|t| self.matches(t.id())).collect()
    }
}

/// Build the topic predicate for a course slug. Unknown slugs match nothing.
#[must_use]
pub fn filter_for_course(course_slug: &str) -> TopicFilter {
    TOPIC_RULES
        .iter()
        .find(|rule| rule.course == course_slug)
        .map_or_else(TopicFilter::none, |rule| TopicFilter {
            course: Some(rule.course),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn id(raw: &str) -> TopicId {
        TopicId::new(raw)
    }

    #[test]
    fn typescript_is_exact_only() {
        let ts = filter_for_course("typescript");
        assert!(ts.matches(&id("topic-typescript")));
        assert!(!ts.matches(&id("topic-typescript-generics")));
        assert_eq!(owning_course(&id("topic-typescript-generics")), Some("javascript"));
    }

    #[test]
    fn go_claims_prefix() {
        let go = filter_for_course("go");
        assert!(go.matches(&id("topic-go")));
        assert!(go.matches(&id("topic-go-concurrency")));
        assert!(!filter_for_course("javascript").matches(&id("topic-go-basics")));
    }

    #[test]
    fn everything_else_is_javascript() {
        assert_eq!(owning_course(&id("topic-closures")), Some("javascript"));
        assert_eq!(owning_course(&id("anything")), Some("javascript"));
    }

    #[test]
    fn unknown_course_matches_nothing() {
        let catalog = Catalog::builtin().unwrap();
        let filter = filter_for_course("rust");
        assert_eq!(filter.course(), None);
        assert!(filter.select(catalog.topics()).is_empty());
        assert!(!filter.matches(&id("topic-typescript")));
    }

    #[test]
    fn every_topic_matches_exactly_one_course() {
        let catalog = Catalog::builtin().unwrap();
        let ids = catalog
            .topics()
            .iter()
            .map(|t| t.id().clone())
            .chain(["topic-go", "topic-typescript", "topic-x", ""].map(TopicId::new));
        for topic in ids {
            let owners = catalog
                .courses()
                .iter()
                .filter(|c| filter_for_course(c.slug().as_str()).matches(&topic))
                .count();
            assert_eq!(owners, 1, "{topic:?} must belong to exactly one course");
        }
    }

    #[test]
    fn rule_table_ends_with_remainder() {
        let last = TOPIC_RULES.last().unwrap();
        assert_eq!(last.matcher, TopicMatch::Remainder);
        let remainders = TOPIC_RULES
            .iter()
            .filter(|r| r.matcher == TopicMatch::Remainder)
            .count();
        assert_eq!(remainders, 1);
    }
}

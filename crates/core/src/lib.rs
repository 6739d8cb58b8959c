#![forbid(unsafe_code)]

pub mod catalog;
mod content;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod progress;
pub mod time;
pub mod topic_filter;

pub use catalog::{Catalog, CatalogError};
pub use error::{EntityKind, ResolveError};
pub use hierarchy::{LessonLocation, LessonNeighbors, parse_phase_number};
pub use time::Clock;
pub use topic_filter::{TopicFilter, filter_for_course, owning_course};

//! Routable paths.
//!
//! Parsing only checks the shape of a path. Whether the named entities exist
//! is decided by the presenter.

use std::fmt;

use course_core::parse_phase_number;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Courses,
    Course { course: String },
    Topic { course: String, topic: String },
    Phase { number: u32 },
    Module { phase: u32, module: String },
    Lesson { phase: u32, module: String, lesson: String },
    Dashboard,
    Login,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RouteError {
    #[error("no route for {path}")]
    NotFound { path: String },
    #[error("invalid phase segment {segment:?}")]
    InvalidInput { segment: String },
}

impl Route {
    /// Parse an absolute path. Query strings, fragments and a trailing slash
    /// are ignored.
    ///
    /// # Errors
    ///
    /// - `RouteError::InvalidInput` for a non-numeric or zero phase segment
    /// - `RouteError::NotFound` for any other unrecognised shape
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let not_found = || RouteError::NotFound {
            path: path.to_owned(),
        };
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let Some(rest) = bare.strip_prefix('/') else {
            return Err(not_found());
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let segments: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if segments.iter().any(|s| s.is_empty()) {
            return Err(not_found());
        }

        let phase = |segment: &str| {
            parse_phase_number(segment).map_err(|_| RouteError::InvalidInput {
                segment: segment.to_owned(),
            })
        };

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["courses"] => Ok(Route::Courses),
            ["courses", course] => Ok(Route::Course {
                course: (*course).to_owned(),
            }),
            ["courses", course, "topics", topic] => Ok(Route::Topic {
                course: (*course).to_owned(),
                topic: (*topic).to_owned(),
            }),
            ["phases", n] => Ok(Route::Phase { number: phase(n)? }),
            ["phases", n, module] => Ok(Route::Module {
                phase: phase(n)?,
                module: (*module).to_owned(),
            }),
            ["phases", n, module, lesson] => Ok(Route::Lesson {
                phase: phase(n)?,
                module: (*module).to_owned(),
                lesson: (*lesson).to_owned(),
            }),
            ["dashboard"] => Ok(Route::Dashboard),
            ["login"] => Ok(Route::Login),
            _ => Err(not_found()),
        }
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_owned(),
            Route::Courses => "/courses".to_owned(),
            Route::Course { course } => format!("/courses/{course}"),
            Route::Topic { course, topic } => format!("/courses/{course}/topics/{topic}"),
            Route::Phase { number } => format!("/phases/{number}"),
            Route::Module { phase, module } => format!("/phases/{phase}/{module}"),
            Route::Lesson {
                phase,
                module,
                lesson,
            } => format!("/phases/{phase}/{module}/{lesson}"),
            Route::Dashboard => "/dashboard".to_owned(),
            Route::Login => "/login".to_owned(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_shape() {
        let cases = [
            ("/", Route::Home),
            ("/courses", Route::Courses),
            ("/courses/go", Route::Course { course: "go".into() }),
            (
                "/courses/go/topics/go-basics",
                Route::Topic {
                    course: "go".into(),
                    topic: "go-basics".into(),
                },
            ),
            ("/phases/2", Route::Phase { number: 2 }),
            (
                "/phases/1/web-basics",
                Route::Module {
                    phase: 1,
                    module: "web-basics".into(),
                },
            ),
            (
                "/phases/1/web-basics/html-structure",
                Route::Lesson {
                    phase: 1,
                    module: "web-basics".into(),
                    lesson: "html-structure".into(),
                },
            ),
            ("/dashboard", Route::Dashboard),
            ("/login", Route::Login),
        ];
        for (path, route) in cases {
            assert_eq!(Route::parse(path).unwrap(), route, "{path}");
            assert_eq!(route.path(), path);
        }
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(
            Route::parse("/phases/3/?tab=lessons").unwrap(),
            Route::Phase { number: 3 }
        );
        assert_eq!(Route::parse("/courses/#top").unwrap(), Route::Courses);
    }

    #[test]
    fn bad_phase_segment_is_invalid_input_not_not_found() {
        for path in ["/phases/abc", "/phases/0/x", "/phases/-1/x/y", "/phases/1.5"] {
            assert!(
                matches!(Route::parse(path), Err(RouteError::InvalidInput { .. })),
                "{path}"
            );
        }
    }

    #[test]
    fn unknown_shapes_are_not_found() {
        for path in ["", "courses", "/nope", "/courses/go/topics", "/phases//x", "/a/b/c/d/e"] {
            assert!(
                matches!(Route::parse(path), Err(RouteError::NotFound { .. })),
                "{path:?}"
            );
        }
    }
}

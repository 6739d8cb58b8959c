use course_core::model::{Course, Topic};

use crate::routes::Route;

/// UI-ready course card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseCardVm {
    pub slug: String,
    pub title: String,
    pub path: String,
    pub topic_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseListVm {
    pub courses: Vec<CourseCardVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicItemVm {
    pub slug: String,
    pub title: String,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseTopicsVm {
    pub course: CourseCardVm,
    pub topics: Vec<TopicItemVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicVm {
    pub course_slug: String,
    pub course_title: String,
    pub slug: String,
    pub title: String,
    pub back_path: String,
}

#[must_use]
pub fn map_course_card(course: &Course, topic_count: usize) -> CourseCardVm {
    CourseCardVm {
        slug: course.slug().to_string(),
        title: course.title().to_owned(),
        path: Route::Course {
            course: course.slug().to_string(),
        }
        .path(),
        topic_count,
    }
}

#[must_use]
pub fn map_course_topics(course: &Course, topics: &[Topic]) -> CourseTopicsVm {
    let items = topics
        .iter()
        .map(|topic| TopicItemVm {
            slug: topic.slug().to_string(),
            title: topic.title().to_owned(),
            path: Route::Topic {
                course: course.slug().to_string(),
                topic: topic.slug().to_string(),
            }
            .path(),
        })
        .collect();
    CourseTopicsVm {
        course: map_course_card(course, topics.len()),
        topics: items,
    }
}

#[must_use]
pub fn map_topic(course: &Course, topic: &Topic) -> TopicVm {
    TopicVm {
        course_slug: course.slug().to_string(),
        course_title: course.title().to_owned(),
        slug: topic.slug().to_string(),
        title: topic.title().to_owned(),
        back_path: Route::Course {
            course: course.slug().to_string(),
        }
        .path(),
    }
}

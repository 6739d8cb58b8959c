//! Bundled curriculum tables.

use crate::catalog::{Catalog, CatalogError};
use crate::model::{
    Course, CourseId, EntityError, Lesson, LessonDraft, Module, ModuleId, Phase, PhaseId, Project,
    ProjectDraft, Topic, TopicId,
};

struct LessonRow {
    id: &'static str,
    module: &'static str,
    slug: &'static str,
    title_th: &'static str,
    title_en: &'static str,
    order: u32,
    minutes: u32,
    video: Option<&'static str>,
    body: &'static str,
}

const PHASES: &[(&str, u32, &str)] = &[
    ("phase-foundations", 1, "Web Foundations"),
    ("phase-frontend", 2, "Frontend Engineering"),
    ("phase-backend", 3, "Backend Services"),
];

const MODULES: &[(&str, &str, &str, &str, u32)] = &[
    ("module-web-basics", "phase-foundations", "web-basics", "How the Web Works", 1),
    ("module-js-basics", "phase-foundations", "javascript-basics", "JavaScript Basics", 2),
    ("module-react", "phase-frontend", "react-fundamentals", "React Fundamentals", 1),
    ("module-ts", "phase-frontend", "typescript-essentials", "TypeScript Essentials", 2),
    ("module-node", "phase-backend", "node-apis", "Building APIs with Node", 1),
    ("module-go", "phase-backend", "go-services", "Services in Go", 2),
];

const LESSONS: &[LessonRow] = &[
    LessonRow {
        id: "lesson-how-the-web-works",
        module: "module-web-basics",
        slug: "how-the-web-works",
        title_th: "เว็บทำงานอย่างไร",
        title_en: "How the web works",
        order: 1,
        minutes: 12,
        video: Some("https://videos.example.com/web-basics/how-the-web-works.mp4"),
        body: "# How the web works\n\nA browser sends an **HTTP request**; a server answers with a response.",
    },
    LessonRow {
        id: "lesson-html-structure",
        module: "module-web-basics",
        slug: "html-structure",
        title_th: "โครงสร้าง HTML",
        title_en: "HTML structure",
        order: 2,
        minutes: 18,
        video: None,
        body: "# HTML structure\n\nEvery page starts with `<!doctype html>`.\n\n- head\n- body",
    },
    LessonRow {
        id: "lesson-css-box-model",
        module: "module-web-basics",
        slug: "css-box-model",
        title_th: "CSS Box Model",
        title_en: "The CSS box model",
        order: 3,
        minutes: 15,
        video: Some("https://videos.example.com/web-basics/css-box-model.mp4"),
        body: "# The box model\n\nContent, padding, border, margin.",
    },
    LessonRow {
        id: "lesson-variables",
        module: "module-js-basics",
        slug: "variables-and-types",
        title_th: "ตัวแปรและชนิดข้อมูล",
        title_en: "Variables and types",
        order: 1,
        minutes: 20,
        video: None,
        body: "# Variables\n\nPrefer `const`, use `let` when reassigning.",
    },
    LessonRow {
        id: "lesson-control-flow",
        module: "module-js-basics",
        slug: "control-flow",
        title_th: "การควบคุมลำดับการทำงาน",
        title_en: "Control flow",
        order: 2,
        minutes: 20,
        video: None,
        body: "# Control flow\n\n`if`, `switch`, `for` and `while`.",
    },
    LessonRow {
        id: "lesson-functions",
        module: "module-js-basics",
        slug: "functions",
        title_th: "ฟังก์ชัน",
        title_en: "Functions",
        order: 3,
        minutes: 25,
        video: Some("https://videos.example.com/js-basics/functions.mp4"),
        body: "# Functions\n\n```js\nconst add = (a, b) => a + b;\n```",
    },
    LessonRow {
        id: "lesson-components",
        module: "module-react",
        slug: "components",
        title_th: "คอมโพเนนต์",
        title_en: "Components",
        order: 1,
        minutes: 22,
        video: Some("https://videos.example.com/react/components.mp4"),
        body: "# Components\n\nA component is a function that returns markup.",
    },
    LessonRow {
        id: "lesson-state-and-props",
        module: "module-react",
        slug: "state-and-props",
        title_th: "State และ Props",
        title_en: "State and props",
        order: 2,
        minutes: 28,
        video: None,
        body: "# State and props\n\nProps flow down; state lives where it changes.",
    },
    LessonRow {
        id: "lesson-ts-types",
        module: "module-ts",
        slug: "typescript-types",
        title_th: "พื้นฐานชนิดข้อมูลใน TypeScript",
        title_en: "TypeScript types",
        order: 1,
        minutes: 18,
        video: None,
        body: "# Types\n\n`string`, `number`, unions and interfaces.",
    },
    LessonRow {
        id: "lesson-ts-generics",
        module: "module-ts",
        slug: "typescript-generics",
        title_th: "Generics",
        title_en: "Generics",
        order: 2,
        minutes: 24,
        video: None,
        body: "# Generics\n\n```ts\nfunction first<T>(xs: T[]): T | undefined { return xs[0]; }\n```",
    },
    LessonRow {
        id: "lesson-http-servers",
        module: "module-node",
        slug: "http-servers",
        title_th: "สร้าง HTTP Server",
        title_en: "HTTP servers",
        order: 1,
        minutes: 30,
        video: Some("https://videos.example.com/node/http-servers.mp4"),
        body: "# HTTP servers\n\nListen, route, respond.",
    },
    LessonRow {
        id: "lesson-rest-design",
        module: "module-node",
        slug: "rest-design",
        title_th: "การออกแบบ REST API",
        title_en: "REST design",
        order: 2,
        minutes: 26,
        video: None,
        body: "# REST design\n\nResources, verbs and status codes.",
    },
    LessonRow {
        id: "lesson-go-syntax",
        module: "module-go",
        slug: "go-syntax",
        title_th: "ไวยากรณ์ภาษา Go",
        title_en: "Go syntax",
        order: 1,
        minutes: 20,
        video: None,
        body: "# Go syntax\n\n```go\nfunc main() { fmt.Println(\"hello\") }\n```",
    },
    LessonRow {
        id: "lesson-goroutines",
        module: "module-go",
        slug: "goroutines",
        title_th: "Goroutine และ Channel",
        title_en: "Goroutines and channels",
        order: 2,
        minutes: 32,
        video: Some("https://videos.example.com/go/goroutines.mp4"),
        body: "# Goroutines\n\nStart with `go f()`; communicate over channels.",
    },
];

const PROJECTS: &[(&str, &str, &str, &str, &str, &str)] = &[
    (
        "project-portfolio",
        "module-web-basics",
        "portfolio-site",
        "Personal portfolio",
        "Napat K.",
        "A static portfolio page built with semantic HTML and CSS.",
    ),
    (
        "project-todo",
        "module-react",
        "todo-app",
        "Todo app",
        "Suda P.",
        "A React todo list with filters and local state.",
    ),
    (
        "project-shortener",
        "module-go",
        "url-shortener",
        "URL shortener",
        "Krit T.",
        "A small Go service that shortens links.",
    ),
];

const COURSES: &[(&str, &str, &str, u32)] = &[
    ("course-javascript", "javascript", "JavaScript", 1),
    ("course-typescript", "typescript", "TypeScript", 2),
    ("course-go", "go", "Go", 3),
];

const TOPICS: &[(&str, &str, &str, u32)] = &[
    ("topic-variables", "variables", "Variables and scope", 1),
    ("topic-closures", "closures", "Closures", 2),
    ("topic-async", "async-await", "Async and await", 3),
    ("topic-typescript", "typescript", "TypeScript in practice", 4),
    ("topic-go-basics", "go-basics", "Go basics", 5),
    ("topic-go-concurrency", "go-concurrency", "Concurrency in Go", 6),
];

fn lesson(row: &LessonRow) -> Result<Lesson, EntityError> {
    LessonDraft {
        id: row.id.into(),
        module_id: row.module.into(),
        slug: row.slug.into(),
        title_th: row.title_th.into(),
        title_en: Some(row.title_en.into()),
        order: row.order,
        body: row.body.into(),
        duration_minutes: row.minutes,
        video_url: row.video.map(Into::into),
    }
    .validate()
}

fn project(row: &(&str, &str, &str, &str, &str, &str)) -> Result<Project, EntityError> {
    let (id, module, slug, title, author, summary) = *row;
    ProjectDraft {
        id: id.into(),
        module_id: module.into(),
        slug: slug.into(),
        title: title.into(),
        author: author.into(),
        summary: Some(summary.into()),
        repo_url: None,
    }
    .validate()
}

pub(crate) fn builtin_catalog() -> Result<Catalog, CatalogError> {
    let phases = PHASES
        .iter()
        .map(|&(id, number, title)| Phase::new(PhaseId::new(id), number, title, number))
        .collect::<Result<Vec<_>, _>>()?;
    let modules = MODULES
        .iter()
        .map(|&(id, phase, slug, title, order)| {
            Module::new(ModuleId::new(id), PhaseId::new(phase), slug, title, order)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let lessons = LESSONS.iter().map(lesson).collect::<Result<Vec<_>, _>>()?;
    let projects = PROJECTS.iter().map(project).collect::<Result<Vec<_>, _>>()?;
    let courses = COURSES
        .iter()
        .map(|&(id, slug, title, order)| Course::new(CourseId::new(id), slug, title, order))
        .collect::<Result<Vec<_>, _>>()?;
    let topics = TOPICS
        .iter()
        .map(|&(id, slug, title, order)| Topic::new(TopicId::new(id), slug, title, order))
        .collect::<Result<Vec<_>, _>>()?;

    Catalog::new(phases, modules, lessons, projects, courses, topics)
}

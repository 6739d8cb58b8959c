//! Plain-text rendering of pages for terminal output.

use std::fmt::Write;

use crate::vm::{Page, PhaseCardVm};

fn check(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

fn phase_lines(out: &mut String, phases: &[PhaseCardVm]) {
    for phase in phases {
        let _ = writeln!(
            out,
            "  Phase {} {} ({} modules, {}%)  {}",
            phase.number, phase.title, phase.module_count, phase.percent, phase.path
        );
    }
}

/// Render a page as text. The lesson body is emitted as sanitized HTML.
#[must_use]
pub fn render_page(page: &Page) -> String {
    let mut out = String::new();
    match page {
        Page::Home(vm) => {
            out.push_str("Phases\n");
            phase_lines(&mut out, &vm.phases);
            out.push_str("Courses\n");
            for course in &vm.courses {
                let _ = writeln!(out, "  {}  {}", course.title, course.path);
            }
        }
        Page::Courses(vm) => {
            for course in &vm.courses {
                let _ = writeln!(
                    out,
                    "{} ({} topics)  {}",
                    course.title, course.topic_count, course.path
                );
            }
        }
        Page::Course(vm) => {
            let _ = writeln!(out, "{}", vm.course.title);
            for topic in &vm.topics {
                let _ = writeln!(out, "  {}  {}", topic.title, topic.path);
            }
        }
        Page::Topic(vm) => {
            let _ = writeln!(out, "{} / {}", vm.course_title, vm.title);
            let _ = writeln!(out, "back: {}", vm.back_path);
        }
        Page::Phase(vm) => {
            let _ = writeln!(out, "Phase {}: {} ({}%)", vm.number, vm.title, vm.percent);
            for module in &vm.modules {
                let _ = writeln!(
                    out,
                    "  {}. {} ({} lessons, {}%)  {}",
                    module.number, module.title, module.lesson_count, module.percent, module.path
                );
            }
        }
        Page::Module(vm) => {
            let _ = writeln!(
                out,
                "Phase {} {} / {} ({}%)",
                vm.phase_number, vm.phase_title, vm.title, vm.percent
            );
            for lesson in &vm.lessons {
                let video = if lesson.has_video { " [video]" } else { "" };
                let _ = writeln!(
                    out,
                    "  {} {} ({}){video}  {}",
                    check(lesson.completed),
                    lesson.title,
                    lesson.duration,
                    lesson.path
                );
            }
            if !vm.projects.is_empty() {
                out.push_str("Projects\n");
                for project in &vm.projects {
                    let _ = writeln!(out, "  {} by {}", project.title, project.author);
                }
            }
        }
        Page::Lesson(vm) => {
            let _ = writeln!(out, "{} {}", check(vm.completed), vm.title);
            if let Some(subtitle) = &vm.subtitle {
                let _ = writeln!(out, "{subtitle}");
            }
            let _ = writeln!(out, "{} / {}", vm.module_title, vm.duration);
            if let Some(url) = &vm.video_url {
                let _ = writeln!(out, "video: {url}");
            }
            let _ = writeln!(out, "\n{}", vm.body_html.trim_end());
            if let Some(prev) = &vm.previous {
                let _ = writeln!(out, "previous: {}  {}", prev.title, prev.path);
            }
            if let Some(next) = &vm.next {
                let _ = writeln!(out, "next: {}  {}", next.title, next.path);
            }
        }
        Page::Dashboard(vm) => {
            let _ = writeln!(
                out,
                "{}% complete ({}/{} lessons), {} points",
                vm.overall_percent, vm.lessons_completed, vm.lessons_total, vm.points
            );
            phase_lines(&mut out, &vm.phases);
            for cert in &vm.certificates {
                let _ = writeln!(out, "certificate: {} ({})", cert.phase_title, cert.issued_on);
            }
            for recent in &vm.recent {
                let _ = writeln!(
                    out,
                    "  {} {} ({})",
                    recent.completed_at, recent.lesson_title, recent.time_spent
                );
            }
        }
        Page::Login => out.push_str("Sign in with your email and password.\n"),
        Page::Redirect(to) => {
            let _ = writeln!(out, "moved to {to}");
        }
        Page::NotFound { path } => {
            let _ = writeln!(out, "not found: {path}");
        }
        Page::InvalidInput { path, message } => {
            let _ = writeln!(out, "invalid address {path}: {message}");
        }
        Page::Degraded { message } => {
            let _ = writeln!(out, "{message}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_pages_name_the_path() {
        let text = render_page(&Page::NotFound {
            path: "/phases/9".into(),
        });
        assert_eq!(text, "not found: /phases/9\n");
        let text = render_page(&Page::Redirect("/phases/1/web-basics/html-structure".into()));
        assert!(text.contains("/phases/1/web-basics/html-structure"));
    }
}

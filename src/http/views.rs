//! Inline HTML pages.
//!
//! No template engine; escaped interpolation only.

use axum::response::Html;

use crate::catalog::Course;
use crate::http::handlers::Notice;

/// Escape text for interpolation into HTML.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{}</title></head>\n<body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/catalog\">Catalog</a> | \
         <a href=\"/add_courses\">Add Course</a></nav>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

pub fn home_page() -> Html<String> {
    page(
        "Course Catalog",
        "<h1>Course Catalog</h1>\n<p>Browse the <a href=\"/catalog\">catalog</a> \
         or <a href=\"/add_courses\">add a course</a>.</p>",
    )
}

pub fn catalog_page(courses: &[Course], notice: Option<&Notice>) -> Html<String> {
    let mut body = String::new();
    if let Some(notice) = notice {
        body.push_str(&format!(
            "<p class=\"notice {}\">{}</p>\n",
            escape(notice.kind),
            escape(&notice.message)
        ));
    }
    body.push_str("<h1>Courses</h1>\n");
    if courses.is_empty() {
        body.push_str("<p>No courses yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for course in courses {
            body.push_str(&format!(
                "<li><a href=\"/course/{code}\">{code}</a>: {name}</li>\n",
                code = escape(&course.code),
                name = escape(&course.name),
            ));
        }
        body.push_str("</ul>\n");
    }
    page("Courses", &body)
}

pub fn add_course_page() -> Html<String> {
    page(
        "Add Course",
        "<h1>Add Course</h1>\n\
         <form method=\"post\" action=\"/add_courses\">\n\
         <label>Course Code <input name=\"code\"></label><br>\n\
         <label>Course Name <input name=\"name\"></label><br>\n\
         <label>Instructor <input name=\"instructor\"></label><br>\n\
         <button type=\"submit\">Add</button>\n\
         </form>",
    )
}

pub fn course_detail_page(course: &Course) -> Html<String> {
    page(
        &course.code,
        &format!(
            "<h1>{}: {}</h1>\n<p>Instructor: {}</p>",
            escape(&course.code),
            escape(&course.name),
            escape(&course.instructor)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("Dr. O'Hare & co"), "Dr. O&#39;Hare &amp; co");
    }

    #[test]
    fn catalog_page_escapes_course_fields() {
        let courses = vec![Course::new("CS<1>", "Name & Stuff", "Dr. X")];
        let Html(body) = catalog_page(&courses, None);
        assert!(body.contains("CS&lt;1&gt;"));
        assert!(body.contains("Name &amp; Stuff"));
        assert!(!body.contains("CS<1>"));
    }
}

//! Catalog route handlers.
//!
//! Thin glue over [`CatalogService`]: each handler opens a child span under
//! the request span (mirroring what the observability middleware records at
//! the request level), logs its page event, and renders or redirects.
//! Validation failures and unknown course codes are recovered locally into a
//! redirect with a notice; a corrupt backing file surfaces as a 500.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Extension, Form, Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use opentelemetry::trace::{Span, Status};
use opentelemetry::{Array, KeyValue, StringValue, Value};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::catalog::SubmitError;
use crate::http::middleware::RequestTrace;
use crate::http::server::AppState;
use crate::http::views;
use crate::observability::metrics;

/// Banner shown on the catalog page after a redirect.
pub struct Notice {
    pub message: String,
    pub kind: &'static str,
}

#[derive(Deserialize)]
pub struct NoticeParams {
    notice: Option<String>,
    kind: Option<String>,
}

impl NoticeParams {
    fn into_notice(self) -> Option<Notice> {
        let message = self.notice?;
        let kind = match self.kind.as_deref() {
            Some("success") => "success",
            _ => "error",
        };
        Some(Notice { message, kind })
    }
}

/// Redirect to the catalog page carrying a notice banner.
fn redirect_to_catalog(message: &str, kind: &str) -> Redirect {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("notice", message)
        .append_pair("kind", kind)
        .finish();
    Redirect::to(&format!("/catalog?{query}"))
}

/// Submitted form fields. Absent fields deserialize to empty strings so the
/// service reports them as missing rather than the extractor rejecting.
#[derive(Deserialize)]
pub struct CourseForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub instructor: String,
}

/// GET /
pub async fn home(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    method: Method,
) -> Response {
    let mut span = state.telemetry.handler_span("render home page", &trace.0);
    span.set_attribute(KeyValue::new("http.method", method.to_string()));
    span.set_attribute(KeyValue::new("user.ip", client.ip().to_string()));
    span.set_attribute(KeyValue::new("route", "/"));
    tracing::info!(route = "/", method = %method, user_ip = %client.ip(), "Rendered the home page");
    span.end();

    views::home_page().into_response()
}

/// GET /catalog
pub async fn course_catalog(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    method: Method,
    Query(params): Query<NoticeParams>,
) -> Response {
    let mut span = state
        .telemetry
        .handler_span("render course catalog", &trace.0);
    span.set_attribute(KeyValue::new("http.method", method.to_string()));
    span.set_attribute(KeyValue::new("user.ip", client.ip().to_string()));
    span.set_attribute(KeyValue::new("route", "/catalog"));

    let courses = match state.catalog.list_all() {
        Ok(courses) => courses,
        Err(e) => {
            span.set_attribute(KeyValue::new("error", true));
            span.set_status(Status::error(e.to_string()));
            span.end();
            tracing::error!(error = %e, route = "/catalog", "Failed to load the course catalog");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Course catalog is unavailable")
                .into_response();
        }
    };

    span.set_attribute(KeyValue::new("course.count", courses.len() as i64));
    let names: Vec<StringValue> = courses
        .iter()
        .map(|c| StringValue::from(c.name.clone()))
        .collect();
    span.set_attribute(KeyValue::new(
        "course.names",
        Value::Array(Array::String(names)),
    ));
    tracing::info!(
        route = "/catalog",
        method = %method,
        user_ip = %client.ip(),
        course_count = courses.len(),
        "Rendered the course catalog"
    );
    span.end();

    views::catalog_page(&courses, params.into_notice().as_ref()).into_response()
}

/// GET /add_courses
pub async fn add_course_form(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    method: Method,
) -> Response {
    let mut span = state
        .telemetry
        .handler_span("render course submission form", &trace.0);
    span.set_attribute(KeyValue::new("http.method", method.to_string()));
    span.set_attribute(KeyValue::new("user.ip", client.ip().to_string()));
    span.set_attribute(KeyValue::new("route", "/add_courses"));
    span.end();

    views::add_course_page().into_response()
}

/// POST /add_courses
pub async fn submit_course(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    method: Method,
    Form(form): Form<CourseForm>,
) -> Response {
    let mut span = state
        .telemetry
        .handler_span("handle course submission", &trace.0);
    span.set_attribute(KeyValue::new("http.method", method.to_string()));
    span.set_attribute(KeyValue::new("user.ip", client.ip().to_string()));
    span.set_attribute(KeyValue::new("route", "/add_courses"));

    match state
        .catalog
        .submit(&form.code, &form.name, &form.instructor)
    {
        Ok(course) => {
            span.set_attribute(KeyValue::new("course.code", course.code.clone()));
            span.set_attribute(KeyValue::new("course.name", course.name.clone()));
            span.set_attribute(KeyValue::new("course.instructor", course.instructor.clone()));
            span.end();
            tracing::info!(
                course_code = %course.code,
                course_name = %course.name,
                instructor = %course.instructor,
                route = "/add_courses",
                method = %method,
                user_ip = %client.ip(),
                "Course added successfully"
            );
            redirect_to_catalog("Course added successfully!", "success").into_response()
        }
        Err(SubmitError::Validation { missing_fields }) => {
            span.set_attribute(KeyValue::new("error", true));
            span.end();
            metrics::record_missing_fields("/add_courses");
            tracing::error!(
                missing_fields = ?missing_fields,
                route = "/add_courses",
                method = %method,
                user_ip = %client.ip(),
                "Missing required fields"
            );
            redirect_to_catalog(
                &format!(
                    "Error: Missing required fields: {}",
                    missing_fields.join(", ")
                ),
                "error",
            )
            .into_response()
        }
        Err(SubmitError::Store(e)) => {
            span.set_attribute(KeyValue::new("error", true));
            span.set_status(Status::error(e.to_string()));
            span.end();
            tracing::error!(error = %e, route = "/add_courses", "Failed to persist course");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save the course").into_response()
        }
    }
}

/// GET /course/{code}
pub async fn course_details(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    method: Method,
    Path(code): Path<String>,
) -> Response {
    let mut span = state
        .telemetry
        .handler_span("render course details", &trace.0);
    span.set_attribute(KeyValue::new("http.method", method.to_string()));
    span.set_attribute(KeyValue::new("user.ip", client.ip().to_string()));
    span.set_attribute(KeyValue::new("route", format!("/course/{code}")));
    span.set_attribute(KeyValue::new("course.code", code.clone()));

    let course = match state.catalog.find_by_code(&code) {
        Ok(course) => course,
        Err(e) => {
            span.set_attribute(KeyValue::new("error", true));
            span.set_status(Status::error(e.to_string()));
            span.end();
            tracing::error!(error = %e, course_code = %code, "Failed to load the course catalog");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Course catalog is unavailable")
                .into_response();
        }
    };

    match course {
        Some(course) => {
            tracing::info!(
                course_code = %code,
                route = "/course",
                method = %method,
                user_ip = %client.ip(),
                "Rendered course details"
            );
            span.end();
            views::course_detail_page(&course).into_response()
        }
        None => {
            span.set_attribute(KeyValue::new("error", true));
            span.end();
            tracing::error!(
                course_code = %code,
                route = "/course",
                method = %method,
                user_ip = %client.ip(),
                "No course found with the requested code"
            );
            redirect_to_catalog(&format!("No course found with code '{code}'."), "error")
                .into_response()
        }
    }
}

/// GET /health
pub async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

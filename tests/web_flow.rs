//! End-to-end tests for the catalog web flow.

use axum::http::header::LOCATION;

mod common;

fn location(res: &reqwest::Response) -> String {
    res.headers()
        .get(LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn home_page_renders() {
    let app = common::spawn_app().await;
    let res = common::client().get(app.url("/")).send().await.unwrap();

    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.contains("Course Catalog"));
}

#[tokio::test]
async fn catalog_starts_empty() {
    let app = common::spawn_app().await;
    let res = common::client()
        .get(app.url("/catalog"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("No courses yet"));
}

#[tokio::test]
async fn submitting_a_course_persists_and_lists_it() {
    let app = common::spawn_app().await;
    let client = common::client();

    let res = client
        .post(app.url("/add_courses"))
        .form(&[
            ("code", "CS203"),
            ("name", "Systems"),
            ("instructor", "Dr. Y"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 303);
    let location = location(&res);
    assert!(location.starts_with("/catalog"));
    assert!(location.contains("kind=success"));

    // Listed on the catalog page.
    let body = client
        .get(app.url("/catalog"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("CS203"));
    assert!(body.contains("Systems"));

    // Served on the detail page.
    let body = client
        .get(app.url("/course/CS203"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Dr. Y"));

    // Persisted in the backing file as a JSON array.
    let raw = std::fs::read_to_string(&app.data_file).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 1);
    assert_eq!(stored[0]["code"], "CS203");
}

#[tokio::test]
async fn missing_fields_redirect_with_an_error_notice() {
    let app = common::spawn_app().await;

    let res = common::client()
        .post(app.url("/add_courses"))
        .form(&[("code", ""), ("name", "Algo"), ("instructor", "Dr. X")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 303);
    let location = location(&res);
    assert!(location.contains("kind=error"));
    assert!(location.contains("Course+Code"));

    // Nothing was persisted.
    assert!(!app.data_file.exists());
}

#[tokio::test]
async fn unknown_course_redirects_with_an_error_notice() {
    let app = common::spawn_app().await;

    let res = common::client()
        .get(app.url("/course/NOPE"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 303);
    let location = location(&res);
    assert!(location.starts_with("/catalog"));
    assert!(location.contains("kind=error"));
    assert!(location.contains("NOPE"));
}

#[tokio::test]
async fn duplicate_codes_serve_the_first_occurrence() {
    let app = common::spawn_app().await;
    let client = common::client();

    for (name, instructor) in [("Systems", "Dr. Y"), ("Systems II", "Dr. Z")] {
        let res = client
            .post(app.url("/add_courses"))
            .form(&[("code", "CS203"), ("name", name), ("instructor", instructor)])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 303);
    }

    let body = client
        .get(app.url("/course/CS203"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Dr. Y"));
    assert!(!body.contains("Dr. Z"));
}

#[tokio::test]
async fn notice_banner_is_rendered_after_redirect() {
    let app = common::spawn_app().await;
    let client = common::client();

    let res = client
        .post(app.url("/add_courses"))
        .form(&[
            ("code", "CS101"),
            ("name", "Intro"),
            ("instructor", "Dr. Z"),
        ])
        .send()
        .await
        .unwrap();
    let location = location(&res);

    let body = client
        .get(app.url(&location))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Course added successfully!"));
}

#[tokio::test]
async fn corrupt_data_file_yields_a_server_error() {
    let app = common::spawn_app().await;
    std::fs::write(&app.data_file, "definitely not json").unwrap();

    let res = common::client()
        .get(app.url("/catalog"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 500);
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let app = common::spawn_app().await;
    let client = common::client();

    for path in ["/", "/catalog", "/does-not-exist"] {
        let res = client.get(app.url(path)).send().await.unwrap();
        assert!(
            res.headers().get("x-request-id").is_some(),
            "missing x-request-id on {path}"
        );
    }
}

#[tokio::test]
async fn health_reports_operational() {
    let app = common::spawn_app().await;

    let res = common::client()
        .get(app.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let status: serde_json::Value = res.json().await.unwrap();
    assert_eq!(status["status"], "operational");
}

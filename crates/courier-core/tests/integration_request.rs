//! Integration tests: full request pipeline against a local scripted server.
//!
//! Each test starts a one-script HTTP server, issues a request through the
//! public client operations, and asserts on what the server actually
//! received plus the classified outcome.

mod common;

use std::sync::{Arc, Mutex};

use common::echo_server::{EchoServer, ScriptedResponse};
use courier_core::{
    Client, Error, FilePicker, Multipart, PickerPrompt, RequestParams, SelectedFile,
    SelectionError, ValidationError, JSON,
};
use serde_json::json;

#[tokio::test]
async fn get_folds_data_into_query() {
    let server = EchoServer::start(ScriptedResponse::json(200, r#"{"ok": true}"#));
    let client = Client::new();

    let response = client
        .get(RequestParams::new(server.url("/x")).with_data(json!({"a": 1, "b": 2})))
        .await
        .expect("2xx response");

    let request = server.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.target, "/x?a=1&b=2");
    assert!(request.body.is_empty());
    assert_eq!(response.status, 200);
    assert_eq!(response.body.as_json(), Some(&json!({"ok": true})));
}

#[tokio::test]
async fn get_appends_to_an_existing_query_string() {
    let server = EchoServer::start(ScriptedResponse::json(200, "{}"));
    let client = Client::new();

    client
        .get(RequestParams::new(server.url("/x?q=1")).with_data(json!({"a": 1, "b": 2})))
        .await
        .expect("2xx response");

    assert_eq!(server.last_request().target, "/x?q=1&a=1&b=2");
}

#[tokio::test]
async fn every_request_carries_the_identification_header() {
    let server = EchoServer::start(ScriptedResponse::json(200, "{}"));
    let client = Client::new();

    client
        .get(RequestParams::new(server.url("/")).with_header("X-Custom", "1"))
        .await
        .expect("2xx response");

    let request = server.last_request();
    assert_eq!(request.header("x-requested-with"), Some("XMLHttpRequest"));
    assert_eq!(request.header("x-custom"), Some("1"));
}

#[tokio::test]
async fn post_without_content_type_defaults_to_json() {
    let server = EchoServer::start(ScriptedResponse::json(201, r#"{"id": 7}"#));
    let client = Client::new();

    let response = client
        .post(RequestParams::new(server.url("/submit")).with_data(json!({"k": "v"})))
        .await
        .expect("2xx response");

    let request = server.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.header("content-type"), Some(JSON));
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&request.body).unwrap(),
        json!({"k": "v"})
    );
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn multipart_data_forces_form_content_type() {
    let server = EchoServer::start(ScriptedResponse::json(200, "{}"));
    let client = Client::new();

    let mut multipart = Multipart::new();
    multipart.append_text("note", "hello");
    multipart.append_file("doc", "a.txt", "text/plain", b"alpha".to_vec());

    client
        .post(
            RequestParams::new(server.url("/upload"))
                // The explicit JSON choice must lose to the multipart payload.
                .with_content_type(JSON)
                .with_data(multipart),
        )
        .await
        .expect("2xx response");

    let request = server.last_request();
    let content_type = request.header("content-type").expect("content-type");
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "unexpected content type: {content_type}"
    );
    let body = request.body_text();
    assert!(body.contains(r#"name="note""#));
    assert!(body.contains("hello"));
    assert!(body.contains(r#"name="doc""#));
    assert!(body.contains(r#"filename="a.txt""#));
    assert!(body.contains("alpha"));
}

#[tokio::test]
async fn put_with_json_body_keeps_the_verb() {
    let server = EchoServer::start(ScriptedResponse::json(200, "{}"));
    let client = Client::new();

    client
        .request(
            RequestParams::new(server.url("/item/3"))
                .with_method("put")
                .with_data(json!({"name": "updated"})),
        )
        .await
        .expect("2xx response");

    let request = server.last_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.header("content-type"), Some(JSON));
}

#[tokio::test]
async fn missing_url_fails_validation_before_any_transport_call() {
    let server = EchoServer::start(ScriptedResponse::json(200, "{}"));
    let client = Client::new();

    let err = client.request(RequestParams::default()).await.unwrap_err();
    match err {
        Error::Validation(inner) => assert_eq!(inner, ValidationError::Url),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(server.requests().is_empty(), "no request should be sent");
}

#[tokio::test]
async fn non_2xx_rejects_with_a_classified_response() {
    let server = EchoServer::start(ScriptedResponse::text(404, "missing"));
    let client = Client::new();

    let err = client
        .get(RequestParams::new(server.url("/nope")))
        .await
        .unwrap_err();
    let response = err.response().expect("classified response").clone();
    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.body.to_text(), "missing");
}

#[tokio::test]
async fn response_headers_are_collected() {
    let mut scripted = ScriptedResponse::json(200, "{}");
    scripted
        .headers
        .push(("X-Trace".to_string(), "t1".to_string()));
    let server = EchoServer::start(scripted);
    let client = Client::new();

    let response = client
        .get(RequestParams::new(server.url("/")))
        .await
        .expect("2xx response");

    assert_eq!(response.headers.get("x-trace").map(String::as_str), Some("t1"));
    assert_eq!(
        response.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
}

#[tokio::test]
async fn progress_stays_in_bounds_and_never_decreases() {
    let server = EchoServer::start(ScriptedResponse::json(200, &format!(
        r#"{{"payload": "{}"}}"#,
        "x".repeat(2048)
    )));
    let client = Client::new();

    let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_cb = Arc::clone(&seen);
    let body = json!({"blob": "y".repeat(64 * 1024)});

    client
        .post(
            RequestParams::new(server.url("/big"))
                .with_data(body)
                .with_upload_ratio(50)
                .with_progress(Arc::new(move |pct| seen_cb.lock().unwrap().push(pct))),
        )
        .await
        .expect("2xx response");

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty(), "progress callback should fire");
    assert!(seen.iter().all(|&pct| pct <= 100));
    assert!(
        seen.windows(2).all(|w| w[0] <= w[1]),
        "progress must be non-decreasing: {seen:?}"
    );
    assert_eq!(*seen.last().unwrap(), 100, "download completion reaches 100");
}

struct ScriptedPicker {
    files: Vec<SelectedFile>,
}

impl FilePicker for ScriptedPicker {
    fn pick(&self, prompt: &PickerPrompt) -> Result<Vec<SelectedFile>, SelectionError> {
        let mut files = self.files.clone();
        if !prompt.multiple {
            files.truncate(1);
        }
        Ok(files)
    }
}

#[tokio::test]
async fn transport_uploads_selected_files_with_extra_fields() {
    let server = EchoServer::start(ScriptedResponse::json(200, r#"{"stored": 1}"#));
    let picker = Arc::new(ScriptedPicker {
        files: vec![SelectedFile {
            name: "report.txt".to_string(),
            mime: "text/plain".to_string(),
            data: b"quarterly numbers".to_vec(),
        }],
    });
    let client = Client::with_picker_instance(picker);

    let hook_saw: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let hook_saw_cb = Arc::clone(&hook_saw);

    let response = client
        .transport(
            RequestParams::new(server.url("/files"))
                .with_field_name("docs")
                .with_data(json!({"title": "hello"}))
                .with_before_send(Arc::new(move |selected| {
                    let mut names = hook_saw_cb.lock().unwrap();
                    for file in selected {
                        names.push(file.name.clone());
                    }
                })),
        )
        .await
        .expect("2xx response");

    assert_eq!(*hook_saw.lock().unwrap(), vec!["report.txt".to_string()]);
    assert_eq!(response.body.as_json(), Some(&json!({"stored": 1})));

    let request = server.last_request();
    assert_eq!(request.method, "POST");
    assert!(request
        .header("content-type")
        .is_some_and(|ct| ct.starts_with("multipart/form-data; boundary=")));
    let body = request.body_text();
    assert!(body.contains(r#"name="docs""#));
    assert!(body.contains(r#"filename="report.txt""#));
    assert!(body.contains("quarterly numbers"));
    assert!(body.contains(r#"name="title""#));
    assert!(body.contains("hello"));
}

#[tokio::test]
async fn select_files_honors_accept_and_multiple() {
    let picker = Arc::new(ScriptedPicker {
        files: vec![
            SelectedFile {
                name: "a.txt".to_string(),
                mime: "text/plain".to_string(),
                data: b"a".to_vec(),
            },
            SelectedFile {
                name: "b.txt".to_string(),
                mime: "text/plain".to_string(),
                data: b"b".to_vec(),
            },
        ],
    });
    let client = Client::with_picker_instance(picker);

    let single = client
        .select_files(RequestParams::new("/unused"))
        .await
        .expect("selection");
    assert_eq!(single.len(), 1, "multiple defaults to false");

    let picker = Arc::new(ScriptedPicker {
        files: vec![
            SelectedFile {
                name: "a.txt".to_string(),
                mime: "text/plain".to_string(),
                data: b"a".to_vec(),
            },
            SelectedFile {
                name: "b.txt".to_string(),
                mime: "text/plain".to_string(),
                data: b"b".to_vec(),
            },
        ],
    });
    let client = Client::with_picker_instance(picker);
    let both = client
        .select_files(RequestParams::new("/unused").with_multiple(true))
        .await
        .expect("selection");
    assert_eq!(both.len(), 2);
    assert_eq!(both[0].name, "a.txt");
    assert_eq!(both[1].name, "b.txt");
}

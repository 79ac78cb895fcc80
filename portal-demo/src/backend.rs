//! A throwaway backend that answers the portal operations from fixed data.

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json, Router,
    extract::Path,
    response::{IntoResponse, Response},
    routing::post,
};
use portal_rpc::{ErrorBody, RequestEnvelope, ResponseEnvelope};
use serde_json::{Value, json};

pub const TOKEN: &str = "demo-token";

fn reply(res: ResponseEnvelope<Value>) -> Response {
    Json(res).into_response()
}

fn reject<S: Into<String>>(message: S) -> Response {
    reply(ResponseEnvelope::Failure(ErrorBody::new(message)))
}

fn courses() -> Value {
    json!([
        { "id": "c-1", "course_title": "algebra" },
        { "id": "c-2", "course_title": "organic chemistry" },
    ])
}

fn questions(course: &str) -> Option<Value> {
    match course {
        "c-1" => Some(json!([
            { "id": 11, "question": "2 + 2?", "options": ["3", "4"], "answer": 1 },
            { "id": 12, "question": "x^2 = 9, x > 0?", "options": ["3", "-3"], "answer": 0 },
        ])),
        "c-2" => Some(json!([])),
        _ => None,
    }
}

async fn handle(Path(op): Path<String>, Json(q): Json<RequestEnvelope<Value>>) -> Response {
    // some jitter so overlapping calls finish out of order
    let delay = rand::random_range(5..60);
    tokio::time::sleep(Duration::from_millis(delay)).await;

    if q.token() != Some(TOKEN) {
        return reject("unauthorized");
    }
    let body = q.body().cloned().unwrap_or(Value::Null);
    log::debug!("backend: {op} {body}");

    // c-2 is slow to load, so a quick switch away from it leaves its reply behind
    if op == "courses.get_course_questions" && body["courseId"] == "c-2" {
        tokio::time::sleep(Duration::from_millis(150)).await;
    }

    match op.as_str() {
        "exams.list" => reply(ResponseEnvelope::Success(json!([
            { "id": 1, "title": "Midterm", "course": "c-1" },
            { "id": 2, "title": "Finals", "course": "c-2" },
        ]))),
        "courses.list" => reply(ResponseEnvelope::Success(courses())),
        "courses.get_one" => {
            let id = body["id"].as_str().unwrap_or_default();
            let found = courses()
                .as_array()
                .and_then(|cs| cs.iter().find(|c| c["id"] == id).cloned());
            match found {
                Some(c) => reply(ResponseEnvelope::Success(c)),
                None => reject(format!("course {id} not found")),
            }
        }
        "courses.get_course_questions" => {
            let id = body["courseId"].as_str().unwrap_or_default();
            match questions(id) {
                Some(qs) => reply(ResponseEnvelope::Success(qs)),
                None => reject(format!("course {id} not found")),
            }
        }
        _ => reject(format!("unknown operation {op}")),
    }
}

/// Start the backend on an ephemeral port and return its RPC endpoint.
pub async fn start() -> std::io::Result<String> {
    let app = Router::new().route("/api/rpc/{op}", post(handle));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            log::error!("stub backend stopped: {e}");
        }
    });
    log::info!("stub backend listening on http://{addr}");
    Ok(format!("http://{addr}/api/rpc"))
}

use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::debug;

use crate::state::SharedState;
use crate::handlers;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn header(field: &str, value: &str) -> Header {
    Header::from_bytes(field.as_bytes(), value.as_bytes())
        .expect("header field and value are plain ASCII")
}

pub fn html_response(body: String) -> HttpResponse {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![header("Content-Type", "text/html; charset=utf-8")],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn redirect(location: &str) -> HttpResponse {
    Response::new(
        StatusCode(303),
        vec![header("Location", location), header("Content-Length", "0")],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn json_download_response(body: String, filename: &str) -> HttpResponse {
    let bytes = body.into_bytes();
    let len = bytes.len();
    let disposition = format!("attachment; filename=\"{}\"", filename);
    Response::new(
        StatusCode(200),
        vec![
            header("Content-Type", "application/json"),
            header("Content-Disposition", &disposition),
        ],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn not_found() -> HttpResponse {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![header("Content-Type", "text/plain")],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// Handlers receive a `&mut Request` so that the dispatcher retains ownership
/// and can call `request.respond(response)` at the end.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    debug!(?method, %path, "request");

    let response = match (method, path.as_str()) {
        (Method::Get, "/") => redirect("/architect"),

        // ── Architect page ────────────────────────────────────────────────
        (Method::Get,  "/architect")               => handlers::architect::handle_get(state),
        (Method::Post, "/architect/input")         => handlers::architect::handle_input(&mut request, state),
        (Method::Post, "/architect/layers")        => handlers::architect::handle_add_layer(&mut request, state),
        (Method::Post, "/architect/layers/remove") => handlers::architect::handle_remove_layer(&mut request, state),
        (Method::Post, "/architect/clear")         => handlers::architect::handle_clear(state),
        (Method::Post, "/architect/example")       => handlers::architect::handle_example(state),

        // ── JSON export / import ─────────────────────────────────────────
        (Method::Get,  "/architect/export") => handlers::transfer::handle_export(state),
        (Method::Post, "/architect/import") => handlers::transfer::handle_import(&mut request, state),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    };

    let _ = request.respond(response);
}

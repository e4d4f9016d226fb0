use std::io::Read;

use tiny_http::Request;
use tracing::{info, warn};

use crate::handlers::architect::read_form;
use crate::routes::{json_download_response, redirect, HttpResponse};
use crate::state::{lock, FlashMessage, SharedState};
use crate::util::form::form_get;
use crate::util::multipart::{extract_boundary, file_field};

const EXPORT_FILENAME: &str = "cnn_architecture.json";

/// `GET /architect/export`
///
/// Serves the current `{input, layers}` document as a downloadable attachment.
pub fn handle_export(state: SharedState) -> HttpResponse {
    let spec = lock(&state).spec.clone();

    match spec.to_json_pretty() {
        Ok(json) => json_download_response(json, EXPORT_FILENAME),
        Err(e) => {
            warn!("export failed: {}", e);
            lock(&state).flash = Some(FlashMessage::error(format!("Export failed: {}", e)));
            redirect("/architect")
        }
    }
}

/// `POST /architect/import`
///
/// Accepts either a multipart upload (field `file`) or a urlencoded form with
/// the document pasted into field `json`. On any error the current
/// architecture is left as it was.
pub fn handle_import(request: &mut Request, state: SharedState) -> HttpResponse {
    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let document = if content_type.starts_with("multipart/form-data") {
        let mut body: Vec<u8> = Vec::new();
        let _ = request.as_reader().read_to_end(&mut body);
        extract_boundary(&content_type)
            .and_then(|b| file_field(&body, &b, "file"))
            .filter(|bytes| !bytes.is_empty())
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    } else {
        let pairs = read_form(request);
        form_get(&pairs, "json")
            .map(str::to_owned)
            .filter(|s| !s.trim().is_empty())
    };

    let mut st = lock(&state);
    let Some(document) = document else {
        st.flash = Some(FlashMessage::error("No JSON file was uploaded."));
        return redirect("/architect");
    };

    match st.apply_import(&document) {
        Ok(()) => info!(layers = st.spec.layers.len(), "imported architecture"),
        Err(e) => warn!("import rejected: {}", e),
    }
    drop(st);

    redirect("/architect")
}

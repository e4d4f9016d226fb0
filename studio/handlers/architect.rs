use std::io::Read;

use tiny_http::Request;
use tracing::{debug, warn};

use cnn_geometry::{report, ArchitectureSpec, InputShape, LayerDescriptor, LayerKind, ResultRow};

use crate::render::{html_escape, render_page};
use crate::routes::{html_response, redirect, HttpResponse};
use crate::state::{lock, FlashKind, FlashMessage, SharedState};
use crate::util::form::{form_get, form_int_at_least, parse_form};

// ---------------------------------------------------------------------------
// GET /architect
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> HttpResponse {
    let mut st = lock(&state);
    let flash  = st.take_flash();
    let spec   = st.spec.clone();
    drop(st);

    // Every render recomputes all rows from the snapshot.
    let rows = spec.compute();
    html_response(build_arch_page(&spec, &rows, flash.as_ref()))
}

// ---------------------------------------------------------------------------
// POST /architect/input
// ---------------------------------------------------------------------------

pub fn handle_input(request: &mut Request, state: SharedState) -> HttpResponse {
    let pairs = read_form(request);
    let input = InputShape::from_signed(
        form_int_at_least(&pairs, "H", 1),
        form_int_at_least(&pairs, "W", 1),
        form_int_at_least(&pairs, "C", 1),
    );

    let mut st = lock(&state);
    match input {
        Ok(input) => {
            let next = st.spec.with_input(input);
            st.replace_spec(next, None);
        }
        Err(e) => st.flash = Some(FlashMessage::error(e.to_string())),
    }
    drop(st);

    redirect("/architect")
}

// ---------------------------------------------------------------------------
// POST /architect/layers
// ---------------------------------------------------------------------------

pub fn handle_add_layer(request: &mut Request, state: SharedState) -> HttpResponse {
    let pairs = read_form(request);
    let layer = layer_from_form(&pairs);

    let mut st = lock(&state);
    match layer {
        Ok(layer) => {
            debug!(kind = %layer.kind(), "adding layer");
            let next = st.spec.with_layer(layer);
            st.replace_spec(next, None);
        }
        Err(e) => {
            warn!("rejected layer: {}", e);
            st.flash = Some(FlashMessage::error(e.to_string()));
        }
    }
    drop(st);

    redirect("/architect")
}

/// Builds a layer from the add-layer form. Blank or out-of-range numbers are
/// clamped (`k`, `s`, `d`, `outC` to 1, `p` to 0); fields the kind has no use
/// for are dropped by `LayerDescriptor::from_fields`.
pub fn layer_from_form(pairs: &[(String, String)]) -> cnn_geometry::Result<LayerDescriptor> {
    let kind = form_get(pairs, "type").unwrap_or("conv").parse::<LayerKind>()?;
    LayerDescriptor::from_fields(
        kind,
        form_int_at_least(pairs, "k", 1),
        form_int_at_least(pairs, "s", 1),
        form_int_at_least(pairs, "p", 0),
        form_int_at_least(pairs, "d", 1),
        Some(form_int_at_least(pairs, "outC", 1)),
    )
}

// ---------------------------------------------------------------------------
// POST /architect/layers/remove
// ---------------------------------------------------------------------------

pub fn handle_remove_layer(request: &mut Request, state: SharedState) -> HttpResponse {
    let pairs = read_form(request);
    let idx = form_get(&pairs, "idx").and_then(|v| v.trim().parse::<usize>().ok());

    if let Some(idx) = idx {
        let mut st = lock(&state);
        let next = st.spec.without_layer(idx);
        st.replace_spec(next, None);
    }

    redirect("/architect")
}

// ---------------------------------------------------------------------------
// POST /architect/clear  and  POST /architect/example
// ---------------------------------------------------------------------------

pub fn handle_clear(state: SharedState) -> HttpResponse {
    let mut st = lock(&state);
    let next = st.spec.cleared();
    st.replace_spec(next, None);
    drop(st);

    redirect("/architect")
}

pub fn handle_example(state: SharedState) -> HttpResponse {
    let mut st = lock(&state);
    let next = ArchitectureSpec::example(st.spec.input);
    st.replace_spec(next, Some(FlashMessage::success("Loaded the VGG-style example network.")));
    drop(st);

    redirect("/architect")
}

// ---------------------------------------------------------------------------
// Page builder
// ---------------------------------------------------------------------------

pub fn read_form(request: &mut Request) -> Vec<(String, String)> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    parse_form(&body)
}

fn build_arch_page(spec: &ArchitectureSpec, rows: &[ResultRow], flash: Option<&FlashMessage>) -> String {
    let layer_rows = if rows.is_empty() {
        r#"<tr><td colspan="8" class="empty">No layers yet. Add one above or load the example.</td></tr>"#.to_owned()
    } else {
        build_layer_rows(rows)
    };

    render_page(|tmpl| {
        // FLASH goes last so user text is never scanned for tokens.
        tmpl
            .replace("{{IN_H}}", &spec.input.height().to_string())
            .replace("{{IN_W}}", &spec.input.width().to_string())
            .replace("{{IN_C}}", &spec.input.channels().to_string())
            .replace("{{LAYER_COUNT}}", &spec.layers.len().to_string())
            .replace("{{LAYER_ROWS}}", &layer_rows)
            .replace("{{FLASH}}", &render_flash_html(flash))
    })
}

fn build_layer_rows(rows: &[ResultRow]) -> String {
    rows.iter().map(|r| {
        let note = r.warning
            .map(|w| format!("⚠️ {}", html_escape(&w.to_string())))
            .unwrap_or_default();
        let row_class = if r.warning.is_some() { " class=\"warn\"" } else { "" };
        format!(
            r#"<tr{cls}><td>{idx}</td><td>{layer}</td><td>{window}</td><td class="mono">{out}</td><td class="mono">{rf}</td><td class="mono">{jump}</td><td>{note}</td><td><form method="post" action="/architect/layers/remove"><input type="hidden" name="idx" value="{pos}"><button type="submit" class="btn btn-secondary btn-sm">Remove</button></form></td></tr>"#,
            cls    = row_class,
            idx    = r.index,
            layer  = html_escape(&report::layer_label(&r.layer)),
            window = html_escape(&report::window_label(&r.layer)),
            out    = r.output,
            rf     = r.receptive_field,
            jump   = r.jump,
            note   = note,
            pos    = r.index - 1,
        )
    }).collect::<Vec<_>>().join("\n")
}

pub fn render_flash_html(flash: Option<&FlashMessage>) -> String {
    match flash {
        None    => String::new(),
        Some(f) => {
            let cls = match f.kind {
                FlashKind::Success => "flash-success",
                FlashKind::Error   => "flash-error",
            };
            format!(r#"<div class="flash {}">{}</div>"#, cls, html_escape(&f.text))
        }
    }
}

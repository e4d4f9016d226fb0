//! Human-readable rendering of result rows: the labels used by the studio
//! table and a fixed-width text table for the terminal.

use crate::geometry::ResultRow;
use crate::layers::{LayerDescriptor, PoolKind};

const HEADERS: [&str; 7] = ["#", "Layer", "k/s/p/d", "Out (H×W×C)", "RF (H×W)", "Jump (H×W)", "Notes"];

/// `Conv2D → 64`, `MaxPool2D`, `AvgPool2D`, `FC → 10`.
pub fn layer_label(layer: &LayerDescriptor) -> String {
    match layer {
        LayerDescriptor::Conv { out_channels, .. } => format!("Conv2D → {}", out_channels),
        LayerDescriptor::Pool { kind: PoolKind::Max, .. } => "MaxPool2D".to_owned(),
        LayerDescriptor::Pool { kind: PoolKind::Avg, .. } => "AvgPool2D".to_owned(),
        LayerDescriptor::FullyConnected { units } => format!("FC → {}", units),
    }
}

/// `k=3 / s=1 / p=1 / d=1`; a dash for fully-connected layers.
pub fn window_label(layer: &LayerDescriptor) -> String {
    match layer {
        LayerDescriptor::FullyConnected { .. } => "—".to_owned(),
        _ => {
            let w = layer.window();
            format!("k={} / s={} / p={} / d={}", w.kernel(), w.stride(), w.padding(), w.dilation())
        }
    }
}

/// One row's cells in table column order.
pub fn row_cells(row: &ResultRow) -> [String; 7] {
    [
        row.index.to_string(),
        layer_label(&row.layer),
        window_label(&row.layer),
        row.output.to_string(),
        row.receptive_field.to_string(),
        row.jump.to_string(),
        row.warning.map(|w| format!("⚠ {}", w)).unwrap_or_default(),
    ]
}

/// Renders rows as a left-aligned text table with a header and a rule.
pub fn render_table(rows: &[ResultRow]) -> String {
    let body: Vec<[String; 7]> = rows.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for cells in &body {
        push_line(&mut out, cells.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{ArchitectureSpec, InputShape};

    #[test]
    fn labels_match_layer_kind() {
        let conv = LayerDescriptor::conv(3, 1, 1, 1, 64).unwrap();
        let pool = LayerDescriptor::avg_pool(2, 2, 0, 1).unwrap();
        let fc = LayerDescriptor::fully_connected(10).unwrap();

        assert_eq!(layer_label(&conv), "Conv2D → 64");
        assert_eq!(layer_label(&pool), "AvgPool2D");
        assert_eq!(layer_label(&fc), "FC → 10");
        assert_eq!(window_label(&conv), "k=3 / s=1 / p=1 / d=1");
        assert_eq!(window_label(&fc), "—");
    }

    #[test]
    fn table_has_header_rule_and_one_line_per_row() {
        let spec = ArchitectureSpec::example(InputShape::default());
        let table = render_table(&spec.compute());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2 + spec.layers.len());
        assert!(lines[0].starts_with("#  Layer"));
        assert!(lines[1].starts_with("-  -----"));
        assert!(lines[2].contains("32×32×64"));
        assert!(lines[9].contains("FC → 10"));
    }

    #[test]
    fn warned_rows_carry_a_note() {
        let spec = ArchitectureSpec::new(
            InputShape::new(3, 3, 1).unwrap(),
            vec![LayerDescriptor::conv(5, 1, 0, 1, 8).unwrap()],
        );
        let cells = row_cells(&spec.compute()[0]);
        assert_eq!(cells[3], "-1×-1×8");
        assert_eq!(cells[6], "⚠ output <= 0 (check k/p/s/d)");
    }
}

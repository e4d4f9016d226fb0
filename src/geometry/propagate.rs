use crate::geometry::row::ResultRow;
use crate::geometry::state::SpatialState;
use crate::layers::LayerDescriptor;

/// Runs `initial` through every layer, left to right, and returns one row per
/// layer in the same order.
///
/// Nothing here fails: a layer whose output is zero or negative gets a
/// warning on its row and its (degenerate) size feeds the next layer. Each
/// call starts over from `initial`; neither argument is modified.
pub fn propagate(initial: SpatialState, layers: &[LayerDescriptor]) -> Vec<ResultRow> {
    let mut rows = Vec::with_capacity(layers.len());
    let mut state = initial;

    for (i, layer) in layers.iter().enumerate() {
        let (next, warning) = state.apply(layer);
        state = next;
        rows.push(ResultRow::new(i + 1, *layer, &state, warning));
    }

    rows
}

//! Map assembly: backdrops, overlays, legend, time control, initial view.
//!
//! [`assemble_map`] is the last pure stage of the pipeline. It takes the
//! composed layers and the configuration and produces the
//! [`MapDocument`] a render target presents.

use quakemap_types::{
    BaseLayer, BinCount, EarthquakeEvent, FaultLine, LatLng, LayerControl, Legend, LegendEntry,
    MagnitudeColor, MapDocument, MapSummary, MapView, Overlay, OverlayKind, TimeControl,
    TimeLabelFormat,
};
use tracing::warn;

use crate::classify::{MAGNITUDE_BINS, choose_color};
use crate::compose::ComposedLayers;
use crate::config::{MapConfig, TilesConfig, ViewConfig};

/// Placeholder in a tile URL template replaced by the style id.
const STYLE_PLACEHOLDER: &str = "{style}";

/// Placeholder in a tile URL template replaced by the access token.
const TOKEN_PLACEHOLDER: &str = "{token}";

/// Assemble the map document.
pub fn assemble_map(
    layers: ComposedLayers,
    summary: MapSummary,
    config: &MapConfig,
) -> MapDocument {
    let (start, end) = layers.timeline.span().unzip();

    MapDocument {
        container: config.view.container.clone(),
        title: config.view.title.clone(),
        view: map_view(&config.view),
        base_layers: base_layers(&config.tiles),
        overlays: vec![
            Overlay {
                name: config.layers.earthquakes_name.clone(),
                kind: OverlayKind::Earthquakes,
                visible: config.layers.show_earthquakes,
            },
            Overlay {
                name: config.layers.fault_lines_name.clone(),
                kind: OverlayKind::FaultLines,
                visible: config.layers.show_fault_lines,
            },
        ],
        layer_control: LayerControl {
            collapsed: config.layers.control_collapsed,
        },
        legend: Legend {
            position: config.legend.position,
            entries: legend_entries(),
        },
        time_control: TimeControl {
            label_format: TimeLabelFormat::FullDateTime,
            start,
            end,
        },
        points: layers.points,
        lines: layers.lines,
        timeline: layers.timeline,
        summary,
    }
}

/// Initial viewport.
pub const fn map_view(view: &ViewConfig) -> MapView {
    MapView {
        center: LatLng::new(view.center_lat, view.center_lng),
        zoom: view.zoom,
        scroll_wheel_zoom: view.scroll_wheel_zoom,
    }
}

/// Tile backdrops with exactly one selected.
///
/// The configured `selected` name wins; if no style carries that name the
/// first style is selected instead.
pub fn base_layers(tiles: &TilesConfig) -> Vec<BaseLayer> {
    let wanted = tiles
        .styles
        .iter()
        .position(|style| style.name == tiles.selected);
    if wanted.is_none() && !tiles.styles.is_empty() {
        warn!(
            selected = tiles.selected,
            "selected backdrop not among configured styles, using the first"
        );
    }
    let selected_index = wanted.unwrap_or(0);

    if tiles.access_token.is_empty() {
        warn!("no tile access token configured, backdrops may fail to load");
    }

    tiles
        .styles
        .iter()
        .enumerate()
        .map(|(index, style)| BaseLayer {
            name: style.name.clone(),
            url_template: tile_url(
                &tiles.url_template,
                &style.style_id,
                &tiles.access_token,
            ),
            selected: index == selected_index,
        })
        .collect()
}

/// Substitute `{style}` and `{token}` into a tile URL template.
pub fn tile_url(template: &str, style_id: &str, token: &str) -> String {
    template
        .replace(STYLE_PLACEHOLDER, style_id)
        .replace(TOKEN_PLACEHOLDER, token)
}

/// The six legend rows, lowest bin first.
pub fn legend_entries() -> Vec<LegendEntry> {
    MAGNITUDE_BINS
        .iter()
        .map(|bin| LegendEntry {
            label: bin.label.to_owned(),
            color: bin.swatch(),
        })
        .collect()
}

/// Count events per colour bin and wrap the totals in a [`MapSummary`].
///
/// `feed_generated` is left unset; it comes from feed metadata, not from
/// the decoded items.
pub fn summarize(
    events: &[EarthquakeEvent],
    fault_lines: &[FaultLine],
    skipped: usize,
) -> MapSummary {
    let by_bin = MagnitudeColor::ALL
        .iter()
        .map(|&color| BinCount {
            color,
            count: events
                .iter()
                .filter(|event| choose_color(event.magnitude) == color)
                .count(),
        })
        .collect();

    MapSummary {
        earthquakes: events.len(),
        fault_lines: fault_lines.len(),
        fault_line_vertices: fault_lines.iter().map(FaultLine::vertex_count).sum(),
        skipped,
        by_bin,
        feed_generated: None,
    }
}

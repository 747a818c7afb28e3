/// Standalone Leaflet map page generation.
///
/// Produces a self-contained HTML page: a heat layer built from the
/// dataset summary's points, circle markers per the dataset's marker
/// style, and (for the notable-city datasets) a fixed-position color
/// legend. Leaflet and the leaflet.heat plugin load from the unpkg CDN;
/// everything else is inlined, so the page opens from disk without a
/// server.

use serde::Serialize;

use crate::analysis::aggregate::DatasetSummary;
use crate::analysis::select::NotableCities;
use crate::datasets::{DatasetSpec, MarkerStyle};
use crate::model::MeasurementKind;

// ---------------------------------------------------------------------------
// Marker data
// ---------------------------------------------------------------------------

/// One annotated marker, serialized into the page as a JS literal.
#[derive(Debug, Serialize)]
struct Marker<'a> {
    lat: f64,
    lon: f64,
    color: &'a str,
    popup: String,
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn build_markers<'a>(
    dataset: &DatasetSpec,
    summary: &'a DatasetSummary,
    notable: Option<&NotableCities<'a>>,
) -> Vec<Marker<'a>> {
    match dataset.marker_style {
        MarkerStyle::CityDates => summary
            .cities
            .iter()
            .map(|(city, acc)| Marker {
                lat: acc.first_latitude,
                lon: acc.first_longitude,
                color: "cadetblue",
                popup: format!(
                    "<table border='1'>\
                     <tr><th>City</th><td>{}</td></tr>\
                     <tr><th>First Date</th><td>{}</td></tr>\
                     <tr><th>Last Date</th><td>{}</td></tr>\
                     </table>",
                    escape_html(city),
                    acc.first_date,
                    acc.last_date
                ),
            })
            .collect(),
        MarkerStyle::NotableCities => {
            let Some(notable) = notable else {
                return Vec::new();
            };
            notable
                .entries()
                .into_iter()
                .filter_map(|(criterion, city)| {
                    // Every selected city came out of the table, so the
                    // lookup only misses if the caller mixed summaries.
                    let acc = summary.cities.get(city)?;
                    Some(Marker {
                        lat: acc.first_latitude,
                        lon: acc.first_longitude,
                        color: criterion.marker_color(),
                        popup: format!(
                            "City: {}<br>Condition: {}",
                            escape_html(city),
                            criterion.label(dataset.kind.noun())
                        ),
                    })
                })
                .collect()
        }
        MarkerStyle::MeasurementExtremes => {
            let Some(notable) = notable else {
                return Vec::new();
            };
            let unit = match dataset.kind {
                MeasurementKind::TemperatureMean => "°C",
                _ => "",
            };
            [
                (notable.highest_measurement, "red", true),
                (notable.lowest_measurement, "blue", false),
            ]
            .into_iter()
            .filter_map(|(city, color, highest)| {
                let acc = summary.cities.get(city)?;
                let (lat, lon) = acc.centroid();
                let value = if highest { acc.max_measurement } else { acc.min_measurement };
                Some(Marker {
                    lat,
                    lon,
                    color,
                    popup: format!(
                        "City: {}<br>{}: {}{}",
                        escape_html(city),
                        dataset.kind.noun(),
                        value,
                        unit
                    ),
                })
            })
            .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Legend
// ---------------------------------------------------------------------------

fn build_legend(dataset: &DatasetSpec, notable: &NotableCities<'_>) -> String {
    let mut rows = String::new();
    for (criterion, _) in notable.entries() {
        rows.push_str(&format!(
            "<i style=\"background-color: {}; width: 20px; height: 20px; \
             display: inline-block;\"></i> {}<br>\n",
            criterion.marker_color(),
            criterion.label(dataset.kind.noun())
        ));
    }
    format!(
        "<div style=\"position: fixed; bottom: 30px; left: 30px; width: 200px; \
         background-color: rgba(255, 255, 255, 0.7); z-index: 9999; \
         border-radius: 10px; padding: 10px; font-size: 12px;\">\n\
         <b>Legend:</b><br>\n{}</div>\n",
        rows
    )
}

// ---------------------------------------------------------------------------
// Page assembly
// ---------------------------------------------------------------------------

/// Renders the dataset's map page.
///
/// `notable` is required by the notable-city and extreme-marker styles
/// and ignored by the city-dates style.
pub fn render_map(
    dataset: &DatasetSpec,
    summary: &DatasetSummary,
    notable: Option<&NotableCities<'_>>,
) -> Result<String, serde_json::Error> {
    let points: Vec<Vec<f64>> = summary
        .heat_points
        .iter()
        .map(|p| match p.weight {
            Some(w) => vec![p.latitude, p.longitude, w],
            None => vec![p.latitude, p.longitude],
        })
        .collect();
    let points_json = serde_json::to_string(&points)?;
    let markers_json = serde_json::to_string(&build_markers(dataset, summary, notable))?;

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n");
    page.push_str(&format!("<title>{}</title>\n", escape_html(dataset.title)));
    page.push_str(
        "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\"/>\n",
    );
    page.push_str("<style>html, body, #map { height: 100%; margin: 0; }</style>\n");
    page.push_str("</head>\n<body>\n<div id=\"map\"></div>\n");

    if dataset.marker_style == MarkerStyle::NotableCities {
        if let Some(notable) = notable {
            page.push_str(&build_legend(dataset, notable));
        }
    }

    page.push_str("<script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n");
    page.push_str(
        "<script src=\"https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js\"></script>\n",
    );
    page.push_str("<script>\n");
    page.push_str(&format!(
        "const map = L.map('map').setView([{:.6}, {:.6}], 5);\n",
        summary.mean_latitude, summary.mean_longitude
    ));
    page.push_str(
        "L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {\n    \
         attribution: '&copy; OpenStreetMap contributors',\n    maxZoom: 18,\n}).addTo(map);\n",
    );
    page.push_str(&format!("const heatPoints = {};\n", points_json));
    page.push_str("L.heatLayer(heatPoints).addTo(map);\n");
    page.push_str(&format!("const markers = {};\n", markers_json));
    page.push_str(
        "markers.forEach(m => {\n    \
         L.circleMarker([m.lat, m.lon], {\n        \
         radius: 7, fillColor: m.color, color: '#fff', weight: 2, fillOpacity: 0.85\n    \
         }).bindPopup(m.popup).addTo(map);\n});\n",
    );
    page.push_str("</script>\n</body>\n</html>\n");

    Ok(page)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

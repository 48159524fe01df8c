//! Declarative chart and map specifications.
//!
//! Plot payloads follow the `{data: series[], layout}` shape expected by the
//! charting front end; map payloads are `{markers: [...]}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::data::{
    AnomalyRecord, AnomalyReport, AtlanticRegion, CurrentField, DatasetSummary, DepthProfile,
    DomainData, MonitoringSite, PacificRegion, SalinityProfile, TemperatureSeries,
    TemperatureTrend,
};

const RED: &str = "#dc2626";
const BLUE: &str = "#2563eb";
const CYAN: &str = "#0891b2";
const TEAL: &str = "#0d9488";
const ORANGE: &str = "#ea580c";
const SLATE: &str = "#64748b";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationKind {
    Plot,
    Map,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum VisualizationSpec {
    Plot(PlotPayload),
    Map(MapPayload),
}

impl VisualizationSpec {
    pub fn kind(&self) -> VisualizationKind {
        match self {
            VisualizationSpec::Plot(_) => VisualizationKind::Plot,
            VisualizationSpec::Map(_) => VisualizationKind::Map,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPayload {
    pub data: Vec<Series>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValues {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

impl AxisValues {
    pub fn len(&self) -> usize {
        match self {
            AxisValues::Numbers(v) => v.len(),
            AxisValues::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<f64>> for AxisValues {
    fn from(v: Vec<f64>) -> Self {
        AxisValues::Numbers(v)
    }
}

impl From<Vec<String>> for AxisValues {
    fn from(v: Vec<String>) -> Self {
        AxisValues::Labels(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x: AxisValues,
    pub y: AxisValues,
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: String,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autorange: Option<String>,
}

impl Axis {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            autorange: None,
        }
    }

    /// Depth axes grow downwards.
    fn reversed(title: &str) -> Self {
        Self {
            title: title.to_string(),
            autorange: Some("reversed".to_string()),
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.autorange.as_deref() == Some("reversed")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPayload {
    pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub title: String,
    pub description: String,
    #[serde(rename = "data")]
    pub attributes: BTreeMap<String, String>,
}

fn line(color: &str, width: f64) -> Option<LineStyle> {
    Some(LineStyle {
        color: color.to_string(),
        width,
        dash: None,
    })
}

fn marker(color: &str, size: f64) -> Option<MarkerStyle> {
    Some(MarkerStyle {
        color: color.to_string(),
        size,
    })
}

fn lines_and_markers(
    name: &str,
    x: impl Into<AxisValues>,
    y: impl Into<AxisValues>,
    color: &str,
) -> Series {
    Series {
        x: x.into(),
        y: y.into(),
        series_type: SeriesType::Scatter,
        mode: Some("lines+markers".to_string()),
        name: name.to_string(),
        line: line(color, 2.0),
        marker: None,
    }
}

fn plot(title: &str, xaxis: Axis, yaxis: Axis, data: Vec<Series>) -> VisualizationSpec {
    VisualizationSpec::Plot(PlotPayload {
        data,
        layout: Layout {
            title: title.to_string(),
            xaxis,
            yaxis,
        },
    })
}

fn attributes<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Build the visualizations for a synthesized payload.
///
/// The payload variant identifies the intent, so the count and order of
/// specs per intent is fixed here.
pub fn build(data: &DomainData) -> Vec<VisualizationSpec> {
    match data {
        DomainData::Anomalies(report) => vec![anomaly_plot(report)],
        DomainData::DepthProfile(profile) => vec![depth_profile_plot(profile)],
        DomainData::Trend(trend) => vec![trend_plot(trend)],
        DomainData::TemperatureSeries(series) => vec![series_plot(series), float_map(series)],
        DomainData::Salinity(profile) => vec![salinity_plot(profile)],
        DomainData::Currents(field) => vec![current_map(field), current_plot(field)],
        DomainData::Atlantic(region) => vec![atlantic_map(region), atlantic_plot(region)],
        DomainData::Pacific(region) => vec![pacific_map(region)],
        DomainData::Summary(summary) => vec![summary_plot(summary)],
        DomainData::External(_) => Vec::new(),
    }
}

fn anomaly_plot(report: &AnomalyReport) -> VisualizationSpec {
    let (warm, cold): (Vec<_>, Vec<_>) = report.anomalies.iter().partition(|a| a.anomaly >= 0.0);
    let anomaly_series = |name: &str, records: &[&AnomalyRecord], color: &str| Series {
        x: AxisValues::Labels(records.iter().map(|a| a.date.clone()).collect()),
        y: AxisValues::Numbers(records.iter().map(|a| a.anomaly).collect()),
        series_type: SeriesType::Scatter,
        mode: Some("markers".to_string()),
        name: name.to_string(),
        line: None,
        marker: marker(color, 12.0),
    };
    plot(
        "Temperature Anomalies Detected",
        Axis::titled("Date"),
        Axis::titled("Anomaly (°C)"),
        vec![
            anomaly_series("Warm anomaly", &warm[..], RED),
            anomaly_series("Cold anomaly", &cold[..], BLUE),
        ],
    )
}

fn depth_profile_plot(profile: &DepthProfile) -> VisualizationSpec {
    plot(
        "Ocean Temperature Depth Profile",
        Axis::titled("Temperature (°C)"),
        Axis::reversed("Depth (m)"),
        vec![lines_and_markers(
            "Temperature Profile",
            profile.temperatures.clone(),
            profile.depths.clone(),
            RED,
        )],
    )
}

fn trend_plot(trend: &TemperatureTrend) -> VisualizationSpec {
    let years: Vec<f64> = trend.years.iter().map(|y| f64::from(*y)).collect();
    let base = trend.values.first().copied().unwrap_or_default();
    let first_year = years.first().copied().unwrap_or_default();
    let fitted = years
        .iter()
        .map(|y| base + trend.trend_slope * (y - first_year))
        .collect::<Vec<_>>();
    let mut fit_line = lines_and_markers("Linear trend", years.clone(), fitted, SLATE);
    fit_line.mode = Some("lines".to_string());
    fit_line.line = Some(LineStyle {
        color: SLATE.to_string(),
        width: 1.5,
        dash: Some("dash".to_string()),
    });
    plot(
        "Annual Mean Temperature Trend (2009-2024)",
        Axis::titled("Year"),
        Axis::titled("Temperature (°C)"),
        vec![
            lines_and_markers("Annual mean", years, trend.values.clone(), ORANGE),
            fit_line,
        ],
    )
}

fn series_plot(series: &TemperatureSeries) -> VisualizationSpec {
    plot(
        "Ocean Temperature Time Series",
        Axis::titled("Date"),
        Axis::titled("Temperature (°C)"),
        vec![lines_and_markers(
            "Temperature (°C)",
            series.dates.clone(),
            series.temperatures.clone(),
            CYAN,
        )],
    )
}

fn float_map(series: &TemperatureSeries) -> VisualizationSpec {
    let latest = series.temperatures.last().copied();
    let markers = series
        .floats
        .iter()
        .map(|f| MapMarker {
            lat: f.lat,
            lon: f.lon,
            title: format!("ARGO Float {}", f.float_id),
            description: "Active profiling float".to_string(),
            attributes: attributes([
                ("float_id", f.float_id.clone()),
                (
                    "latest_temperature",
                    latest
                        .map(|t| format!("{t:.1}°C"))
                        .unwrap_or_else(|| "n/a".to_string()),
                ),
                ("status", "active".to_string()),
            ]),
        })
        .collect();
    VisualizationSpec::Map(MapPayload { markers })
}

fn salinity_plot(profile: &SalinityProfile) -> VisualizationSpec {
    plot(
        "Salinity Depth Profile",
        Axis::titled("Salinity (PSU)"),
        Axis::reversed("Depth (m)"),
        vec![lines_and_markers(
            "Salinity",
            profile.salinity.clone(),
            profile.depths.clone(),
            TEAL,
        )],
    )
}

fn current_map(field: &CurrentField) -> VisualizationSpec {
    let markers = field
        .locations
        .iter()
        .zip(field.velocities.iter().zip(&field.directions))
        .enumerate()
        .map(|(i, (loc, (v, d)))| MapMarker {
            lat: loc.lat,
            lon: loc.lon,
            title: format!("Current Station {}", i + 1),
            description: format!("Velocity: {v:.2} m/s, Direction: {d:.0}°"),
            attributes: attributes([
                ("velocity", format!("{v:.2} m/s")),
                ("direction", format!("{d:.0}°")),
            ]),
        })
        .collect();
    VisualizationSpec::Map(MapPayload { markers })
}

fn current_plot(field: &CurrentField) -> VisualizationSpec {
    let stations: Vec<String> = (1..=field.velocities.len())
        .map(|i| format!("Station {i}"))
        .collect();
    plot(
        "Current Velocity by Station",
        Axis::titled("Station"),
        Axis::titled("Velocity (m/s)"),
        vec![Series {
            x: AxisValues::Labels(stations),
            y: AxisValues::Numbers(field.velocities.clone()),
            series_type: SeriesType::Bar,
            mode: None,
            name: "Velocity".to_string(),
            line: None,
            marker: marker(BLUE, 8.0),
        }],
    )
}

fn site_markers(sites: &[MonitoringSite]) -> Vec<MapMarker> {
    sites
        .iter()
        .map(|s| MapMarker {
            lat: s.lat,
            lon: s.lon,
            title: s.name.clone(),
            description: format!(
                "Temperature: {:.1}°C, Salinity: {:.1} PSU",
                s.temperature, s.salinity
            ),
            attributes: attributes([
                ("temperature", format!("{:.1}°C", s.temperature)),
                ("salinity", format!("{:.1} PSU", s.salinity)),
            ]),
        })
        .collect()
}

fn atlantic_map(region: &AtlanticRegion) -> VisualizationSpec {
    VisualizationSpec::Map(MapPayload {
        markers: site_markers(&region.sites),
    })
}

fn atlantic_plot(region: &AtlanticRegion) -> VisualizationSpec {
    let lats: Vec<f64> = region.sites.iter().map(|s| s.lat).collect();
    plot(
        "North Atlantic Surface Temperature by Latitude",
        Axis::titled("Latitude (°N)"),
        Axis::titled("Temperature (°C)"),
        vec![lines_and_markers(
            "Surface temperature",
            lats,
            region.sites.iter().map(|s| s.temperature).collect::<Vec<_>>(),
            RED,
        )],
    )
}

fn pacific_map(region: &PacificRegion) -> VisualizationSpec {
    VisualizationSpec::Map(MapPayload {
        markers: site_markers(&region.sites),
    })
}

fn summary_plot(summary: &DatasetSummary) -> VisualizationSpec {
    plot(
        "Measurements by Parameter",
        Axis::titled("Parameter"),
        Axis::titled("Measurements"),
        vec![Series {
            x: AxisValues::Labels(summary.parameters.clone()),
            y: AxisValues::Numbers(
                summary
                    .measurements_by_parameter
                    .iter()
                    .map(|n| f64::from(*n))
                    .collect(),
            ),
            series_type: SeriesType::Bar,
            mode: None,
            name: "Measurements".to_string(),
            line: None,
            marker: marker(CYAN, 8.0),
        }],
    )
}

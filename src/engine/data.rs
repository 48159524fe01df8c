//! Synthetic domain data for each intent.
//!
//! Every branch except [`Intent::TemperatureGeneric`] is a fixed literal
//! record. The generic temperature series draws jitter from the caller's
//! random source so tests can seed it.

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::intent::Intent;

/// Mean of the synthetic 30-day temperature series (°C)
pub const SERIES_MEAN: f64 = 18.7;
/// Half-width of the uniform jitter band around [`SERIES_MEAN`]
pub const SERIES_JITTER: f64 = 2.3;
pub const SERIES_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnomalyRecord {
    pub date: String,
    pub value: f64,
    pub anomaly: f64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnomalyStatistics {
    pub total_anomalies: u32,
    pub max_positive: f64,
    pub max_negative: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnomalyReport {
    pub anomalies: Vec<AnomalyRecord>,
    pub statistics: AnomalyStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepthProfile {
    pub depths: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub location: GeoPoint,
    pub float_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemperatureTrend {
    pub years: Vec<i32>,
    pub values: Vec<f64>,
    /// °C per year
    pub trend_slope: f64,
    pub r_squared: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloatPosition {
    pub float_id: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesStatistics {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub valid_measurements: f64,
    pub active_floats: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemperatureSeries {
    pub dates: Vec<String>,
    pub temperatures: Vec<f64>,
    pub floats: Vec<FloatPosition>,
    pub statistics: SeriesStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SalinityStatistics {
    pub mean: f64,
    pub std: f64,
    pub halocline_depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SalinityProfile {
    pub depths: Vec<f64>,
    pub salinity: Vec<f64>,
    pub statistics: SalinityStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrentStatistics {
    pub mean_velocity: f64,
    pub predominant_direction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrentField {
    pub locations: Vec<GeoPoint>,
    /// m/s
    pub velocities: Vec<f64>,
    /// degrees clockwise from north
    pub directions: Vec<f64>,
    pub statistics: CurrentStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitoringSite {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub temperature: f64,
    pub salinity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtlanticRegion {
    pub region: String,
    pub temperature_range: [f64; 2],
    pub salinity_range: [f64; 2],
    pub characteristics: Vec<String>,
    pub sites: Vec<MonitoringSite>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepthStats {
    pub mean: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacificRegion {
    pub region: String,
    pub area: String,
    pub characteristics: Vec<String>,
    pub depth: DepthStats,
    pub sites: Vec<MonitoringSite>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetSummary {
    pub measurement_count: u32,
    pub float_count: u32,
    pub date_range: DateRange,
    pub parameters: Vec<String>,
    /// Measurement counts in the same order as `parameters`
    pub measurements_by_parameter: Vec<u32>,
}

/// Intent-specific payload of a response.
///
/// Serialized untagged: the JSON is the record itself. Engine records reject
/// unknown fields, so a backend payload only decodes as an engine variant
/// when it has exactly that shape; anything else is kept whole in
/// [`DomainData::External`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainData {
    Anomalies(AnomalyReport),
    DepthProfile(DepthProfile),
    Trend(TemperatureTrend),
    TemperatureSeries(TemperatureSeries),
    Salinity(SalinityProfile),
    Currents(CurrentField),
    Atlantic(AtlanticRegion),
    Pacific(PacificRegion),
    Summary(DatasetSummary),
    /// Payload from the live backend that matches none of the engine shapes
    External(serde_json::Value),
}

/// Build the data record for `intent`.
///
/// `today` anchors the rolling series; `rng` is only read for
/// [`Intent::TemperatureGeneric`].
pub fn synthesize<R: Rng>(intent: Intent, rng: &mut R, today: NaiveDate) -> DomainData {
    match intent {
        Intent::TemperatureAnomaly => DomainData::Anomalies(anomaly_report()),
        Intent::TemperatureDepthProfile => DomainData::DepthProfile(depth_profile()),
        Intent::TemperatureTrend => DomainData::Trend(temperature_trend()),
        Intent::TemperatureGeneric => DomainData::TemperatureSeries(temperature_series(rng, today)),
        Intent::Salinity => DomainData::Salinity(salinity_profile()),
        Intent::CurrentVelocity => DomainData::Currents(current_field()),
        Intent::RegionAtlantic => DomainData::Atlantic(atlantic_region()),
        Intent::RegionPacific => DomainData::Pacific(pacific_region()),
        Intent::Default => DomainData::Summary(dataset_summary()),
    }
}

fn anomaly_report() -> AnomalyReport {
    let record = |date: &str, value, anomaly, lat, lon| AnomalyRecord {
        date: date.to_string(),
        value,
        anomaly,
        lat,
        lon,
    };
    AnomalyReport {
        anomalies: vec![
            record("2024-01-15", 20.1, 2.1, 12.5, 72.3),
            record("2024-01-22", 16.2, -1.8, 8.7, 76.1),
            record("2024-02-03", 21.2, 3.2, 15.2, 68.9),
        ],
        statistics: AnomalyStatistics {
            total_anomalies: 3,
            max_positive: 3.2,
            max_negative: -1.8,
            confidence: 0.95,
        },
    }
}

fn depth_profile() -> DepthProfile {
    DepthProfile {
        depths: vec![
            0.0, 10.0, 25.0, 50.0, 75.0, 100.0, 150.0, 200.0, 300.0, 500.0, 750.0, 1000.0, 2000.0,
        ],
        temperatures: vec![
            22.1, 21.9, 21.4, 20.2, 18.6, 16.9, 14.3, 12.4, 10.1, 7.6, 5.8, 4.9, 4.0,
        ],
        location: GeoPoint {
            lat: 15.5,
            lon: 68.2,
        },
        float_id: "2902746".to_string(),
    }
}

fn temperature_trend() -> TemperatureTrend {
    TemperatureTrend {
        years: (2009..=2024).collect(),
        values: vec![
            18.42, 18.44, 18.45, 18.47, 18.48, 18.50, 18.51, 18.53, 18.54, 18.56, 18.57, 18.59,
            18.60, 18.62, 18.63, 18.65,
        ],
        trend_slope: 0.015,
        r_squared: 0.87,
    }
}

fn temperature_series<R: Rng>(rng: &mut R, today: NaiveDate) -> TemperatureSeries {
    let start = today
        .checked_sub_days(Days::new(SERIES_DAYS - 1))
        .unwrap_or(today);
    let dates = start
        .iter_days()
        .take(SERIES_DAYS as usize)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>();
    let temperatures = (0..dates.len())
        .map(|_| {
            let jitter = rng.gen_range(-SERIES_JITTER..SERIES_JITTER);
            round2(SERIES_MEAN + jitter)
        })
        .collect();

    TemperatureSeries {
        dates,
        temperatures,
        floats: active_floats(),
        statistics: SeriesStatistics {
            mean: SERIES_MEAN,
            std: SERIES_JITTER,
            min: 15.2,
            max: 22.1,
            valid_measurements: 0.96,
            active_floats: 47,
        },
    }
}

/// Positions of the floats reporting into the synthetic series.
pub fn active_floats() -> Vec<FloatPosition> {
    let float = |id: &str, lat, lon| FloatPosition {
        float_id: id.to_string(),
        lat,
        lon,
    };
    vec![
        float("2902746", 15.5, 68.2),
        float("2902751", 10.3, 72.8),
        float("2902763", 6.9, 79.4),
        float("2902770", 18.1, 63.5),
    ]
}

fn salinity_profile() -> SalinityProfile {
    SalinityProfile {
        depths: vec![
            0.0, 50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0, 750.0, 1000.0,
        ],
        salinity: vec![
            34.8, 35.0, 35.3, 35.6, 35.8, 35.9, 35.8, 35.7, 35.6, 35.5, 35.4,
        ],
        statistics: SalinityStatistics {
            mean: 35.2,
            std: 0.4,
            halocline_depth: 250.0,
        },
    }
}

fn current_field() -> CurrentField {
    let p = |lat, lon| GeoPoint { lat, lon };
    CurrentField {
        locations: vec![
            p(10.0, 65.0),
            p(10.5, 66.0),
            p(11.0, 67.0),
            p(11.5, 68.0),
            p(12.0, 69.0),
            p(12.5, 70.0),
            p(13.0, 71.0),
            p(13.5, 72.0),
            p(14.0, 73.0),
            p(14.5, 74.0),
        ],
        velocities: vec![0.25, 0.31, 0.22, 0.35, 0.28, 0.30, 0.26, 0.29, 0.24, 0.30],
        directions: vec![
            225.0, 230.0, 220.0, 235.0, 228.0, 232.0, 226.0, 229.0, 224.0, 231.0,
        ],
        statistics: CurrentStatistics {
            mean_velocity: 0.28,
            predominant_direction: 228.0,
        },
    }
}

fn site(name: &str, lat: f64, lon: f64, temperature: f64, salinity: f64) -> MonitoringSite {
    MonitoringSite {
        name: name.to_string(),
        lat,
        lon,
        temperature,
        salinity,
    }
}

fn atlantic_region() -> AtlanticRegion {
    AtlanticRegion {
        region: "North Atlantic".to_string(),
        temperature_range: [12.5, 24.8],
        salinity_range: [34.2, 36.5],
        characteristics: vec![
            "Gulf Stream influence".to_string(),
            "North Atlantic Deep Water formation".to_string(),
            "High-salinity Mediterranean outflow".to_string(),
        ],
        sites: vec![
            site("Sargasso Sea", 31.7, -64.2, 24.8, 36.5),
            site("Gulf Stream", 38.5, -68.0, 21.3, 36.1),
            site("Bay of Biscay", 45.5, -8.0, 16.4, 35.6),
            site("Labrador Sea", 57.0, -52.0, 12.5, 34.2),
        ],
    }
}

fn pacific_region() -> PacificRegion {
    PacificRegion {
        region: "Pacific Ocean".to_string(),
        area: "165.25 million km²".to_string(),
        characteristics: vec![
            "El Niño-Southern Oscillation variability".to_string(),
            "Western Pacific Warm Pool".to_string(),
            "Kuroshio Current system".to_string(),
        ],
        depth: DepthStats {
            mean: 4280.0,
            max: 11034.0,
        },
        sites: vec![
            site("Mariana Trench", 11.35, 142.2, 29.1, 34.6),
            site("Warm Pool", 0.0, 155.0, 29.8, 34.3),
            site("Niño 3.4", -5.0, -145.0, 27.2, 35.1),
            site("California Current", 35.0, -125.0, 14.6, 33.4),
        ],
    }
}

fn dataset_summary() -> DatasetSummary {
    DatasetSummary {
        measurement_count: 1247,
        float_count: 23,
        date_range: DateRange {
            start: "2024-01-01".to_string(),
            end: "2024-03-31".to_string(),
        },
        parameters: vec![
            "temperature".to_string(),
            "salinity".to_string(),
            "pressure".to_string(),
        ],
        measurements_by_parameter: vec![512, 498, 237],
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

//! Human-readable answer text.

use super::data::DomainData;

const GENERIC_REPLY: &str = "I've processed your request and prepared the analysis.";

/// Compose the answer text for a synthesized payload. Never empty.
pub fn compose(data: &DomainData) -> String {
    match data {
        DomainData::Anomalies(report) => {
            let s = &report.statistics;
            format!(
                "I found {} temperature anomalies in recent ARGO float data. \
                 The strongest warm anomaly reached +{:.1}°C and the strongest cold anomaly {:.1}°C \
                 ({:.0}% confidence). These unusual values are highlighted in the chart.",
                s.total_anomalies,
                s.max_positive,
                s.max_negative,
                s.confidence * 100.0
            )
        }
        DomainData::DepthProfile(p) => {
            let surface = p.temperatures.first().copied().unwrap_or_default();
            let bottom = p.temperatures.last().copied().unwrap_or_default();
            let max_depth = p.depths.last().copied().unwrap_or_default();
            format!(
                "Here is the temperature depth profile from float {} at {:.1}°N, {:.1}°E. \
                 Temperature falls from {:.1}°C at the surface to {:.1}°C at {:.0} m, \
                 with the sharpest drop through the thermocline between 50 and 300 m.",
                p.float_id, p.location.lat, p.location.lon, surface, bottom, max_depth
            )
        }
        DomainData::Trend(t) => {
            let first = t.years.first().copied().unwrap_or_default();
            let last = t.years.last().copied().unwrap_or_default();
            format!(
                "Annual mean ocean temperature shows a warming trend of {:.3}°C per year \
                 between {} and {} (R² = {:.2}).",
                t.trend_slope, first, last, t.r_squared
            )
        }
        DomainData::TemperatureSeries(s) => {
            let st = &s.statistics;
            format!(
                "Over the last {} days the average ocean temperature was {:.1}°C \
                 (σ = {:.1}°C, range {:.1}–{:.1}°C), reported by {} active floats with \
                 {:.0}% valid measurements.",
                s.dates.len(),
                st.mean,
                st.std,
                st.min,
                st.max,
                st.active_floats,
                st.valid_measurements * 100.0
            )
        }
        DomainData::Salinity(p) => {
            let st = &p.statistics;
            format!(
                "Salinity averages {:.1} PSU (σ = {:.1}) across the profile. \
                 The halocline sits near {:.0} m, where salinity peaks before easing at depth.",
                st.mean, st.std, st.halocline_depth
            )
        }
        DomainData::Currents(c) => {
            let st = &c.statistics;
            format!(
                "Currents across {} stations average {:.2} m/s, flowing predominantly \
                 toward {:.0}° (southwest).",
                c.velocities.len(),
                st.mean_velocity,
                st.predominant_direction
            )
        }
        DomainData::Atlantic(a) => format!(
            "The {} shows surface temperatures from {:.1}°C to {:.1}°C and salinity \
             from {:.1} to {:.1} PSU. Key features: {}.",
            a.region,
            a.temperature_range[0],
            a.temperature_range[1],
            a.salinity_range[0],
            a.salinity_range[1],
            a.characteristics.join(", ")
        ),
        DomainData::Pacific(p) => format!(
            "The {} covers {} with a mean depth of {:.0} m and a maximum of {:.0} m. \
             Key features: {}.",
            p.region,
            p.area,
            p.depth.mean,
            p.depth.max,
            p.characteristics.join(", ")
        ),
        DomainData::Summary(s) => format!(
            "I can help you explore ARGO ocean data. The current dataset holds {} measurements \
             from {} floats between {} and {}, covering {}. Ask about temperature, salinity, \
             currents or a specific ocean region.",
            s.measurement_count,
            s.float_count,
            s.date_range.start,
            s.date_range.end,
            s.parameters.join(", ")
        ),
        DomainData::External(_) => GENERIC_REPLY.to_string(),
    }
}

//! Follow-up prompts offered after each answer.

use super::intent::Intent;

pub fn suggestions_for(intent: Intent) -> [&'static str; 4] {
    match intent {
        Intent::TemperatureAnomaly => [
            "Show the temperature depth profile at these locations",
            "Compare anomalies with last year",
            "What caused the unusual warming in February?",
            "Show salinity data for the same region",
        ],
        Intent::TemperatureDepthProfile => [
            "Where is the thermocline in this profile?",
            "Show the salinity profile for the same float",
            "Compare with the seasonal average profile",
            "Show temperature anomalies in this region",
        ],
        Intent::TemperatureTrend => [
            "Show temperature anomalies for 2024",
            "Compare the trend with the Pacific Ocean",
            "Show the temperature depth profile",
            "How does salinity change over the same period?",
        ],
        Intent::TemperatureGeneric => [
            "Show temperature anomalies in this data",
            "Display the temperature depth profile",
            "Show the long-term temperature trend",
            "Show salinity data for the same region",
        ],
        Intent::Salinity => [
            "Show the temperature depth profile for comparison",
            "Where is the halocline deepest?",
            "Compare salinity in the Atlantic and Pacific",
            "Show ocean current velocity in this area",
        ],
        Intent::CurrentVelocity => [
            "Show temperature along the current path",
            "How strong are currents in the Atlantic?",
            "Show salinity data near these stations",
            "Display seasonal changes in current direction",
        ],
        Intent::RegionAtlantic => [
            "Show the Gulf Stream current velocity",
            "Compare Atlantic and Pacific salinity",
            "Show the Atlantic temperature trend",
            "Display ARGO floats in the North Atlantic",
        ],
        Intent::RegionPacific => [
            "Show Pacific temperature anomalies",
            "How deep is the Mariana Trench?",
            "Compare Pacific and Atlantic characteristics",
            "Show El Niño related temperature changes",
        ],
        Intent::Default => [
            "Show ocean temperature data",
            "Display a salinity depth profile",
            "Show ocean current velocity",
            "Tell me about the Atlantic Ocean",
        ],
    }
}

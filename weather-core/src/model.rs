//! Typed views over provider documents, used for terminal output.
//!
//! The gateway never touches these; it returns documents verbatim.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// US EPA air quality band reported under `air_quality["us-epa-index"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirQuality {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    Unknown,
}

impl AirQuality {
    pub fn from_epa_index(index: Option<i64>) -> Self {
        match index {
            Some(1) => AirQuality::Good,
            Some(2) => AirQuality::Moderate,
            Some(3) => AirQuality::UnhealthyForSensitiveGroups,
            Some(4) => AirQuality::Unhealthy,
            Some(5) => AirQuality::VeryUnhealthy,
            Some(6) => AirQuality::Hazardous,
            _ => AirQuality::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AirQuality::Good => "Good",
            AirQuality::Moderate => "Moderate",
            AirQuality::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AirQuality::Unhealthy => "Unhealthy",
            AirQuality::VeryUnhealthy => "Very Unhealthy",
            AirQuality::Hazardous => "Hazardous",
            AirQuality::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for AirQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub localtime: Option<String>,
}

impl Place {
    pub fn display_name(&self) -> String {
        join_place(&self.name, &self.region, &self.country)
    }
}

fn join_place(name: &str, region: &str, country: &str) -> String {
    [name, region, country]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSummary {
    pub location: Place,
    pub temperature_c: f64,
    pub condition: String,
    pub wind_kph: f64,
    pub gust_kph: Option<f64>,
    pub last_updated: Option<String>,
    pub air_quality: AirQuality,
}

impl CurrentSummary {
    pub fn from_document(doc: &Value) -> Result<Self> {
        let parsed =
            WaCurrentDoc::deserialize(doc).context("Failed to read current weather document")?;

        let epa_index = parsed
            .current
            .air_quality
            .as_ref()
            .and_then(|aq| aq.get("us-epa-index"))
            .and_then(Value::as_i64);

        Ok(Self {
            location: parsed.location,
            temperature_c: parsed.current.temp_c,
            condition: parsed.current.condition.text,
            wind_kph: parsed.current.wind_kph,
            gust_kph: parsed.current.gust_kph,
            last_updated: parsed.current.last_updated,
            air_quality: AirQuality::from_epa_index(epa_index),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub max_wind_kph: f64,
    pub total_precip_mm: f64,
    pub condition: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub location: Place,
    pub days: Vec<ForecastDay>,
}

impl ForecastSummary {
    pub fn from_document(doc: &Value) -> Result<Self> {
        let parsed = WaForecastDoc::deserialize(doc).context("Failed to read forecast document")?;

        let days = parsed
            .forecast
            .forecastday
            .into_iter()
            .map(|d| ForecastDay {
                date: d.date,
                min_temp_c: d.day.mintemp_c,
                max_temp_c: d.day.maxtemp_c,
                max_wind_kph: d.day.maxwind_kph,
                total_precip_mm: d.day.totalprecip_mm,
                condition: d.day.condition.text,
                sunrise: d.astro.as_ref().and_then(|a| a.sunrise.clone()),
                sunset: d.astro.and_then(|a| a.sunset),
            })
            .collect();

        Ok(Self { location: parsed.location, days })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl SearchHit {
    pub fn display_name(&self) -> String {
        join_place(&self.name, &self.region, &self.country)
    }

    pub fn from_document(doc: &Value) -> Result<Vec<Self>> {
        Vec::<SearchHit>::deserialize(doc).context("Failed to read search results document")
    }
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    wind_kph: f64,
    gust_kph: Option<f64>,
    condition: WaCondition,
    last_updated: Option<String>,
    air_quality: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WaCurrentDoc {
    location: Place,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    maxwind_kph: f64,
    #[serde(default)]
    totalprecip_mm: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaAstro {
    sunrise: Option<String>,
    sunset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
    astro: Option<WaAstro>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastDoc {
    location: Place,
    forecast: WaForecast,
}

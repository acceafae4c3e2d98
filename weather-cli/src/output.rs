use std::fmt::Write;

use anyhow::Result;
use serde_json::Value;
use weather_core::{
    Endpoint,
    model::{CurrentSummary, ForecastSummary, SearchHit},
};

pub fn render_current(doc: &Value) -> Result<String> {
    let s = CurrentSummary::from_document(doc)?;
    let mut out = String::new();

    writeln!(out, "{}", s.location.display_name())?;
    if let Some(localtime) = &s.location.localtime {
        writeln!(out, "  Local time:   {localtime}")?;
    }
    writeln!(out, "  Condition:    {}", s.condition)?;
    writeln!(out, "  Temperature:  {:.1} °C", s.temperature_c)?;
    match s.gust_kph {
        Some(gust) => writeln!(
            out,
            "  Wind:         {:.1} km/h (gusts {:.1} km/h)",
            s.wind_kph, gust
        )?,
        None => writeln!(out, "  Wind:         {:.1} km/h", s.wind_kph)?,
    }
    writeln!(out, "  Air quality:  {}", s.air_quality)?;
    if let Some(updated) = &s.last_updated {
        writeln!(out, "  Updated:      {updated}")?;
    }

    Ok(out)
}

pub fn render_forecast(doc: &Value) -> Result<String> {
    let s = ForecastSummary::from_document(doc)?;
    let mut out = String::new();

    writeln!(out, "{}", s.location.display_name())?;
    for day in &s.days {
        writeln!(
            out,
            "  {}  {:>5.1} / {:>5.1} °C  wind {:>5.1} km/h  rain {:>4.1} mm  {}",
            day.date.format("%a %d %b"),
            day.min_temp_c,
            day.max_temp_c,
            day.max_wind_kph,
            day.total_precip_mm,
            day.condition,
        )?;
        if let (Some(rise), Some(set)) = (&day.sunrise, &day.sunset) {
            writeln!(out, "               sunrise {rise}, sunset {set}")?;
        }
    }

    Ok(out)
}

pub fn render_search(doc: &Value) -> Result<String> {
    let hits = SearchHit::from_document(doc)?;
    if hits.is_empty() {
        return Ok("No matching locations.\n".to_string());
    }

    let mut out = String::new();
    for hit in &hits {
        writeln!(out, "{}  ({:.2},{:.2})", hit.display_name(), hit.lat, hit.lon)?;
    }

    Ok(out)
}

pub fn render_operations() -> String {
    Endpoint::all()
        .iter()
        .map(|e| format!("{:<10} {}\n", e.as_str(), e.path()))
        .collect()
}

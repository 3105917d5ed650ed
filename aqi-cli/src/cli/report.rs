//! Text and JSON rendering of command results

use std::fmt::Write;
use std::sync::Arc;

use anyhow::Result;
use aqi_core::{Assessment, Decimal, Pollutant, SubIndex};
use aqi_standards::Standard;
use serde::Serialize;

use super::OutputFormat;

#[derive(Serialize)]
struct IndexReport<'a> {
    standard: &'a str,
    #[serde(flatten)]
    assessment: &'a Assessment,
}

#[derive(Serialize)]
struct SubIndexReport<'a> {
    standard: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    #[serde(flatten)]
    sub_index: &'a SubIndex,
}

#[derive(Serialize)]
struct PollutantRow<'a> {
    pollutant: Pollutant,
    name: &'static str,
    unit: &'a str,
    precision: u32,
    min: Decimal,
    max: Decimal,
    max_aqi: u32,
}

#[derive(Serialize)]
struct StandardRow<'a> {
    name: &'a str,
    description: &'a str,
    pollutants: Vec<Pollutant>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(super) fn assessment(
    standard: &Standard,
    assessment: &Assessment,
    verbose: bool,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&IndexReport {
            standard: standard.name(),
            assessment,
        });
    }

    if !verbose {
        return Ok(format!("AQI {} ({})", assessment.aqi, standard.name()));
    }

    let mut out = String::new();
    writeln!(out, "{:<10} {:>14} {:<7} {:>5}", "POLLUTANT", "CONCENTRATION", "UNIT", "iAQI")?;
    for s in &assessment.sub_indices {
        writeln!(
            out,
            "{:<10} {:>14} {:<7} {:>5}",
            s.pollutant.name(),
            s.concentration.to_string(),
            standard.unit(s.pollutant).unwrap_or("-"),
            s.aqi.value()
        )?;
    }
    write!(
        out,
        "AQI {} ({}), dominant pollutant {}",
        assessment.aqi,
        standard.name(),
        assessment.dominant
    )?;
    Ok(out)
}

pub(super) fn sub_index(standard: &Standard, sub_index: &SubIndex, format: OutputFormat) -> Result<String> {
    let unit = standard.unit(sub_index.pollutant);

    match format {
        OutputFormat::Json => to_json(&SubIndexReport {
            standard: standard.name(),
            unit,
            sub_index,
        }),
        OutputFormat::Text => Ok(format!(
            "{} {} {} -> iAQI {} ({})",
            sub_index.pollutant,
            sub_index.concentration,
            unit.unwrap_or("-"),
            sub_index.aqi,
            standard.name()
        )),
    }
}

pub(super) fn pollutants(standard: &Standard, format: OutputFormat) -> Result<String> {
    let rows: Vec<PollutantRow<'_>> = standard
        .engine()
        .table()
        .iter()
        .map(|bp| PollutantRow {
            pollutant: bp.pollutant(),
            name: bp.pollutant().name(),
            unit: standard.unit(bp.pollutant()).unwrap_or("-"),
            precision: bp.precision(),
            min: bp.min_concentration(),
            max: bp.max_concentration(),
            max_aqi: bp.max_aqi(),
        })
        .collect();

    if format == OutputFormat::Json {
        return to_json(&rows);
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<8} {:<10} {:<7} {:>9} {:>10} {:>10} {:>7}",
        "ID", "NAME", "UNIT", "PRECISION", "MIN", "MAX", "MAX AQI"
    )?;
    for row in &rows {
        writeln!(
            out,
            "{:<8} {:<10} {:<7} {:>9} {:>10} {:>10} {:>7}",
            row.pollutant.id(),
            row.name,
            row.unit,
            row.precision,
            row.min.to_string(),
            row.max.to_string(),
            row.max_aqi
        )?;
    }
    Ok(out.trim_end().to_string())
}

pub(super) fn standards(standards: &[Arc<Standard>], format: OutputFormat) -> Result<String> {
    let rows: Vec<StandardRow<'_>> = standards
        .iter()
        .map(|s| StandardRow {
            name: s.name(),
            description: s.description(),
            pollutants: s.engine().table().pollutants().collect(),
        })
        .collect();

    if format == OutputFormat::Json {
        return to_json(&rows);
    }

    let mut out = String::new();
    for row in &rows {
        writeln!(out, "{:<6} {}", row.name, row.description)?;
    }
    Ok(out.trim_end().to_string())
}

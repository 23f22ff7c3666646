//! Terminal rendering of pace reports
//!
//! Produces the sectioned Input / HYROX / Training / Speed Repetitions
//! listing as tables, plain text or JSON.

use crate::calculator::{CalculationResponse, PaceReport};
use crate::config::OutputFormat;
use crate::threshold::TEST_DURATION_MINUTES;
use crate::zones::{Band, Zone};
use colored::*;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ZoneRow<'a> {
    #[tabled(rename = "Intensity Zone")]
    zone: &'a str,
    #[tabled(rename = "Pace (min/km)")]
    pace: &'a str,
}

#[derive(Tabled)]
struct IntervalRow<'a> {
    #[tabled(rename = "Distance")]
    distance: &'a str,
    #[tabled(rename = "Duration (mm:ss)")]
    duration: &'a str,
}

#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "Zone")]
    zone: &'static str,
    #[tabled(rename = "≤2600")]
    lower: String,
    #[tabled(rename = "2600–3400")]
    middle: String,
    #[tabled(rename = ">3400")]
    upper: String,
}

fn heading(title: &str, color: bool) -> String {
    let underline = "=".repeat(title.chars().count());
    if color {
        format!("{}\n{}", title.bold().cyan(), underline.as_str().dimmed())
    } else {
        format!("{}\n{}", title, underline)
    }
}

fn highlight(value: &str, color: bool) -> String {
    if color {
        value.green().bold().to_string()
    } else {
        value.to_string()
    }
}

/// Render a report in the requested format
pub fn render_report(report: &PaceReport, format: OutputFormat, color: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report, color)),
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(&CalculationResponse::Ok(report.clone())),
    }
}

/// Sectioned listing with zone and interval tables
pub fn render_table(report: &PaceReport, color: bool) -> String {
    let zone_rows: Vec<ZoneRow> = report
        .zones
        .iter()
        .map(|entry| ZoneRow {
            zone: &entry.label,
            pace: &entry.pace,
        })
        .collect();

    let interval_rows: Vec<IntervalRow> = report
        .speed_reps
        .intervals
        .iter()
        .map(|split| IntervalRow {
            distance: &split.distance,
            duration: &split.duration,
        })
        .collect();

    let mut zones_table = Table::new(zone_rows);
    zones_table.with(Style::rounded());
    let mut intervals_table = Table::new(interval_rows);
    intervals_table.with(Style::rounded());

    let sections = vec![
        heading("Input", color),
        format!("{:<24} {} m", distance_label(), report.input.distance),
        String::new(),
        heading("HYROX", color),
        format!("Race Pace (Single):      {}", highlight(&report.hyrox, color)),
        String::new(),
        heading("Training", color),
        zones_table.to_string(),
        String::new(),
        heading("Speed Repetitions", color),
        format!("Pace:                    {}", highlight(&report.speed_reps.pace, color)),
        intervals_table.to_string(),
        String::new(),
    ];
    sections.join("\n")
}

fn distance_label() -> String {
    format!("Max Distance {}min Run:", TEST_DURATION_MINUTES)
}

/// Plain two-column text without table borders or colors
pub fn render_text(report: &PaceReport) -> String {
    let mut out = Vec::new();

    out.push(format!("{:<26} {:>12}", distance_label(), report.input.distance));
    out.push(format!("{:<26} {:>12}", "HYROX Race Pace (Single):", report.hyrox));
    for entry in &report.zones {
        out.push(format!("{:<26} {:>12}", format!("{}:", entry.label), entry.pace));
    }
    out.push(format!("{:<26} {:>12}", "Speed Repetitions:", report.speed_reps.pace));
    for split in &report.speed_reps.intervals {
        out.push(format!("{:<26} {:>12}", format!("  {}:", split.distance), split.duration));
    }

    out.push(String::new());
    out.join("\n")
}

/// Pretty-printed JSON of a result or error record
pub fn render_json(response: &CalculationResponse) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

/// The band multiplier table
pub fn render_bands() -> String {
    let fmt = |band: Band, zone: Zone| format!("{:.2}", band.multipliers().get(zone));

    let rows: Vec<BandRow> = Zone::ALL
        .iter()
        .map(|&zone| BandRow {
            zone: zone.name(),
            lower: fmt(Band::Lower, zone),
            middle: fmt(Band::Middle, zone),
            upper: fmt(Band::Upper, zone),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

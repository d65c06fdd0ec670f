//! Chart export for presentation layers.
//!
//! Two shapes:
//!
//! ```text
//! Chart → export_json()  → one JSON document, hanzi labels resolved
//! Chart → export_text()  → a plain-text chart sheet
//! ```
//!
//! `Chart::to_json` serializes the typed structure as-is; the export here is
//! the flattened view a renderer wants.

use std::io::Write;

use serde::Serialize;

use crate::model::Branch;
use crate::plate::Guardian;
use crate::transmission::Pattern;
use crate::{Chart, Result};

/// Flattened, display-ready view of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSheet {
    pub year: String,
    pub day: String,
    pub lunar_month: u8,
    pub hour: String,
    pub is_day: bool,
    pub moon_general: String,
    pub noble: String,
    /// One row per earth position, in earth-plate order.
    pub positions: Vec<PositionRow>,
    /// `upper/lower`, first lesson first.
    pub lessons: Vec<String>,
    pub transmissions: [String; 3],
    pub patterns: Vec<String>,
    pub trace: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionRow {
    pub earth: String,
    pub heaven: String,
    pub guardian: String,
}

impl ChartSheet {
    pub fn from_chart(chart: &Chart) -> Self {
        let plate = chart.plate();
        let positions = Branch::ALL
            .into_iter()
            .map(|b| PositionRow {
                earth: b.hanzi().to_string(),
                heaven: plate.ascend(b).hanzi().to_string(),
                guardian: plate.guardian_at(b).hanzi().to_string(),
            })
            .collect();

        let t = chart.transmissions();
        Self {
            year: chart.year().to_string(),
            day: chart.day().to_string(),
            lunar_month: chart.lunar_month(),
            hour: chart.hour().hanzi().to_string(),
            is_day: chart.is_day(),
            moon_general: plate.moon_general().hanzi().to_string(),
            noble: plate.noble().hanzi().to_string(),
            positions,
            lessons: chart.lessons().all().iter().map(|l| l.to_string()).collect(),
            transmissions: t.branches().map(|b| b.hanzi().to_string()),
            patterns: t.patterns().iter().map(|&p| label(p)).collect(),
            trace: t.trace().iter().map(|m| m.hanzi().to_string()).collect(),
        }
    }
}

/// Write the flattened chart as JSON.
pub fn export_json(chart: &Chart, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &ChartSheet::from_chart(chart))?;
    writeln!(writer)?;
    Ok(())
}

/// Write a plain-text chart sheet.
pub fn export_text(chart: &Chart, writer: &mut dyn Write) -> Result<()> {
    let plate = chart.plate();
    let t = chart.transmissions();

    // Header
    writeln!(
        writer,
        "{}年 {}日 {}时 ({})",
        chart.year(),
        chart.day(),
        chart.hour(),
        if chart.is_day() { "昼" } else { "夜" }
    )?;
    writeln!(writer, "月将 {}  贵人 {}", plate.moon_general(), plate.noble())?;
    writeln!(writer)?;

    writeln!(writer, "天盘 {}", join(plate.heaven().iter().map(|b| b.hanzi())))?;
    writeln!(writer, "地盘 {}", join(Branch::ALL.iter().map(|b| b.hanzi())))?;
    writeln!(writer, "天将 {}", join(Branch::ALL.iter().map(|&b| short(plate.guardian_at(b)))))?;
    writeln!(writer)?;

    // Lessons print fourth to first, the way they are laid out on paper.
    let lessons = chart.lessons().all();
    writeln!(writer, "四课 {}", join(lessons.iter().rev().map(|l| l.upper.hanzi())))?;
    writeln!(
        writer,
        "     {}",
        join(lessons.iter().rev().map(|l| l.lower.to_string()))
    )?;
    writeln!(writer)?;

    for (name, branch) in ["初传", "中传", "末传"].into_iter().zip(t.branches()) {
        writeln!(writer, "{name} {branch} {}", plate.guardian_at(branch))?;
    }
    writeln!(writer, "课体 {}", join(t.patterns().iter().map(|&p| label(p))))?;
    Ok(())
}

fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<S> = items.into_iter().collect();
    let parts: Vec<&str> = items.iter().map(|s| s.as_ref()).collect();
    parts.join(" ")
}

/// Pattern name, prefixed with the day kind for the static chant.
fn label(pattern: Pattern) -> String {
    match pattern {
        Pattern::SelfReliant(day) | Pattern::SelfTrust(day) => {
            format!("{}{}", day.hanzi(), pattern.hanzi())
        }
        _ => pattern.hanzi().to_string(),
    }
}

/// First character of a guardian's name, for the compact ring.
fn short(guardian: Guardian) -> &'static str {
    let name = guardian.hanzi();
    name.char_indices().nth(1).map_or(name, |(i, _)| &name[..i])
}

use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::extraction::PdfMetadata;
use crate::models::{CvAnalysis, ScoreColor};

const BAR_WIDTH: usize = 20;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// JSON shape printed by `analyze --json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub analysis: &'a CvAnalysis,
    pub score_color: ScoreColor,
}

pub fn print_json(w: &mut dyn Write, analysis: &CvAnalysis) -> std::io::Result<()> {
    let report = JsonReport {
        analysis,
        score_color: ScoreColor::for_score(analysis.match_score.overall_score),
    };
    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)
}

/// Print the full human-readable report.
pub fn print_report(
    w: &mut dyn Write,
    pdf_path: &Path,
    metadata: &PdfMetadata,
    analysis: &CvAnalysis,
    color: ColorMode,
) -> std::io::Result<()> {
    print_header(w, pdf_path, metadata, color)?;
    print_scores(w, analysis, color)?;

    print_section(w, "Summary", color)?;
    writeln!(w, "  {}", analysis.summary)?;

    let advice = &analysis.formatting_advice;
    print_list(w, "Strengths", "+", &advice.strengths, color)?;
    print_list(w, "Weaknesses", "-", &advice.weaknesses, color)?;
    print_list(w, "Suggestions", "*", &advice.suggestions, color)?;

    print_section(w, "Recommendation", color)?;
    writeln!(w, "  {}", analysis.recommendation)?;
    Ok(())
}

fn print_header(
    w: &mut dyn Write,
    pdf_path: &Path,
    metadata: &PdfMetadata,
    color: ColorMode,
) -> std::io::Result<()> {
    let title = "CV Match Report";
    if color.enabled() {
        writeln!(w, "{}", title.bold())?;
    } else {
        writeln!(w, "{title}")?;
    }
    writeln!(w, "{}", "=".repeat(title.len()))?;

    let mut line = format!("Résumé: {}", pdf_path.display());
    if let Some(doc_title) = metadata.get("title") {
        line.push_str(&format!(" ({doc_title})"));
    }
    if let Some(pages) = metadata.get("pages") {
        let unit = if pages == "1" { "page" } else { "pages" };
        line.push_str(&format!(", {pages} {unit}"));
    }
    writeln!(w, "{line}")?;
    writeln!(w)
}

fn print_scores(w: &mut dyn Write, analysis: &CvAnalysis, color: ColorMode) -> std::io::Result<()> {
    for (label, value) in analysis.match_score.entries() {
        let bucket = ScoreColor::for_score(value);
        let figures = format!("{value:>5.1}%  {}", score_bar(value));
        writeln!(
            w,
            "{:<11} {}  {}",
            label,
            paint(&figures, bucket, color),
            bucket
        )?;
    }
    Ok(())
}

fn print_section(w: &mut dyn Write, title: &str, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", title.bold().underline())
    } else {
        writeln!(w, "{title}")
    }
}

fn print_list(
    w: &mut dyn Write,
    title: &str,
    marker: &str,
    items: &[String],
    color: ColorMode,
) -> std::io::Result<()> {
    print_section(w, title, color)?;
    if items.is_empty() {
        return writeln!(w, "  (none)");
    }
    for item in items {
        writeln!(w, "  {marker} {item}")?;
    }
    Ok(())
}

fn paint(text: &str, bucket: ScoreColor, color: ColorMode) -> String {
    if !color.enabled() {
        return text.to_string();
    }
    match bucket {
        ScoreColor::Green => text.green().to_string(),
        ScoreColor::Yellow => text.yellow().to_string(),
        ScoreColor::Orange => text.truecolor(255, 165, 0).to_string(),
        ScoreColor::Red => text.red().to_string(),
    }
}

fn score_bar(score: f64) -> String {
    let clamped = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

//! Rendering of survey results (JSON, CSV, text report)

use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::{bail, Result};
use minijinja::{context, Environment};
use serde::Serialize;

use crate::survey::SurveyResult;

const REPORT_TEMPLATE: &str = r#"Prism magnetic field report
===========================
{% if name %}Survey:      {{ name }}
{% endif %}Component:   {{ component }} (nT)
Generated:   {{ timestamp }}

Prisms:      {{ prism_count }}
Points:      {{ point_count }}
{% if point_count > 0 %}
Minimum:     {{ min }} nT at ({{ min_at }})
Maximum:     {{ max }} nT at ({{ max_at }})
Mean:        {{ mean }} nT
{% endif %}"#;

/// Output format for a survey result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Report,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "report" | "txt" | "text" => Ok(OutputFormat::Report),
            _ => bail!("Unknown output format: {}. Use: json, csv, or report", s),
        }
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    unit: &'static str,
    generated: String,
    #[serde(flatten)]
    result: &'a SurveyResult,
}

/// Render a survey result in the requested format
pub fn render(result: &SurveyResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Csv => render_csv(result),
        OutputFormat::Report => render_report(result),
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn render_json(result: &SurveyResult) -> Result<String> {
    let doc = JsonDocument {
        unit: "nT",
        generated: timestamp(),
        result,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn render_csv(result: &SurveyResult) -> Result<String> {
    let mut out = format!("easting,northing,vertical,{}_nT\n", result.component);
    for ([e, n, v], value) in result.points.iter().zip(&result.values) {
        writeln!(out, "{},{},{},{:e}", e, n, v, value)?;
    }
    Ok(out)
}

fn render_report(result: &SurveyResult) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("report", REPORT_TEMPLATE)?;
    let template = env.get_template("report")?;

    let points: Vec<[f64; 3]> = result.points.iter().collect();
    let extreme = |better: fn(f64, f64) -> bool| {
        result
            .values
            .iter()
            .enumerate()
            .fold(None, |acc: Option<(usize, f64)>, (i, &v)| match acc {
                Some((_, best)) if !better(v, best) => acc,
                _ => Some((i, v)),
            })
            .unwrap_or((0, 0.0))
    };
    let (min_i, min) = extreme(|a, b| a < b);
    let (max_i, max) = extreme(|a, b| a > b);
    let mean = if result.values.is_empty() {
        0.0
    } else {
        result.values.iter().sum::<f64>() / result.values.len() as f64
    };
    let location = |i: usize| {
        points
            .get(i)
            .map(|[e, n, v]| format!("{:.3}, {:.3}, {:.3}", e, n, v))
            .unwrap_or_default()
    };

    let rendered = template.render(context! {
        name => result.name.clone(),
        component => result.component.as_str(),
        timestamp => timestamp(),
        prism_count => result.prism_count,
        point_count => result.values.len(),
        min => format!("{:.6e}", min),
        max => format!("{:.6e}", max),
        mean => format!("{:.6e}", mean),
        min_at => location(min_i),
        max_at => location(max_i),
    })?;

    Ok(rendered)
}

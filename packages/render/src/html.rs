//! Single-file HTML territory page.
//!
//! The built-in page is a compiled askama template. A Jinja template supplied
//! at run time is rendered with `minijinja` against the same page model, plus
//! the raw `config`, `summary`, and `hospitals` values.

use askama::Template;
use serde::Serialize;
use territory_map_config::TerritoryConfig;
use territory_map_engine::{TerritoryReport, TerritorySummary};
use territory_map_facility_models::{Certification, ScoringMode, Segment, Tier};

use crate::RenderError;
use crate::view::{FacilityView, ReportDocument};

/// One headline figure above the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
    pub detail: String,
}

/// Pre-formatted table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlRow {
    pub rank: usize,
    pub name: String,
    pub location: String,
    pub certification: String,
    pub certification_color: String,
    pub score: u8,
    pub segment: String,
    pub tier: String,
    pub tier_label: String,
    pub strokes: String,
    pub beds: String,
    pub annualized_revenue: String,
    pub yoy: String,
    pub mt_eligible: String,
    pub travel: String,
    pub access: String,
    pub closest: String,
}

#[derive(Template, Serialize)]
#[template(path = "territory.html")]
pub struct TerritoryPage {
    pub territory_name: String,
    pub rep_name: String,
    pub rep_role: String,
    pub evaluation_date: String,
    pub mode_label: String,
    pub cards: Vec<SummaryCard>,
    pub rows: Vec<HtmlRow>,
    pub map_lat: f64,
    pub map_lng: f64,
    pub map_zoom: u8,
    /// Allow-listed report JSON, escaped for a `<script>` block.
    pub data_json: String,
}

/// Groups digits in threes: `1234567` becomes `"1,234,567"`.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[must_use]
pub fn format_currency(value: u64) -> String {
    format!("${}", format_thousands(value))
}

#[must_use]
pub fn format_minutes(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}

const fn mode_label(mode: ScoringMode) -> &'static str {
    match mode {
        ScoringMode::Commercial => "Commercial",
        ScoringMode::Infrastructure => "Infrastructure",
    }
}

fn row(view: &FacilityView) -> HtmlRow {
    let location = match (view.city.is_empty(), view.state.is_empty()) {
        (false, false) => format!("{}, {}", view.city, view.state),
        (false, true) => view.city.clone(),
        (true, _) => view.state.clone(),
    };

    HtmlRow {
        rank: view.rank.map_or(0, |r| r + 1),
        name: view.name.clone(),
        location,
        certification: view.certification.to_string(),
        certification_color: view.certification_color.to_string(),
        score: view.score,
        segment: view.segment.map(|s| s.to_string()).unwrap_or_default(),
        tier: view.tier.map(|t| t.to_string()).unwrap_or_default(),
        tier_label: view.tier_label.clone(),
        strokes: format_thousands(u64::from(view.strokes_per_year)),
        beds: format_thousands(u64::from(view.beds)),
        annualized_revenue: format_currency(view.annualized_revenue),
        yoy: format!("{:+.1}%", view.yoy_growth_pct),
        mt_eligible: format_thousands(view.mt_eligible),
        travel: if view.location_missing {
            "n/a".to_string()
        } else {
            format_minutes(view.travel_time_min)
        },
        access: view.access.map(|a| a.to_string()).unwrap_or_default(),
        closest: view.closest_team_member.clone(),
    }
}

fn cards(report: &TerritoryReport) -> Vec<SummaryCard> {
    let summary = &report.summary;
    let mut cards = vec![
        SummaryCard {
            label: "Facilities".to_string(),
            value: format_thousands(summary.facility_count as u64),
            detail: format!(
                "Tier 1: {} / Tier 2: {} / Tier 3: {}",
                summary.count_for_tier(Tier::One),
                summary.count_for_tier(Tier::Two),
                summary.count_for_tier(Tier::Three),
            ),
        },
        SummaryCard {
            label: "Average Score".to_string(),
            value: summary.average_score.to_string(),
            detail: Segment::all()
                .iter()
                .map(|s| format!("{s}: {}", summary.count_for_segment(*s)))
                .collect::<Vec<_>>()
                .join(" / "),
        },
        SummaryCard {
            label: "Certified Centers".to_string(),
            value: format_thousands(
                (summary.facility_count - summary.count_for_certification(Certification::None))
                    as u64,
            ),
            detail: Certification::all()
                .iter()
                .filter(|c| **c != Certification::None)
                .map(|c| format!("{c}: {}", summary.count_for_certification(*c)))
                .collect::<Vec<_>>()
                .join(" / "),
        },
    ];

    if report.mode == ScoringMode::Commercial {
        cards.push(SummaryCard {
            label: "Annualized Revenue".to_string(),
            value: format_currency(summary.total_annualized_revenue),
            detail: format!(
                "{:+.1}% vs prior {}",
                summary.territory_yoy_pct,
                format_currency(summary.total_prior_revenue)
            ),
        });
    }

    cards
}

/// Escapes JSON for embedding inside a `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

impl TerritoryPage {
    /// Builds the page model for a report.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if the embedded report cannot be
    /// serialized.
    pub fn new(report: &TerritoryReport, config: &TerritoryConfig) -> Result<Self, RenderError> {
        let document = ReportDocument::new(report, config);
        let data_json = script_safe(&serde_json::to_string(&document)?);

        Ok(Self {
            territory_name: config.territory_name.clone(),
            rep_name: config.rep_name.clone(),
            rep_role: config.rep_role.clone(),
            evaluation_date: report.evaluation_date.format("%B %-d, %Y").to_string(),
            mode_label: mode_label(report.mode).to_string(),
            cards: cards(report),
            rows: document.hospitals.iter().map(row).collect(),
            map_lat: report.summary.map_center.lat,
            map_lng: report.summary.map_center.lng,
            map_zoom: config.map_zoom,
            data_json,
        })
    }
}

/// Renders the HTML page for a report.
///
/// # Errors
///
/// Returns [`RenderError`] if serialization or template rendering fails.
pub fn render_html(
    report: &TerritoryReport,
    config: &TerritoryConfig,
) -> Result<String, RenderError> {
    Ok(TerritoryPage::new(report, config)?.render()?)
}

#[derive(Serialize)]
struct CustomContext<'a> {
    #[serde(flatten)]
    page: &'a TerritoryPage,
    config: &'a TerritoryConfig,
    summary: &'a TerritorySummary,
    hospitals: &'a [FacilityView],
}

/// Renders a report through a Jinja template supplied at run time.
///
/// The template is registered as `territory.html`, so output is HTML-escaped
/// unless a value is marked `|safe`.
///
/// # Errors
///
/// Returns [`RenderError::CustomTemplate`] if the template does not parse or
/// fails to render, and [`RenderError::Json`] if the embedded report cannot
/// be serialized.
pub fn render_custom_html(
    report: &TerritoryReport,
    config: &TerritoryConfig,
    template_source: &str,
) -> Result<String, RenderError> {
    let page = TerritoryPage::new(report, config)?;
    let document = ReportDocument::new(report, config);
    let context = CustomContext {
        page: &page,
        config,
        summary: &report.summary,
        hospitals: &document.hospitals,
    };

    let mut env = minijinja::Environment::new();
    env.add_template("territory.html", template_source)?;
    Ok(env.get_template("territory.html")?.render(&context)?)
}

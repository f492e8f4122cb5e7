//! Projection of the cached chart into a displayable view.

use crate::shared::{ChartResult, LunarDate};
use std::fmt;

/// Marker shown for a palace without stars.
pub const NO_STARS: &str = "None";
/// Display text for the empty cache.
pub const NO_CHART: &str = "No chart loaded.";

/// What the results screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    /// Nothing cached yet. A normal display state, not an error.
    Empty,
    Loaded {
        summary: Vec<SummaryRow>,
        /// Free-text summary from the service, if any.
        narrative: Option<String>,
        palaces: Vec<PalaceView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalaceView {
    pub index: u8,
    pub name: String,
    /// Star names joined with `", "`, or [`NO_STARS`].
    pub stars: String,
    pub theme: Option<String>,
}

impl PalaceView {
    /// Heading in the form `"1. 명궁"`.
    pub fn title(&self) -> String {
        format!("{}. {}", self.index, self.name)
    }
}

/// Builds the view for whatever the cache currently holds.
pub fn project(chart: Option<&ChartResult>) -> ChartView {
    let Some(chart) = chart else {
        return ChartView::Empty;
    };

    let mut summary = vec![
        row("Ming Gong", chart.ming_gong.to_string()),
        row("Guo Shu", chart.guo_shu.to_string()),
        row("Jami Position", chart.jami_position.to_string()),
    ];
    if !chart.jami_direction.is_empty() {
        summary.push(row("Jami Direction", chart.jami_direction.clone()));
    }
    if !chart.hour_branch_name.is_empty() {
        summary.push(row(
            "Hour Branch",
            format!("{} ({})", chart.hour_branch_name, chart.hour_branch),
        ));
    }
    if let Some(date) = &chart.lunar_date {
        summary.push(row("Lunar Date", lunar_date_text(date)));
    }

    let palaces = chart
        .palace_layout
        .iter()
        .map(|palace| PalaceView {
            index: palace.index,
            name: palace.name.clone(),
            stars: if palace.stars.is_empty() {
                NO_STARS.to_string()
            } else {
                palace.stars.join(", ")
            },
            theme: chart.palace_meta(palace.index).and_then(|m| m.theme.clone()),
        })
        .collect();

    let narrative = Some(chart.summary.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    ChartView::Loaded {
        summary,
        narrative,
        palaces,
    }
}

fn row(label: &'static str, value: String) -> SummaryRow {
    SummaryRow { label, value }
}

fn lunar_date_text(date: &LunarDate) -> String {
    let leap = if date.is_intercalation { " (leap)" } else { "" };
    format!("{:04}-{:02}-{:02}{}", date.year, date.month, date.day, leap)
}

impl fmt::Display for ChartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartView::Empty => writeln!(f, "{}", NO_CHART),
            ChartView::Loaded {
                summary,
                narrative,
                palaces,
            } => {
                writeln!(f, "Chart Summary")?;
                let width = summary.iter().map(|r| r.label.len()).max().unwrap_or(0);
                for r in summary {
                    writeln!(f, "  {:<width$}  {}", r.label, r.value, width = width)?;
                }
                if let Some(text) = narrative {
                    writeln!(f)?;
                    writeln!(f, "  {}", text)?;
                }
                writeln!(f)?;
                writeln!(f, "Palaces")?;
                for p in palaces {
                    match &p.theme {
                        Some(theme) => writeln!(f, "  {} ({})", p.title(), theme)?,
                        None => writeln!(f, "  {}", p.title())?,
                    }
                    writeln!(f, "     {}", p.stars)?;
                }
                Ok(())
            }
        }
    }
}

//! Histogram to bar-chart conversion
//!
//! Builds a figure description (bar series plus layout) that the dashboard
//! hands to its plotting front end as JSON. Nothing here renders anything.
//!
//! When several histograms are overlaid, the first one supplies the shared
//! x positions and the counter annotation.

use crate::error::Result;
use crate::types::HistogramRecord;
use serde::Serialize;

/// Background used when there is nothing to plot
pub const NO_DATA_BACKGROUND: &str = "#E6E6E6";

/// A histogram together with the collection it was read from
#[derive(Debug, Clone, Copy)]
pub struct LabelledHistogram<'a> {
    pub collection: &'a str,
    pub histogram: &'a HistogramRecord,
}

/// Presentation switches for [`bar_chart`]
#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    /// Explicit title; defaults to the first histogram's name
    pub title: Option<String>,

    /// Logarithmic y-axis
    pub y_log: bool,

    /// Label the x-axis with "(no data)" when there is nothing to plot
    pub alert_no_data: bool,

    /// Suppress the default title
    pub no_title: bool,
}

/// One bar trace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "bar")]
pub struct BarSeries {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorange: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub margin: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
}

/// Complete figure description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub data: Vec<BarSeries>,
    pub layout: Layout,
}

impl BarChart {
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Overlay `histograms` on one bar chart.
///
/// Fails only if the first histogram has invalid binning.
pub fn bar_chart(histograms: &[LabelledHistogram<'_>], options: &ChartOptions) -> Result<BarChart> {
    Ok(BarChart {
        data: series(histograms)?,
        layout: layout(histograms, options),
    })
}

fn series(histograms: &[LabelledHistogram<'_>]) -> Result<Vec<BarSeries>> {
    let Some(first) = histograms.first() else {
        return Ok(Vec::new());
    };

    let x = first.histogram.x_values()?;
    let text = first.histogram.counters_text();

    // Same histogram from several collections: tell the traces apart by collection
    let use_collection_names = histograms
        .iter()
        .all(|h| h.histogram.name == first.histogram.name);

    Ok(histograms
        .iter()
        .map(|h| BarSeries {
            name: if use_collection_names {
                h.collection.to_string()
            } else {
                h.histogram.name.clone()
            },
            x: x.clone(),
            y: h.histogram.bin_values.clone(),
            text: text.clone(),
        })
        .collect())
}

fn layout(histograms: &[LabelledHistogram<'_>], options: &ChartOptions) -> Layout {
    let has_data = !histograms.is_empty();

    let mut title = match (&options.title, histograms.first()) {
        (Some(title), _) if !title.is_empty() => Some(title.clone()),
        _ if options.no_title => None,
        (_, Some(first)) => Some(first.histogram.name.clone()),
        (_, None) => None,
    };
    if options.y_log {
        title = title.map(|t| format!("{} (Log)", t));
    }

    let margin = Margin {
        l: 30,
        r: 30,
        t: if title.is_none() { Some(50) } else { None },
    };

    let yaxis = options.y_log.then(|| Axis {
        axis_type: Some("log".to_string()),
        autorange: Some(true),
        title: None,
    });

    let xaxis = (!has_data && options.alert_no_data).then(|| Axis {
        axis_type: None,
        autorange: None,
        title: Some("(no data)".to_string()),
    });

    Layout {
        title,
        margin,
        xaxis,
        yaxis,
        plot_bgcolor: (!has_data).then(|| NO_DATA_BACKGROUND.to_string()),
    }
}

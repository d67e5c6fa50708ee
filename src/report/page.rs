use crate::data::locator::Category;
use crate::error::PipelineError;
use crate::report::dataset::RunReport;
use crate::report::render;

/// Chart canvas size inside the pages.
const CHART_WIDTH: u32 = 900;
const CHART_HEIGHT: u32 = 420;

/// Embedded page styles.
const STYLE: &str = "
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    margin: 20px;
    background-color: #f5f5f5;
}
h1 {
    color: #333;
}
.chart {
    background-color: white;
    box-shadow: 0 1px 3px rgba(0,0,0,0.1);
    padding: 10px;
    margin-bottom: 20px;
}
ul.runs {
    list-style: none;
    padding: 0;
}
ul.runs li {
    margin: 4px 0;
}
.footer {
    margin-top: 20px;
    font-size: 0.8em;
    color: #888;
    text-align: center;
}
";

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn footer() -> String {
    format!(
        "<div class=\"footer\">Generated {}</div>",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// Render one run's report as a self-contained HTML document with the three
/// charts embedded as inline SVG.
pub fn render_page(report: &RunReport) -> Result<String, PipelineError> {
    let title = escape_html(&report.title);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n"));

    for chart in &report.charts {
        html.push_str("<div class=\"chart\">\n");
        html.push_str(&render::render_svg(chart, CHART_WIDTH, CHART_HEIGHT)?);
        html.push_str("\n</div>\n");
    }

    html.push_str(&footer());
    html.push_str("\n</body>\n</html>\n");
    Ok(html)
}

/// One emitted run page, as listed on the index.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub category: Category,
    pub run_number: u32,
    pub page: String,
}

/// Render the index document linking every run page, grouped by category.
pub fn render_index(entries: &[IndexEntry]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Run Reports</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n<h1>Run Reports</h1>\n");

    for category in Category::ALL {
        let runs: Vec<&IndexEntry> = entries
            .iter()
            .filter(|entry| entry.category == category)
            .collect();
        if runs.is_empty() {
            continue;
        }
        html.push_str(&format!("<h2>{}</h2>\n<ul class=\"runs\">\n", category.label()));
        for entry in runs {
            html.push_str(&format!(
                "<li><a href=\"{page}\">{label} Run {run}</a></li>\n",
                page = escape_html(&entry.page),
                label = category.label(),
                run = entry.run_number,
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(&footer());
    html.push_str("\n</body>\n</html>\n");
    html
}

//! Render a [`DashboardView`] as a self-contained HTML page.
//!
//! Charts are drawn client-side by Plotly.js, loaded from its CDN. Chart data
//! is embedded as JSON, so the page works from a local file.

use std::path::Path;

use serde_json::{Value, json};

use crate::color::{BACKGROUND, LAND, TEXT};
use crate::error::DashboardError;
use crate::options::FilterOptions;
use crate::view::{BarChart, CountryMap, DashboardView, Fill, Orientation};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const PAGE_TITLE: &str = "My Movie Dashboard";

const STYLE: &str = "\
body { background: #1e1e1e; color: #f0f0f0; font-family: sans-serif; margin: 0 2rem 2rem; }
h1, h2 { font-weight: 600; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 1rem; }
.chart { min-height: 460px; }
.empty { color: #a0a0a0; font-style: italic; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #333333; padding: 0.3rem 0.6rem; text-align: left; }
details { margin: 0.5rem 0; }
code { color: #FFCC66; }
";

/// Build the full page.
pub fn render(view: &DashboardView, options: &FilterOptions) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{PAGE_TITLE}</title>\n"));
    out.push_str(&format!("<script src=\"{PLOTLY_CDN}\"></script>\n"));
    out.push_str(&format!("<style>\n{STYLE}</style>\n</head>\n<body>\n"));
    out.push_str(&format!("<h1>\u{1F3AC} {PAGE_TITLE}</h1>\n"));

    render_filters(&mut out, view, options);

    out.push_str("<h2>Summary</h2>\n");
    out.push_str(&format!("<p>Total movies watched: {}</p>\n", view.total));

    let sections: [(&str, &[&str]); 4] = [
        ("Release Years and Decades", &["years", "decades"]),
        ("Languages and Genres", &["languages", "genres"]),
        (
            "Cast and Crew",
            &["directors", "actors", "screenwriters", "cinematographers"],
        ),
        ("Movies by Country", &["countries"]),
    ];
    let mut scripts = Vec::new();
    for (heading, ids) in sections {
        out.push_str(&format!("<h2>{}</h2>\n<div class=\"grid\">\n", escape(heading)));
        for chart in ids.iter().filter_map(|id| view.chart(id)) {
            render_chart_slot(&mut out, &mut scripts, chart);
        }
        if heading == "Movies by Country" {
            render_map_slot(&mut out, &mut scripts, &view.country_map);
        }
        out.push_str("</div>\n");
    }

    render_movie_table(&mut out, view);

    out.push_str("<script>\n");
    for script in scripts {
        out.push_str(&script);
        out.push('\n');
    }
    out.push_str("</script>\n</body>\n</html>\n");
    out
}

/// Write the rendered page, creating parent directories.
pub fn write_page(path: &Path, html: &str) -> Result<(), DashboardError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn render_filters(out: &mut String, view: &DashboardView, options: &FilterOptions) {
    out.push_str("<h2>Filters</h2>\n");
    let active = view.selection.describe();
    if active.is_empty() {
        out.push_str("<p>No filters applied.</p>\n");
    } else {
        out.push_str("<ul>\n");
        for (name, value) in active {
            out.push_str(&format!("<li>{}: {}</li>\n", name, escape(&value)));
        }
        out.push_str("</ul>\n");
    }

    let available = [
        ("Countries", "--country", &options.countries),
        ("Decades", "--decade", &options.decades),
        ("Languages", "--language", &options.languages),
        ("Genres", "--genre", &options.genres),
    ];
    for (name, flag, values) in available {
        out.push_str(&format!(
            "<details><summary>{} ({}) <code>{}</code></summary><p>{}</p></details>\n",
            name,
            values.len(),
            flag,
            escape(&values.join(", "))
        ));
    }
}

fn render_chart_slot(out: &mut String, scripts: &mut Vec<String>, chart: &BarChart) {
    if chart.bars.is_empty() {
        out.push_str(&format!(
            "<div><h3>{}</h3><p class=\"empty\">No data available.</p></div>\n",
            escape(&chart.title)
        ));
        return;
    }
    let element = format!("chart-{}", chart.id);
    out.push_str(&format!("<div class=\"chart\" id=\"{element}\"></div>\n"));
    scripts.push(plot_call(&element, &bar_traces(chart), &bar_layout(chart)));
}

fn render_map_slot(out: &mut String, scripts: &mut Vec<String>, map: &CountryMap) {
    if map.counts.is_empty() {
        out.push_str("<div><p class=\"empty\">No country data available.</p></div>\n");
        return;
    }
    let element = "chart-country-map";
    out.push_str(&format!("<div class=\"chart\" id=\"{element}\"></div>\n"));
    scripts.push(plot_call(element, &map_traces(map), &map_layout(map)));
}

fn render_movie_table(out: &mut String, view: &DashboardView) {
    out.push_str("<h2>Watched Movies</h2>\n<table>\n");
    out.push_str("<tr><th>Title</th><th>Year</th><th>Directors</th><th>Country</th><th>Genres</th></tr>\n");
    for m in &view.movies {
        let year = m.year.map(|y| y.to_string()).unwrap_or_default();
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&m.title),
            year,
            escape(&m.directors),
            escape(&m.main_country),
            escape(&m.genres)
        ));
    }
    out.push_str("</table>\n");
}

fn bar_traces(chart: &BarChart) -> Value {
    let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
    let counts: Vec<usize> = chart.bars.iter().map(|b| b.count).collect();

    let marker = match &chart.fill {
        Fill::Solid(color) => json!({ "color": color }),
        Fill::Gradient(palette) => json!({
            "color": counts,
            "colorscale": palette.colorscale(),
            "showscale": false,
        }),
    };

    let (x, y, orientation) = match chart.orientation {
        Orientation::Vertical => (json!(labels), json!(counts), "v"),
        Orientation::Horizontal => (json!(counts), json!(labels), "h"),
    };

    json!([{
        "type": "bar",
        "x": x,
        "y": y,
        "orientation": orientation,
        "text": counts,
        "textposition": "outside",
        "textfont": { "color": TEXT },
        "cliponaxis": false,
        "marker": marker,
        "hovertemplate": "%{label}: %{value}<extra></extra>",
    }])
}

fn bar_layout(chart: &BarChart) -> Value {
    let mut layout = base_layout(&chart.title);
    match chart.orientation {
        Orientation::Vertical => {
            layout["xaxis"] = json!({ "type": "category" });
            layout["margin"] = json!({ "l": 60, "r": 40, "t": 60, "b": 60 });
        }
        Orientation::Horizontal => {
            layout["yaxis"] = json!({ "categoryorder": "total ascending" });
            layout["margin"] = json!({ "l": 150, "r": 40, "t": 60, "b": 60 });
        }
    }
    layout
}

fn map_traces(map: &CountryMap) -> Value {
    let countries: Vec<&str> = map.counts.iter().map(|c| c.label.as_str()).collect();
    let counts: Vec<usize> = map.counts.iter().map(|c| c.count).collect();
    json!([{
        "type": "choropleth",
        "locationmode": "country names",
        "locations": countries,
        "z": counts,
        "colorscale": map.palette.colorscale(),
        "showscale": false,
        "marker": { "line": { "color": BACKGROUND, "width": 0.5 } },
        "hovertemplate": "%{location}: %{z}<extra></extra>",
    }])
}

fn map_layout(map: &CountryMap) -> Value {
    let mut layout = base_layout(&map.title);
    layout["margin"] = json!({ "l": 0, "r": 0, "t": 50, "b": 0 });
    layout["geo"] = json!({
        "bgcolor": BACKGROUND,
        "showland": true,
        "landcolor": LAND,
        "lakecolor": BACKGROUND,
        "showcoastlines": true,
        "coastlinecolor": BACKGROUND,
        "showcountries": true,
        "countrycolor": BACKGROUND,
        "projection": { "type": "equirectangular" },
    });
    layout
}

fn base_layout(title: &str) -> Value {
    json!({
        "title": { "text": title, "font": { "color": TEXT } },
        "plot_bgcolor": BACKGROUND,
        "paper_bgcolor": BACKGROUND,
        "font": { "color": TEXT },
    })
}

fn plot_call(element: &str, data: &Value, layout: &Value) -> String {
    format!(
        "Plotly.newPlot({}, {}, {}, {{\"responsive\": true}});",
        script_json(&json!(element)),
        script_json(data),
        script_json(layout)
    )
}

/// JSON safe to embed inside a `<script>` element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

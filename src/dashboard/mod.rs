//! Dashboard tabs: statistics and quality.
//!
//! The statistics renderer computes its aggregates server-side and hands the
//! browser ready-made ApexCharts configurations; the page script only
//! instantiates them. When the charting library is absent the page degrades
//! to the KPI numbers plus a notice.

pub mod quality;
pub mod statistics;

pub use quality::{FEEDBACK_FORM_URL, render_quality};
pub use statistics::{RequestStats, SPARK_DONE, SPARK_IN_PROGRESS, fault_breakdown, timeline_series};

use jiff::civil::Date;
use serde_json::{Value, json};

use crate::types::Record;
use crate::utils::today;

/// Notice shown when the charting library failed to load.
pub const APEXCHARTS_MISSING_NOTICE: &str =
    "ApexCharts не подключен, графики не будут отображаться";

fn chart_theme() -> Value {
    json!({
        "mode": "dark",
        "monochrome": {"enabled": false},
        "background": "transparent",
        "foreColor": "#bfe8d8cc",
        "fontFamily": "inherit"
    })
}

/// JSON embedded into a script element. `<` is escaped so record content
/// can never close the script early.
fn json_for_script(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

/// Statistics tab renderer. Owns the chart state it emits; the reference
/// day is fixed at construction so one render sees one consistent window.
pub struct Dashboard {
    today: Date,
}

impl Dashboard {
    pub fn new() -> Self {
        Self { today: today() }
    }

    pub fn with_today(today: Date) -> Self {
        Self { today }
    }

    /// Full statistics tab: KPI cards, chart panels, and the bootstrap
    /// script carrying the chart configurations.
    pub fn render_statistics(&self, records: &[Record]) -> String {
        let stats = RequestStats::compute(records);
        let body = format!(
            "<div class=\"grid grid--3\">\
             <div class=\"card card--inner kpi-card\">\
             <div class=\"kpi__label\">Выполнено заявок</div>\
             <div class=\"kpi__flex\">\
             <div class=\"kpi__value\">{done}</div>\
             <div id=\"chartSpark1\" class=\"kpi__chart\"></div>\
             </div></div>\
             <div class=\"card card--inner kpi-card\">\
             <div class=\"kpi__label\">В работе</div>\
             <div class=\"kpi__flex\">\
             <div class=\"kpi__value\">{in_progress}</div>\
             <div id=\"chartSpark2\" class=\"kpi__chart\"></div>\
             </div></div>\
             <div class=\"card card--inner kpi-card\">\
             <div class=\"kpi__label\">Среднее время</div>\
             <div class=\"kpi__flex\">\
             <div class=\"kpi__value\">{avg}</div>\
             <div class=\"kpi__hint\">ч. на заявку</div>\
             </div></div></div>\
             <div class=\"grid grid--2\" style=\"margin-top:12px;\">\
             <div class=\"card card--inner\">\
             <h3 class=\"h3\">Динамика заявок (7 дней)</h3>\
             <div id=\"chartTimeline\" style=\"min-height: 280px;\"></div>\
             </div>\
             <div class=\"card card--inner\">\
             <h3 class=\"h3\">Типы неисправностей</h3>\
             <div id=\"chartFaults\" style=\"min-height: 280px; display:flex; \
             justify-content:center; align-items:center;\"></div>\
             </div></div>",
            done = stats.done,
            in_progress = stats.in_progress,
            avg = stats.avg_display(),
        );
        format!("{body}{}", self.chart_script(records))
    }

    fn chart_script(&self, records: &[Record]) -> String {
        let configs = json_for_script(&self.chart_configs(records));
        let notice = json_for_script(&Value::String(APEXCHARTS_MISSING_NOTICE.to_string()));
        format!(
            "<script>\n\
             (function () {{\n\
             var configs = {configs};\n\
             if (!window.ApexCharts) {{\n\
             var toast = document.getElementById('toast');\n\
             if (toast) {{\n\
             toast.textContent = {notice};\n\
             toast.hidden = false;\n\
             setTimeout(function () {{ toast.hidden = true; }}, 2600);\n\
             }}\n\
             return;\n\
             }}\n\
             new ApexCharts(document.querySelector('#chartSpark1'), configs.spark1).render();\n\
             new ApexCharts(document.querySelector('#chartSpark2'), configs.spark2).render();\n\
             new ApexCharts(document.querySelector('#chartTimeline'), configs.timeline).render();\n\
             new ApexCharts(document.querySelector('#chartFaults'), configs.faults).render();\n\
             }})();\n\
             </script>"
        )
    }

    fn chart_configs(&self, records: &[Record]) -> Value {
        let timeline: Vec<Value> = timeline_series(records, self.today)
            .into_iter()
            .map(|(x, y)| json!({"x": x, "y": y}))
            .collect();
        let faults = fault_breakdown(records);
        let fault_labels: Vec<&str> = faults.iter().map(|(name, _)| name.as_str()).collect();
        let fault_values: Vec<u64> = faults.iter().map(|(_, count)| *count).collect();

        json!({
            "spark1": {
                "series": [{"data": SPARK_DONE}],
                "chart": {"type": "area", "height": 50, "width": 100, "sparkline": {"enabled": true}},
                "stroke": {"curve": "smooth", "width": 2},
                "fill": {"opacity": 0.2},
                "colors": ["#30d6a0"],
                "tooltip": {"fixed": {"enabled": false}, "x": {"show": false}, "marker": {"show": false}}
            },
            "spark2": {
                "series": [{"data": SPARK_IN_PROGRESS}],
                "chart": {"type": "bar", "height": 50, "width": 100, "sparkline": {"enabled": true}},
                "colors": ["#ffc14f"],
                "plotOptions": {"bar": {"borderRadius": 3, "columnWidth": "60%"}},
                "tooltip": {"fixed": {"enabled": false}, "x": {"show": false}}
            },
            "timeline": {
                "series": [{"name": "Заявок", "data": timeline}],
                "chart": {"type": "area", "height": 280, "background": "transparent", "toolbar": {"show": false}, "animations": {"enabled": true}},
                "colors": ["#10b981"],
                "fill": {"type": "gradient", "gradient": {"shadeIntensity": 1, "opacityFrom": 0.4, "opacityTo": 0.05, "stops": [0, 100]}},
                "dataLabels": {"enabled": false},
                "stroke": {"curve": "smooth", "width": 2},
                "xaxis": {"type": "category", "axisBorder": {"show": false}, "axisTicks": {"show": false}},
                "yaxis": {"show": false},
                "grid": {"borderColor": "#1e5b46", "strokeDashArray": 4},
                "theme": chart_theme()
            },
            "faults": {
                "series": fault_values,
                "labels": fault_labels,
                "chart": {"type": "donut", "height": 280, "background": "transparent"},
                "colors": ["#10b981", "#30d6a0", "#ffc14f", "#ff4f6d", "#8d99ae"],
                "plotOptions": {"pie": {"donut": {"size": "70%", "labels": {"show": true, "total": {"show": true, "label": "Всего", "color": "#eafff6"}}}}},
                "stroke": {"show": false},
                "dataLabels": {"enabled": false},
                "legend": {"position": "bottom", "horizontalAlign": "center", "fontSize": "13px"},
                "theme": chart_theme()
            }
        })
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

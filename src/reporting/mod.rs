//! Human-facing result lines.
//!
//! The pipeline hands every successful [`Summary`] to a [`ResultLogger`]. The
//! default implementation writes through the `log` facade so results land in
//! the same stream (plain or JSON) as the rest of the application output.

use colored::*;
use log::info;

use crate::config::LogFormat;
use crate::geolocation::Summary;

/// Log target result lines are written under.
pub const RESULT_TARGET: &str = "domain_location::result";

/// Receives one summary per successful lookup.
pub trait ResultLogger: Send + Sync {
    /// Records `summary` under `label` for `subject` (the full target URL).
    fn result(&self, label: &str, summary: &Summary, subject: &str);
}

/// [`ResultLogger`] writing `info` lines through the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleResultLogger {
    format: LogFormat,
}

impl ConsoleResultLogger {
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }
}

impl ResultLogger for ConsoleResultLogger {
    fn result(&self, label: &str, summary: &Summary, subject: &str) {
        info!(target: RESULT_TARGET, "{}", format_result(self.format, label, summary, subject));
    }
}

/// Renders a result line in the given format.
///
/// `Json` embeds the summary object so log shippers can parse it back out;
/// `Plain` renders a single colored line.
pub fn format_result(format: LogFormat, label: &str, summary: &Summary, subject: &str) -> String {
    match format {
        LogFormat::Json => serde_json::json!({
            "label": label,
            "subject": subject,
            "summary": summary,
        })
        .to_string(),
        LogFormat::Plain => {
            let locality = [&summary.city_name, &summary.region_name, &summary.zip_code]
                .into_iter()
                .filter(|part| !part.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let place = if locality.is_empty() {
                summary.country_name.clone()
            } else {
                format!("{locality}, {}", summary.country_name)
            };
            format!(
                "{} {} {} ({:.4}, {:.4})",
                label.bold(),
                subject.cyan(),
                place,
                summary.latitude,
                summary.longitude
            )
        }
    }
}

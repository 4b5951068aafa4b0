use std::io;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, ValueEnum};
use log::{info, warn};

use checkin_resumen::checkins::payload::{build_payload, Estado, ListaPayload};
use checkin_resumen::checkins::resumen::{grand_total, sort_by_area, to_tsv, SortOrder};
use checkin_resumen::checkins::sections::split_sections;
use checkin_resumen::date::{is_sunday, report_date_from_name};
use checkin_resumen::fileio::{read_report_from, read_report_text, write_text};
use checkin_resumen::text_tools::TextFormat;
use checkin_resumen::{classify_with, CountingPolicy, Error, ReportConfig, ServiceKey};

/// Counts check-ins per area and service from the extracted text of a
/// Sunday check-in report
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct ResumenApp {
    /// extracted report text; read from stdin when omitted
    input: Option<PathBuf>,
    /// TOML file overriding the service and area tables
    #[arg(long)]
    config: Option<PathBuf>,
    /// only report this service
    #[arg(long, value_enum, ignore_case = true)]
    service: Option<ServiceKey>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,
    #[arg(long, value_enum, default_value_t = SortOrder::Asc)]
    sort: SortOrder,
    /// casing of area names in tsv output
    #[arg(long, value_enum, default_value_t = TextFormat::Capitalize)]
    text_format: TextFormat,
    /// overrides the counting policy of the configuration
    #[arg(long, value_enum)]
    counting: Option<CountingPolicy>,
    /// write here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// print the configured area names and exit
    #[arg(long)]
    list_areas: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// one tab-separated table per service
    Tsv,
    /// the per-service result map
    Json,
    /// one list payload per service
    Payload,
}

impl ResumenApp {
    fn run(self) -> Result<(), Error> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };
        if let Some(counting) = self.counting {
            config.counting = counting;
        }

        if self.list_areas {
            return self.emit(config.areas.area_names().join("\n"));
        }

        let text = match &self.input {
            Some(path) => read_report_text(path)?,
            None => read_report_from(io::stdin().lock())?,
        };

        let nombre = self
            .input
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stdin".to_string());
        let fecha = match report_date_from_name(&nombre) {
            Some(date) => {
                if !is_sunday(date) {
                    warn!("report date {} is not a Sunday", date);
                }
                date
            }
            None => Local::now().date_naive(),
        };

        let sections = split_sections(&text);
        if sections.is_empty() {
            warn!("no 'Grouped by Time: Sunday <time>' headings found; check the document");
        } else {
            info!("{} sections in '{}'", sections.len(), nombre);
        }

        let mut resumen = classify_with(&text, &config);
        for key in ServiceKey::ALL {
            sort_by_area(resumen.get_mut(key), self.sort);
        }

        let keys: Vec<ServiceKey> = match self.service {
            Some(key) => vec![key],
            None => ServiceKey::ALL.to_vec(),
        };

        let output = match self.format {
            OutputFormat::Tsv => {
                let mut out = String::new();
                for key in &keys {
                    let rows = resumen.get(*key);
                    let (total, late) = grand_total(rows);
                    out.push_str(&format!("{}\n", key.label()));
                    out.push_str(&to_tsv(rows, config.services.get(*key), self.text_format));
                    out.push_str(&format!("Total\t{}\t{}\n\n", total, late));
                }
                out
            }
            OutputFormat::Json => match self.service {
                Some(key) => serde_json::to_string_pretty(resumen.get(key))?,
                None => serde_json::to_string_pretty(&resumen)?,
            },
            OutputFormat::Payload => {
                let fecha = fecha.format("%Y-%m-%d").to_string();
                let payloads: Vec<ListaPayload> = keys
                    .iter()
                    .map(|key| {
                        build_payload(
                            &format!("{} {}", nombre, key),
                            &fecha,
                            resumen.get(*key),
                            Estado::Procesado,
                        )
                    })
                    .collect();
                serde_json::to_string_pretty(&payloads)?
            }
        };

        self.emit(output)
    }

    fn emit(&self, mut output: String) -> Result<(), Error> {
        if !output.ends_with('\n') {
            output.push('\n');
        }

        match &self.out {
            Some(path) => {
                write_text(path, &output)?;
                info!("wrote {}", path.display());
            }
            None => print!("{}", output),
        }
        Ok(())
    }
}

fn main() {
    env_logger::init();
    let app = ResumenApp::parse();
    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

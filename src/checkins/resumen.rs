//! resumen.rs
//!
//! Result types of a classification run and the helpers consumers use to
//! present them.
//!
//! # Overview
//!
//! - **`AreaResumen`**: Total and late arrivals of one area in one service.
//! - **`ServiceResumenes`**: The per-service lists, keyed by
//!   [`ServiceKey`]. Lists are in first-seen order; nothing is sorted or
//!   zero-filled.
//! - **`sort_by_area(rows, order)`**: Accent- and case-insensitive ordering
//!   by area name.
//! - **`grand_total(rows)`**: Sums over all areas.
//! - **`to_tsv(rows, service)`**: Tab-separated table with a header row,
//!   ready for a clipboard or a spreadsheet.

use serde::{Deserialize, Serialize};

use super::services::{ServiceKey, ServiceTimeConfig};
use crate::text_tools::{apply_text_format, normalize, TextFormat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaResumen {
    pub area: String,
    pub total: u32,
    /// Never greater than `total`.
    pub late_count: u32,
}

impl AreaResumen {
    pub fn new(area: &str) -> Self {
        AreaResumen {
            area: area.to_string(),
            total: 0,
            late_count: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResumenes {
    #[serde(rename = "SUN_8A")]
    pub sun_8a: Vec<AreaResumen>,
    #[serde(rename = "SUN_10A")]
    pub sun_10a: Vec<AreaResumen>,
    #[serde(rename = "SUN_12P")]
    pub sun_12p: Vec<AreaResumen>,
}

impl ServiceResumenes {
    pub fn get(&self, key: ServiceKey) -> &[AreaResumen] {
        match key {
            ServiceKey::Sun8a => &self.sun_8a,
            ServiceKey::Sun10a => &self.sun_10a,
            ServiceKey::Sun12p => &self.sun_12p,
        }
    }

    pub fn get_mut(&mut self, key: ServiceKey) -> &mut Vec<AreaResumen> {
        match key {
            ServiceKey::Sun8a => &mut self.sun_8a,
            ServiceKey::Sun10a => &mut self.sun_10a,
            ServiceKey::Sun12p => &mut self.sun_12p,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceKey, &[AreaResumen])> {
        ServiceKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }

    /// `true` when no service has any area.
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, rows)| rows.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sorts rows by area name. Accents and case are ignored (`Cámaras` sorts
/// next to `Camaras`); the raw name breaks ties.
pub fn sort_by_area(rows: &mut [AreaResumen], order: SortOrder) {
    rows.sort_by_cached_key(|r| (normalize(&r.area), r.area.clone()));
    if order == SortOrder::Desc {
        rows.reverse();
    }
}

/// `(total, late)` summed over `rows`.
pub fn grand_total(rows: &[AreaResumen]) -> (u32, u32) {
    rows.iter()
        .fold((0, 0), |(t, l), r| (t + r.total, l + r.late_count))
}

/// Renders `rows` as TSV with the `Área / Total voluntarios / <late label>`
/// header. Area names go through `format` first.
pub fn to_tsv(rows: &[AreaResumen], service: &ServiceTimeConfig, format: TextFormat) -> String {
    let mut out = format!("Área\tTotal voluntarios\t{}\n", service.late_label());
    for r in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            apply_text_format(&r.area, format),
            r.total,
            r.late_count
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkins::services::SERVICE_TIMES;

    fn row(area: &str, total: u32, late: u32) -> AreaResumen {
        AreaResumen {
            area: area.to_string(),
            total,
            late_count: late,
        }
    }

    #[test]
    fn test_sort_by_area() {
        let mut rows = vec![row("Sonido", 1, 0), row("Atmósfera", 2, 1), row("Cámaras", 1, 1), row("bienvenida", 3, 0)];
        sort_by_area(&mut rows, SortOrder::Asc);
        let names: Vec<&str> = rows.iter().map(|r| r.area.as_str()).collect();
        assert_eq!(names, vec!["Atmósfera", "bienvenida", "Cámaras", "Sonido"]);

        sort_by_area(&mut rows, SortOrder::Desc);
        assert_eq!(rows[0].area, "Sonido");
        assert_eq!(rows[3].area, "Atmósfera");
    }

    #[test]
    fn test_grand_total() {
        let rows = vec![row("A", 3, 1), row("B", 4, 2)];
        assert_eq!(grand_total(&rows), (7, 3));
        assert_eq!(grand_total(&[]), (0, 0));
    }

    #[test]
    fn test_to_tsv() {
        let cfg = SERVICE_TIMES.get(ServiceKey::Sun10a);
        let tsv = to_tsv(&[row("sala verde", 2, 1)], cfg, TextFormat::Capitalize);
        assert_eq!(tsv, "Área\tTotal voluntarios\tLlegaron después de 9:30am\nSala Verde\t2\t1\n");
    }

    #[test]
    fn test_service_map_json_shape() {
        let mut res = ServiceResumenes::default();
        assert!(res.is_empty());
        res.get_mut(ServiceKey::Sun8a).push(row("Contabilidad", 1, 0));
        assert!(!res.is_empty());
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "SUN_8A": [{"area": "Contabilidad", "total": 1, "lateCount": 0}],
                "SUN_10A": [],
                "SUN_12P": []
            })
        );
    }
}

//! payload.rs
//!
//! Shapes one service's results into the list record a report archive
//! stores: a name, a date, a processing state and one detail row per area.

use serde::{Deserialize, Serialize};

use super::resumen::AreaResumen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Estado {
    #[default]
    Procesado,
    Pendiente,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detalle {
    pub area: String,
    pub total_voluntarios: u32,
    /// Arrivals after the late threshold.
    pub post_vios: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl Detalle {
    /// Attaches a note; blank notes are dropped, others trimmed.
    pub fn with_observaciones(mut self, note: &str) -> Self {
        let note = note.trim();
        self.observaciones = if note.is_empty() {
            None
        } else {
            Some(note.to_string())
        };
        self
    }
}

impl From<&AreaResumen> for Detalle {
    fn from(r: &AreaResumen) -> Self {
        Detalle {
            area: r.area.clone(),
            total_voluntarios: r.total,
            post_vios: r.late_count,
            observaciones: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListaPayload {
    pub nombre: String,
    /// `YYYY-MM-DD`
    pub fecha: String,
    pub estado: Estado,
    pub detalles: Vec<Detalle>,
}

/// Shapes one service's rows into a list payload. Each row becomes a
/// `Detalle` with no observations; the rows keep their order.
///
/// # Arguments
///
/// * `nombre` - The list name.
/// * `fecha` - The report date as `YYYY-MM-DD`.
/// * `rows` - The classified rows of one service.
/// * `estado` - The processing state to record.
pub fn build_payload(nombre: &str, fecha: &str, rows: &[AreaResumen], estado: Estado) -> ListaPayload {
    ListaPayload {
        nombre: nombre.to_string(),
        fecha: fecha.to_string(),
        estado,
        detalles: rows.iter().map(Detalle::from).collect(),
    }
}

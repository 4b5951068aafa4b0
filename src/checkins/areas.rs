//! areas.rs
//!
//! Maps organizational path strings found in the report
//! (`Voluntarios CDV > Producción Lince > Sonido`) to short area names
//! (`Sonido`).
//!
//! Matching is done on normalized text (see [`crate::text_tools::normalize`]).
//! Among all patterns contained in a block, the longest pattern wins, so a
//! sub-path beats its parent path. Ties go to the entry listed first.
//! Several patterns may share one area name.

use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::text_tools::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaPatternEntry {
    /// Path prefix exactly as the report prints it.
    pub pattern: String,
    /// Display name of the area.
    #[serde(rename = "name")]
    pub area: String,
}

impl AreaPatternEntry {
    pub fn new(pattern: &str, area: &str) -> Self {
        AreaPatternEntry {
            pattern: pattern.to_string(),
            area: area.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AreaPatternTable {
    entries: Vec<AreaPatternEntry>,
    /// (entry index, normalized pattern), longest written pattern first.
    by_length: Vec<(usize, String)>,
    block_prefixes: Vec<String>,
}

/// Top-level path prefixes that start a new area block.
pub const DEFAULT_BLOCK_PREFIXES: [&str; 2] = ["Voluntarios CDV > ", "Kids > "];

const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("Voluntarios CDV > Alabanzas >", "Alabanza"),
    ("Voluntarios CDV > Alabanzas > Asistente de equipo", "Asistente de equipo"),
    ("Voluntarios CDV > Producción Lince > Atmósfera", "Atmósfera"),
    ("Voluntarios CDV > CDV LINCE > Velover", "Velover"),
    ("Voluntarios CDV > CDV LINCE > Equipo Bienvenida", "Bienvenida"),
    ("Voluntarios CDV > Producción Lince > Cámaras", "Cámaras"),
    ("Voluntarios CDV > Contabilidad", "Contabilidad"),
    ("Voluntarios CDV > CDV LINCE > Crecer", "Crecer"),
    ("Voluntarios CDV > CDV LINCE > Dedicaciones", "Dedicaciones"),
    ("Voluntarios CDV > Eventos > Registro", "Registro"),
    ("Voluntarios CDV > Voluntario ED", "ED"),
    ("Voluntarios CDV > CDV LINCE > Equipo Médico", "Equipo Médico"),
    ("Voluntarios CDV > CDV LINCE > Fin de semana inolvidable", "Fin de semana Inolvidable"),
    ("Voluntarios CDV > CDV LINCE > Hombres CDV", "Hombres CDV"),
    ("Voluntarios CDV > CDV LINCE > Informes", "Informes"),
    ("Voluntarios CDV > Kids Voluntarios", "Kids"),
    ("Voluntarios CDV > Eventos > Logística", "Logística"),
    ("Voluntarios CDV > Producción Lince > Luces", "Luces"),
    ("Voluntarios CDV > CDV LINCE > Mantenimiento", "Mantenimiento"),
    ("Voluntarios CDV > CDV LINCE > Matrimonios", "Matrimonios"),
    ("Voluntarios CDV > Producción Lince > Producción", "Producción"),
    ("Voluntarios CDV > CDV LINCE > Recursos", "Recursos"),
    ("Voluntarios CDV > CDV LINCE > Reps", "Reps"),
    ("Voluntarios CDV > Eventos > Sala Verde", "Sala Verde"),
    ("Voluntarios CDV > CDV LINCE > Seguridad", "Seguridad"),
    ("Voluntarios CDV > CDV LINCE > Servolución", "Servolución"),
    ("Voluntarios CDV > Producción Lince > Sonido", "Sonido"),
    ("Voluntarios CDV > Producción Lince > Voluntario", "Voluntario"),
    ("Voluntarios CDV > Equipo ministerial > Líder de Servicio", "Líder de Servicio"),
    ("Voluntarios CDV > Equipo ministerial > IDL", "IDL"),
    ("Voluntarios CDV > Producción Lince > Visuales", "Visuales"),
    ("Voluntarios CDV > CDV LINCE > Grupos pequeños", "Grupos pequeños"),
    ("Voluntarios CDV > Comunicaciones > Comms", "Comms"),
];

/// Built-in area table.
pub static AREA_PATTERNS: Lazy<AreaPatternTable> = Lazy::new(|| {
    let entries = DEFAULT_PATTERNS
        .iter()
        .map(|(p, a)| AreaPatternEntry::new(p, a))
        .collect();
    let prefixes = DEFAULT_BLOCK_PREFIXES.iter().map(|p| p.to_string()).collect();
    AreaPatternTable::build(entries, prefixes)
});

impl AreaPatternTable {
    /// Builds a table from `entries` and the block prefixes that delimit
    /// area blocks. Entries whose pattern normalizes to nothing are dropped,
    /// since they would match every block.
    pub fn new(
        entries: Vec<AreaPatternEntry>,
        block_prefixes: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let table = Self::build(entries, block_prefixes);
        if table.by_length.is_empty() {
            return Err(ConfigError::EmptyAreaTable);
        }
        if table.block_prefixes.is_empty() {
            return Err(ConfigError::NoBlockPrefixes);
        }
        Ok(table)
    }

    fn build(entries: Vec<AreaPatternEntry>, block_prefixes: Vec<String>) -> Self {
        let mut by_length: Vec<(usize, String)> = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let key = normalize(&entry.pattern);
            if key.is_empty() {
                warn!("ignoring area pattern with no text for '{}'", entry.area);
                continue;
            }
            by_length.push((idx, key));
        }
        // stable: equal lengths keep table order
        by_length.sort_by(|a, b| {
            let la = entries[a.0].pattern.chars().count();
            let lb = entries[b.0].pattern.chars().count();
            lb.cmp(&la)
        });
        let block_prefixes = block_prefixes.into_iter().filter(|p| !p.is_empty()).collect();
        AreaPatternTable {
            entries,
            by_length,
            block_prefixes,
        }
    }

    pub fn entries(&self) -> &[AreaPatternEntry] {
        &self.entries
    }

    pub fn block_prefixes(&self) -> &[String] {
        &self.block_prefixes
    }

    /// Area name for a block whose normalized text is `normalized_block`.
    pub fn match_normalized(&self, normalized_block: &str) -> Option<&AreaPatternEntry> {
        self.by_length
            .iter()
            .find(|(_, key)| normalized_block.contains(key.as_str()))
            .map(|(idx, _)| &self.entries[*idx])
    }

    /// Area entry for raw block text, or `None` when no pattern occurs in it.
    pub fn match_block(&self, block: &str) -> Option<&AreaPatternEntry> {
        self.match_normalized(&normalize(block))
    }

    /// Distinct area names in table order.
    pub fn area_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for e in &self.entries {
            if !names.contains(&e.area.as_str()) {
                names.push(&e.area);
            }
        }
        names
    }
}

impl Default for AreaPatternTable {
    fn default() -> Self {
        AREA_PATTERNS.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(block: &str) -> Option<String> {
        AREA_PATTERNS.match_block(block).map(|e| e.area.clone())
    }

    #[test]
    fn test_longest_match_wins() {
        assert_eq!(
            area("Voluntarios CDV > Alabanzas > Asistente de equipo 7:10a").as_deref(),
            Some("Asistente de equipo")
        );
        assert_eq!(
            area("Voluntarios CDV > Alabanzas > Guitarra 7:10a").as_deref(),
            Some("Alabanza")
        );
    }

    #[test]
    fn test_longest_match_independent_of_table_order() {
        let table = AreaPatternTable::new(
            vec![
                AreaPatternEntry::new("A > B >", "Parent"),
                AreaPatternEntry::new("A > B > C", "Child"),
            ],
            vec!["A > ".to_string()],
        )
        .unwrap();
        assert_eq!(table.match_block("A > B > C 7a").unwrap().area, "Child");
        assert_eq!(table.match_block("A > B > D 7a").unwrap().area, "Parent");
    }

    #[test]
    fn test_accents_and_case_do_not_matter() {
        assert_eq!(
            area("Voluntarios CDV > Produccion Lince > Atmosfera").as_deref(),
            Some("Atmósfera")
        );
        assert_eq!(
            area("voluntarios cdv >  producción lince > ATMÓSFERA").as_deref(),
            Some("Atmósfera")
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(area("Voluntarios CDV > Desconocido 7:00a"), None);
        assert_eq!(area("Kids > Bebes - Lince 9:15a"), None);
        assert_eq!(area(""), None);
    }

    #[test]
    fn test_aliases_share_a_name() {
        let table = AreaPatternTable::new(
            vec![
                AreaPatternEntry::new("Kids > Bebes - Lince", "Kids"),
                AreaPatternEntry::new("Voluntarios CDV > Kids Voluntarios", "Kids"),
            ],
            DEFAULT_BLOCK_PREFIXES.iter().map(|p| p.to_string()).collect(),
        )
        .unwrap();
        assert_eq!(table.match_block("Kids > Bebes - Lince").unwrap().area, "Kids");
        assert_eq!(table.area_names(), vec!["Kids"]);
    }

    #[test]
    fn test_table_validation() {
        assert!(matches!(
            AreaPatternTable::new(vec![], vec!["X".into()]),
            Err(ConfigError::EmptyAreaTable)
        ));
        assert!(matches!(
            AreaPatternTable::new(vec![AreaPatternEntry::new("  ", "Blank")], vec!["X".into()]),
            Err(ConfigError::EmptyAreaTable)
        ));
        assert!(matches!(
            AreaPatternTable::new(vec![AreaPatternEntry::new("X > Y", "Y")], vec![String::new()]),
            Err(ConfigError::NoBlockPrefixes)
        ));
    }

    #[test]
    fn test_builtin_table() {
        assert_eq!(AREA_PATTERNS.entries().len(), 33);
        assert_eq!(AREA_PATTERNS.block_prefixes(), &["Voluntarios CDV > ", "Kids > "]);
        let names = AREA_PATTERNS.area_names();
        assert_eq!(names.len(), 33);
        assert_eq!(names[0], "Alabanza");
        assert_eq!(names[32], "Comms");
    }
}

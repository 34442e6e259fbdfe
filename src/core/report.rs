use crate::domain::catalog;
use crate::domain::model::Category;
use std::collections::BTreeMap;

pub const TOTAL_LABEL: &str = "TOTAL";
pub const SPECIALTY_HEADER: &str = "Especialidad";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub specialty: &'static str,
    pub count: u32,
}

/// Derived view of the entered data, scoped to the active category. Rebuilt on
/// demand; the total is recomputed from the rows every time.
#[derive(Debug, Clone)]
pub struct Report {
    pub unit: String,
    pub rows: Vec<ReportRow>,
    pub total: u64,
}

impl Report {
    /// One row per specialty in the category's catalog subset, in catalog
    /// order. Entries outside the subset are ignored even if the session still
    /// carries them; missing entries count as 0.
    pub fn build(category: Category, unit: &str, entries: &BTreeMap<String, u32>) -> Self {
        let mut rows = Vec::new();
        let mut total: u64 = 0;

        for specialty in catalog::specialties_for(category) {
            let count = entries.get(specialty).copied().unwrap_or(0);
            total += u64::from(count);
            rows.push(ReportRow { specialty, count });
        }

        Self {
            unit: unit.to_string(),
            rows,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect()
    }

    #[test]
    fn vocational_report_covers_full_subset_with_defaults() {
        let entries = entries(&[
            ("Administración y Gestión", 3),
            ("Técnico en Farmacia y Parafarmacia", 2),
        ]);

        let report = Report::build(Category::FormacionProfesional, "CHUC", &entries);

        assert_eq!(report.rows.len(), 16);
        assert_eq!(report.total, 5);
        assert_eq!(report.rows[0].specialty, "Administración y Gestión");
        assert_eq!(report.rows[0].count, 3);
        // Unentered specialties default to 0.
        assert_eq!(report.rows[1].count, 0);
    }

    #[test]
    fn empty_entries_total_zero() {
        let report = Report::build(Category::Universitarios, "GAPGC", &BTreeMap::new());

        assert_eq!(report.rows.len(), 9);
        assert_eq!(report.total, 0);
        assert!(report.rows.iter().all(|row| row.count == 0));
    }

    #[test]
    fn todos_concatenates_both_catalogs() {
        let entries = entries(&[("Enfermería", 4), ("Técnico No Sanitario", 1)]);

        let report = Report::build(Category::Todos, "HUNSC", &entries);

        assert_eq!(report.rows.len(), 25);
        assert_eq!(report.total, 5);
        assert_eq!(report.rows[0].specialty, "Administración y Gestión");
        assert_eq!(report.rows[16].specialty, "Enfermería");
        assert_eq!(report.rows[16].count, 4);
    }

    #[test]
    fn stale_entries_outside_category_are_excluded() {
        // Counts entered under a previous category stay in the session but must
        // not leak into a report scoped to another track.
        let entries = entries(&[("Medicina", 7), ("Técnico No Sanitario", 2)]);

        let report = Report::build(Category::FormacionProfesional, "CHUIMI", &entries);

        assert_eq!(report.rows.len(), 16);
        assert_eq!(report.total, 2);
        assert!(report.rows.iter().all(|row| row.specialty != "Medicina"));
    }

    #[test]
    fn total_recomputed_per_build() {
        let mut map = entries(&[("Enfermería", 1)]);
        let first = Report::build(Category::Universitarios, "CHUC", &map);
        assert_eq!(first.total, 1);

        map.insert("Medicina".to_string(), 9);
        let second = Report::build(Category::Universitarios, "CHUC", &map);
        assert_eq!(second.total, 10);
    }
}

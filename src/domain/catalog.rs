//! Fixed reference data: specialty lists per teaching track and the
//! organizational units each institution kind can report for.

use crate::domain::model::{Category, InstitutionKind};

pub const FORMACION_PROFESIONAL: [&str; 16] = [
    "Administración y Gestión",
    "Técnico en Atención Sociosanitaria",
    "Técnico en Cuidados Auxiliares de Enfermería",
    "Técnico en Dietética Nutrición",
    "Técnico en Emergencias Sanitarias",
    "Técnico en Farmacia y Parafarmacia",
    "Técnico No Sanitario",
    "Técnico Superior en Anatomía Patológica y Citodiagnóstico",
    "Técnico Superior en Audiología Protésica",
    "Técnico Superior en Documentación Sanitaria y Administración Sanitaria",
    "Técnico Superior en Higiene Bucodental",
    "Técnico Superior en Imagen para el Diagnóstico y Medicina Nuclear",
    "Técnico Superior en Laboratorio Clínico y Biomédico",
    "Técnico Superior en Ortoprótesis y Productos de Apoyo",
    "Técnico Superior en Radioterapia y Dosimetría",
    "Técnico Superior en prótesis Dentales",
];

pub const UNIVERSITARIOS: [&str; 9] = [
    "Enfermería",
    "Farmacia",
    "Fisioterapia",
    "Logopedia",
    "Medicina",
    "Terapia Ocupacional",
    "Podología",
    "Óptica y Optometría",
    "Otros Titulaciones Universitarias",
];

pub const HOSPITALES: [&str; 4] = ["HUGC Dr. Negrín", "CHUIMI", "CHUC", "HUNSC"];

pub const GERENCIAS: [&str; 7] = [
    "GAPGC",
    "GSSFV",
    "GSSLZ",
    "GAPTF",
    "GSS La Palma",
    "GSS La Gomera",
    "GSS El Hierro",
];

/// Ordered specialty rows active for a category. `Todos` is the plain
/// concatenation of both tracks; duplicate names would stay distinct rows.
pub fn specialties_for(category: Category) -> Vec<&'static str> {
    match category {
        Category::FormacionProfesional => FORMACION_PROFESIONAL.to_vec(),
        Category::Universitarios => UNIVERSITARIOS.to_vec(),
        Category::Todos => FORMACION_PROFESIONAL
            .iter()
            .chain(UNIVERSITARIOS.iter())
            .copied()
            .collect(),
    }
}

pub fn units_for(institution: InstitutionKind) -> &'static [&'static str] {
    match institution {
        InstitutionKind::Hospital => &HOSPITALES,
        InstitutionKind::Gerencia => &GERENCIAS,
    }
}

pub fn is_unit_of(institution: InstitutionKind, unit: &str) -> bool {
    units_for(institution).contains(&unit)
}

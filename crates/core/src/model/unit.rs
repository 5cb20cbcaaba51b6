use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("required field is empty: {0}")]
    MissingField(UnitField),

    #[error("required field is empty: {0}")]
    MissingSubjectField(SubjectField),

    #[error("{field} must be a whole, non-negative number (got {raw:?})")]
    InvalidHours { field: SubjectField, raw: String },
}

//
// ─── FIELDS ────────────────────────────────────────────────────────────────────
//

/// The inputs of one teaching unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitField {
    Unidad,
    Objetivos,
    Situaciones,
    Estrategias,
    Recursos,
    Tiempo,
    Carrera,
    Materia,
}

impl UnitField {
    /// Every field, in form order.
    pub const ALL: [UnitField; 8] = [
        UnitField::Carrera,
        UnitField::Materia,
        UnitField::Unidad,
        UnitField::Objetivos,
        UnitField::Situaciones,
        UnitField::Estrategias,
        UnitField::Recursos,
        UnitField::Tiempo,
    ];

    /// The free-text fields that are cleared after each added unit.
    pub const PER_UNIT: [UnitField; 6] = [
        UnitField::Unidad,
        UnitField::Objetivos,
        UnitField::Situaciones,
        UnitField::Estrategias,
        UnitField::Recursos,
        UnitField::Tiempo,
    ];

    /// Document key for this field.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            UnitField::Unidad => "unidad",
            UnitField::Objetivos => "objetivos",
            UnitField::Situaciones => "situaciones",
            UnitField::Estrategias => "estrategias",
            UnitField::Recursos => "recursos",
            UnitField::Tiempo => "tiempo",
            UnitField::Carrera => "carrera",
            UnitField::Materia => "materia",
        }
    }

    /// Form label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            UnitField::Unidad => "Unidad y Contenidos",
            UnitField::Objetivos => "Objetivos Didácticos",
            UnitField::Situaciones => "Situaciones de Enseñanza y Aprendizaje",
            UnitField::Estrategias => "Estrategias Metodológicas",
            UnitField::Recursos => "Recursos Didácticos",
            UnitField::Tiempo => "Tiempo de Ejecución",
            UnitField::Carrera => "Carrera",
            UnitField::Materia => "Materia",
        }
    }
}

impl fmt::Display for UnitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Inputs of the add-materia form in the teacher profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubjectField {
    Carrera,
    Materia,
    HorasTotales,
    HorasSemanales,
}

impl SubjectField {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            SubjectField::Carrera => "carrera",
            SubjectField::Materia => "materia",
            SubjectField::HorasTotales => "horasTotales",
            SubjectField::HorasSemanales => "horasSemanales",
        }
    }
}

impl fmt::Display for SubjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

//
// ─── UNIT FIELDS ───────────────────────────────────────────────────────────────
//

/// One teaching unit ("unidad"), as typed into the plan form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitFields {
    pub unidad: String,
    pub objetivos: String,
    pub situaciones: String,
    pub estrategias: String,
    pub recursos: String,
    pub tiempo: String,
    pub carrera: String,
    pub materia: String,
}

impl UnitFields {
    /// An empty form preselecting a carrera and materia.
    #[must_use]
    pub fn for_subject(carrera: impl Into<String>, materia: impl Into<String>) -> Self {
        Self {
            carrera: carrera.into(),
            materia: materia.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn get(&self, field: UnitField) -> &str {
        match field {
            UnitField::Unidad => &self.unidad,
            UnitField::Objetivos => &self.objetivos,
            UnitField::Situaciones => &self.situaciones,
            UnitField::Estrategias => &self.estrategias,
            UnitField::Recursos => &self.recursos,
            UnitField::Tiempo => &self.tiempo,
            UnitField::Carrera => &self.carrera,
            UnitField::Materia => &self.materia,
        }
    }

    pub fn set(&mut self, field: UnitField, value: impl Into<String>) {
        let value = value.into();
        match field {
            UnitField::Unidad => self.unidad = value,
            UnitField::Objetivos => self.objetivos = value,
            UnitField::Situaciones => self.situaciones = value,
            UnitField::Estrategias => self.estrategias = value,
            UnitField::Recursos => self.recursos = value,
            UnitField::Tiempo => self.tiempo = value,
            // A different carrera invalidates the materia choice.
            UnitField::Carrera => {
                if self.carrera != value {
                    self.materia.clear();
                }
                self.carrera = value;
            }
            UnitField::Materia => self.materia = value,
        }
    }

    /// Checks that every field holds non-blank text.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` naming the first blank field in
    /// form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match UnitField::ALL
            .into_iter()
            .find(|field| self.get(*field).trim().is_empty())
        {
            Some(field) => Err(ValidationError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// The form to show after this unit was added: per-unit text cleared,
    /// carrera and materia kept.
    #[must_use]
    pub fn cleared_for_next_unit(&self) -> Self {
        Self::for_subject(self.carrera.clone(), self.materia.clone())
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        UnitField::PER_UNIT
            .into_iter()
            .all(|field| self.get(field).trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(unidad: &str) -> UnitFields {
        UnitFields {
            unidad: unidad.into(),
            objetivos: "O1".into(),
            situaciones: "S1".into(),
            estrategias: "E1".into(),
            recursos: "R1".into(),
            tiempo: "2 semanas".into(),
            carrera: "C1".into(),
            materia: "M1".into(),
        }
    }

    #[test]
    fn validate_reports_first_missing_field() {
        assert_eq!(filled("U1").validate(), Ok(()));

        let mut fields = filled("U1");
        fields.recursos = "   ".into();
        fields.tiempo.clear();
        assert_eq!(
            fields.validate(),
            Err(ValidationError::MissingField(UnitField::Recursos))
        );

        let empty = UnitFields::default();
        assert_eq!(
            empty.validate(),
            Err(ValidationError::MissingField(UnitField::Carrera))
        );
    }

    #[test]
    fn cleared_for_next_unit_keeps_subject() {
        let next = filled("U1").cleared_for_next_unit();
        assert_eq!(next.carrera, "C1");
        assert_eq!(next.materia, "M1");
        assert!(next.is_blank());
    }

    #[test]
    fn changing_carrera_resets_materia() {
        let mut fields = filled("U1");
        fields.set(UnitField::Carrera, "C1");
        assert_eq!(fields.materia, "M1");
        fields.set(UnitField::Carrera, "C2");
        assert_eq!(fields.carrera, "C2");
        assert!(fields.materia.is_empty());
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::unit::{SubjectField, ValidationError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("no carrera at index {0}")]
    CarreraOutOfRange(usize),

    #[error("no materia at index {materia} in carrera {carrera}")]
    MateriaOutOfRange { carrera: usize, materia: usize },
}

/// A course taught inside a carrera.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Materia {
    pub nombre: String,
    pub horas_totales: u32,
    pub horas_semanales: u32,
}

/// An academic program with its ordered courses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrera {
    nombre: String,
    materias: Vec<Materia>,
}

impl Carrera {
    #[must_use]
    pub fn new(nombre: impl Into<String>, materias: Vec<Materia>) -> Self {
        Self {
            nombre: nombre.into(),
            materias,
        }
    }

    #[must_use]
    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    #[must_use]
    pub fn materias(&self) -> &[Materia] {
        &self.materias
    }

    pub fn materia_names(&self) -> impl Iterator<Item = &str> {
        self.materias.iter().map(|m| m.nombre.as_str())
    }
}

/// Personal and academic data of a teacher, keyed by the teacher's user name.
///
/// Carrera names are unique within a profile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeacherProfile {
    pub facultad: String,
    pub nombre: String,
    pub cedula: String,
    carreras: Vec<Carrera>,
}

impl TeacherProfile {
    #[must_use]
    pub fn new(
        facultad: impl Into<String>,
        nombre: impl Into<String>,
        cedula: impl Into<String>,
    ) -> Self {
        Self {
            facultad: facultad.into(),
            nombre: nombre.into(),
            cedula: cedula.into(),
            carreras: Vec::new(),
        }
    }

    /// Attach carreras, folding any repeated carrera name into its first
    /// occurrence.
    #[must_use]
    pub fn with_carreras(mut self, carreras: Vec<Carrera>) -> Self {
        self.carreras.clear();
        for carrera in carreras {
            match self.carrera_index(&carrera.nombre) {
                Some(idx) => self.carreras[idx].materias.extend(carrera.materias),
                None => self.carreras.push(carrera),
            }
        }
        self
    }

    #[must_use]
    pub fn carreras(&self) -> &[Carrera] {
        &self.carreras
    }

    #[must_use]
    pub fn carrera(&self, nombre: &str) -> Option<&Carrera> {
        self.carreras.iter().find(|c| c.nombre == nombre)
    }

    fn carrera_index(&self, nombre: &str) -> Option<usize> {
        self.carreras.iter().position(|c| c.nombre == nombre)
    }

    /// Add a materia under `carrera`, creating the carrera when absent.
    pub fn add_materia(&mut self, carrera: &str, materia: Materia) {
        match self.carrera_index(carrera) {
            Some(idx) => self.carreras[idx].materias.push(materia),
            None => self.carreras.push(Carrera::new(carrera, vec![materia])),
        }
    }

    /// Remove one materia; a carrera left without materias is removed too.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError` when either index is out of range.
    pub fn remove_materia(
        &mut self,
        carrera_idx: usize,
        materia_idx: usize,
    ) -> Result<Materia, ProfileError> {
        let carrera = self
            .carreras
            .get_mut(carrera_idx)
            .ok_or(ProfileError::CarreraOutOfRange(carrera_idx))?;
        if materia_idx >= carrera.materias.len() {
            return Err(ProfileError::MateriaOutOfRange {
                carrera: carrera_idx,
                materia: materia_idx,
            });
        }
        let removed = carrera.materias.remove(materia_idx);
        if carrera.materias.is_empty() {
            self.carreras.remove(carrera_idx);
        }
        Ok(removed)
    }
}

/// Raw text of the add-materia form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectDraft {
    pub carrera: String,
    pub materia: String,
    pub horas_totales: String,
    pub horas_semanales: String,
}

impl SubjectDraft {
    /// Validate the form into a carrera name and a `Materia`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingSubjectField` for blank inputs and
    /// `ValidationError::InvalidHours` for hours that are not whole numbers.
    pub fn validate(&self) -> Result<(String, Materia), ValidationError> {
        let required = [
            (SubjectField::Carrera, &self.carrera),
            (SubjectField::Materia, &self.materia),
            (SubjectField::HorasTotales, &self.horas_totales),
            (SubjectField::HorasSemanales, &self.horas_semanales),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ValidationError::MissingSubjectField(*field));
        }

        let horas_totales = parse_hours(SubjectField::HorasTotales, &self.horas_totales)?;
        let horas_semanales = parse_hours(SubjectField::HorasSemanales, &self.horas_semanales)?;

        Ok((
            self.carrera.trim().to_string(),
            Materia {
                nombre: self.materia.trim().to_string(),
                horas_totales,
                horas_semanales,
            },
        ))
    }
}

fn parse_hours(field: SubjectField, raw: &str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidHours {
            field,
            raw: raw.to_string(),
        })
}

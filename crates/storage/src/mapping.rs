//! Conversions between domain types and JSON documents.
//!
//! Field names follow the collection layout used by the web client
//! (`uidDocente`, `horasTotales`, ...), so every adapter reads and writes the
//! same shape.

use chrono::{DateTime, Utc};
use planes_core::model::{
    Carrera, LessonPlan, Materia, NewLessonPlan, PlanId, Role, TeacherProfile, UnitFields,
    UserRecord,
};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::repository::{Document, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Serialize `value` into a JSON object document.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if `value` does not serialize to an
/// object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StorageError> {
    match serde_json::to_value(value).map_err(ser)? {
        Value::Object(map) => Ok(map),
        other => Err(StorageError::Serialization(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the document does not match `T`.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StorageError> {
    serde_json::from_value(Value::Object(document)).map_err(ser)
}

/// Whole numbers that older clients stored as strings.
fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => {
            u32::try_from(n).map_err(|_| de::Error::custom(format!("number out of range: {n}")))
        }
        Raw::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| de::Error::custom(format!("not a whole number: {s:?}"))),
    }
}

//
// ─── USERS ─────────────────────────────────────────────────────────────────────
//

#[derive(Serialize, Deserialize)]
struct UserDoc {
    name: String,
    #[serde(deserialize_with = "lenient_u32")]
    pin: u32,
    role: String,
}

/// Document key for a user created by this application.
#[must_use]
pub fn user_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// # Errors
///
/// Returns `StorageError::Serialization` for a missing field, a non-numeric
/// PIN or an unknown role.
pub fn user_from_document(document: Document) -> Result<UserRecord, StorageError> {
    let doc: UserDoc = from_document(document)?;
    let role: Role = doc.role.parse().map_err(ser)?;
    Ok(UserRecord {
        name: doc.name,
        pin: doc.pin,
        role,
    })
}

/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn user_to_document(user: &UserRecord) -> Result<Document, StorageError> {
    to_document(&UserDoc {
        name: user.name.clone(),
        pin: user.pin,
        role: user.role.as_str().to_string(),
    })
}

//
// ─── TEACHER PROFILES ──────────────────────────────────────────────────────────
//

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct TeacherDoc {
    facultad: String,
    nombre: String,
    cedula: String,
    carreras: Vec<CarreraDoc>,
}

#[derive(Serialize, Deserialize)]
struct CarreraDoc {
    nombre: String,
    #[serde(default)]
    materias: Vec<MateriaDoc>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MateriaDoc {
    nombre: String,
    #[serde(deserialize_with = "lenient_u32")]
    horas_totales: u32,
    #[serde(deserialize_with = "lenient_u32")]
    horas_semanales: u32,
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the document is malformed.
pub fn profile_from_document(document: Document) -> Result<TeacherProfile, StorageError> {
    let doc: TeacherDoc = from_document(document)?;
    let carreras = doc
        .carreras
        .into_iter()
        .map(|c| {
            let materias = c
                .materias
                .into_iter()
                .map(|m| Materia {
                    nombre: m.nombre,
                    horas_totales: m.horas_totales,
                    horas_semanales: m.horas_semanales,
                })
                .collect();
            Carrera::new(c.nombre, materias)
        })
        .collect();
    Ok(TeacherProfile::new(doc.facultad, doc.nombre, doc.cedula).with_carreras(carreras))
}

/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn profile_to_document(profile: &TeacherProfile) -> Result<Document, StorageError> {
    to_document(&TeacherDoc {
        facultad: profile.facultad.clone(),
        nombre: profile.nombre.clone(),
        cedula: profile.cedula.clone(),
        carreras: profile
            .carreras()
            .iter()
            .map(|c| CarreraDoc {
                nombre: c.nombre().to_string(),
                materias: c
                    .materias()
                    .iter()
                    .map(|m| MateriaDoc {
                        nombre: m.nombre.clone(),
                        horas_totales: m.horas_totales,
                        horas_semanales: m.horas_semanales,
                    })
                    .collect(),
            })
            .collect(),
    })
}

//
// ─── LESSON PLANS ──────────────────────────────────────────────────────────────
//

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanDoc {
    #[serde(default)]
    unidades: Vec<UnitFields>,
    timestamp: DateTime<Utc>,
    uid_docente: String,
    #[serde(default)]
    carrera: String,
    #[serde(default)]
    materia: String,
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the document is malformed.
pub fn plan_from_document(id: PlanId, document: Document) -> Result<LessonPlan, StorageError> {
    let doc: PlanDoc = from_document(document)?;
    Ok(LessonPlan {
        id,
        unidades: doc.unidades,
        carrera: doc.carrera,
        materia: doc.materia,
        uid_docente: doc.uid_docente,
        timestamp: doc.timestamp,
    })
}

/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn new_plan_to_document(plan: &NewLessonPlan) -> Result<Document, StorageError> {
    to_document(&PlanDoc {
        unidades: plan.unidades.clone(),
        timestamp: plan.timestamp,
        uid_docente: plan.uid_docente.clone(),
        carrera: plan.carrera.clone(),
        materia: plan.materia.clone(),
    })
}

/// The stored body of an existing plan. The id is the document key and is not
/// part of the body.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn plan_to_document(plan: &LessonPlan) -> Result<Document, StorageError> {
    to_document(&PlanDoc {
        unidades: plan.unidades.clone(),
        timestamp: plan.timestamp,
        uid_docente: plan.uid_docente.clone(),
        carrera: plan.carrera.clone(),
        materia: plan.materia.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes_core::time::fixed_now;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn user_pin_may_be_stored_as_text() {
        let user = user_from_document(doc(
            json!({"name": "Ana", "pin": "1234", "role": "Verificador"}),
        ))
        .unwrap();
        assert_eq!(user.pin, 1234);
        assert_eq!(user.role, Role::Verificador);
    }

    #[test]
    fn user_with_unknown_role_is_rejected() {
        let err = user_from_document(doc(json!({"name": "Ana", "pin": 1, "role": "admin"})))
            .unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn user_document_writes_numeric_pin() {
        let body = user_to_document(&UserRecord {
            name: "Ana".into(),
            pin: 1234,
            role: Role::Docente,
        })
        .unwrap();
        assert_eq!(
            Value::Object(body),
            json!({"name": "Ana", "pin": 1234, "role": "docente"})
        );
    }

    #[test]
    fn profile_uses_camel_case_hours() {
        let mut profile = TeacherProfile::new("FACEN", "Ana", "123");
        profile.add_materia(
            "Informática",
            Materia {
                nombre: "Redes".into(),
                horas_totales: 64,
                horas_semanales: 4,
            },
        );
        let body = Value::Object(profile_to_document(&profile).unwrap());
        assert_eq!(body["carreras"][0]["materias"][0]["horasTotales"], json!(64));
        assert_eq!(body["carreras"][0]["materias"][0]["horasSemanales"], json!(4));
    }

    #[test]
    fn legacy_profile_with_text_hours_and_missing_fields() {
        let profile = profile_from_document(doc(json!({
            "nombre": "Ana",
            "carreras": [{
                "nombre": "Informática",
                "materias": [{"nombre": "Redes", "horasTotales": "64", "horasSemanales": "4"}]
            }]
        })))
        .unwrap();
        assert_eq!(profile.facultad, "");
        assert_eq!(profile.carreras()[0].materias()[0].horas_totales, 64);
    }

    #[test]
    fn plan_document_has_uid_docente_and_no_id() {
        let plan = NewLessonPlan {
            unidades: vec![UnitFields::for_subject("C1", "M1")],
            carrera: "C1".into(),
            materia: "M1".into(),
            uid_docente: "Ana".into(),
            timestamp: fixed_now(),
        };
        let body = new_plan_to_document(&plan).unwrap();
        assert!(body.contains_key("uidDocente"));
        assert!(!body.contains_key("id"));

        let restored = plan_from_document(PlanId::new("k1"), body).unwrap();
        assert_eq!(restored.uid_docente, "Ana");
        assert_eq!(restored.timestamp, fixed_now());
        assert_eq!(restored.unidades[0].carrera, "C1");
    }
}

use chrono::{DateTime, Utc};

use crate::model::ids::PlanId;
use crate::model::unit::UnitFields;

/// A lesson plan ("plan educativo") that has not been stored yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewLessonPlan {
    pub unidades: Vec<UnitFields>,
    pub carrera: String,
    pub materia: String,
    /// Name of the owning teacher.
    pub uid_docente: String,
    pub timestamp: DateTime<Utc>,
}

/// A stored lesson plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonPlan {
    pub id: PlanId,
    pub unidades: Vec<UnitFields>,
    pub carrera: String,
    pub materia: String,
    pub uid_docente: String,
    pub timestamp: DateTime<Utc>,
}

impl LessonPlan {
    #[must_use]
    pub fn from_new(id: PlanId, plan: NewLessonPlan) -> Self {
        Self {
            id,
            unidades: plan.unidades,
            carrera: plan.carrera,
            materia: plan.materia,
            uid_docente: plan.uid_docente,
            timestamp: plan.timestamp,
        }
    }

    /// Ownership is decided on the trimmed teacher name.
    #[must_use]
    pub fn belongs_to(&self, user_name: &str) -> bool {
        self.uid_docente.trim() == user_name.trim()
    }
}

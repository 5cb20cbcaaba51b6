use std::sync::Arc;

use planes_core::model::{DraftId, LessonPlan, NewLessonPlan, PlanId, Session, UnitFields};
use storage::repository::PlanRepository;
use tracing::info;

use crate::Clock;
use crate::error::{PlanServiceError, SubmitError};

/// Everything needed to persist the collected units as one plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanSubmission {
    pub unidades: Vec<UnitFields>,
    pub carrera: String,
    pub materia: String,
    /// `Some` when overwriting an existing plan.
    pub target: Option<PlanId>,
    /// Drafts the units were taken from, in order.
    pub drafts: Vec<DraftId>,
}

/// Lesson plan persistence on behalf of the logged-in teacher.
#[derive(Clone)]
pub struct PlanService {
    clock: Clock,
    plans: Arc<dyn PlanRepository>,
}

impl PlanService {
    #[must_use]
    pub fn new(clock: Clock, plans: Arc<dyn PlanRepository>) -> Self {
        Self { clock, plans }
    }

    /// Store a submission: a new plan owned by `session`, or a full overwrite
    /// of the targeted plan keeping its owner and timestamp.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::PlanNotFound` if the targeted plan is gone and
    /// `SubmitError::Storage` if persistence fails.
    pub async fn submit(
        &self,
        submission: PlanSubmission,
        session: &Session,
    ) -> Result<PlanId, SubmitError> {
        let PlanSubmission {
            unidades,
            carrera,
            materia,
            target,
            ..
        } = submission;

        match target {
            None => {
                let plan = NewLessonPlan {
                    unidades,
                    carrera,
                    materia,
                    uid_docente: session.user_name().to_string(),
                    timestamp: self.clock.now(),
                };
                let id = self.plans.create_plan(&plan).await?;
                info!(plan = %id, user = session.user_name(), units = plan.unidades.len(), "plan created");
                Ok(id)
            }
            Some(id) => {
                let existing = self
                    .plans
                    .get_plan(&id)
                    .await?
                    .ok_or_else(|| SubmitError::PlanNotFound(id.clone()))?;
                let updated = LessonPlan {
                    unidades,
                    carrera,
                    materia,
                    ..existing
                };
                self.plans.update_plan(&updated).await?;
                info!(plan = %id, user = session.user_name(), units = updated.unidades.len(), "plan updated");
                Ok(id)
            }
        }
    }

    /// Plans owned by the session user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Storage` if the plans cannot be read.
    pub async fn list_for(&self, session: &Session) -> Result<Vec<LessonPlan>, PlanServiceError> {
        let mut plans: Vec<LessonPlan> = self
            .plans
            .list_plans()
            .await?
            .into_iter()
            .filter(|plan| plan.belongs_to(session.user_name()))
            .collect();
        plans.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(plans)
    }

    /// # Errors
    ///
    /// Returns `PlanServiceError::NotFound` if no plan has this id.
    pub async fn get(&self, id: &PlanId) -> Result<LessonPlan, PlanServiceError> {
        self.plans
            .get_plan(id)
            .await?
            .ok_or_else(|| PlanServiceError::NotFound(id.clone()))
    }

    /// Delete a plan. Deleting a plan that is already gone succeeds.
    ///
    /// # Errors
    ///
    /// Returns `PlanServiceError::Storage` if the delete fails.
    pub async fn delete(&self, id: &PlanId, session: &Session) -> Result<(), PlanServiceError> {
        self.plans.delete_plan(id).await?;
        info!(plan = %id, user = session.user_name(), "plan deleted");
        Ok(())
    }
}

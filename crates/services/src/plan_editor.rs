use planes_core::model::{
    DraftError, DraftId, DraftList, LessonPlan, PlanId, Session, UnitField, UnitFields,
    ValidationError,
};

use crate::error::SubmitError;
use crate::plan_service::{PlanService, PlanSubmission};

/// The "add several units, then submit them as one plan" workflow.
///
/// Holds the form being typed, the collected drafts and, when editing a stored
/// plan, the plan's id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanDraftEditor {
    form: UnitFields,
    drafts: DraftList,
    target: Option<PlanId>,
}

impl PlanDraftEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit the units of a stored plan.
    #[must_use]
    pub fn for_plan(plan: LessonPlan) -> Self {
        Self {
            form: UnitFields::for_subject(plan.carrera, plan.materia),
            drafts: DraftList::from_unidades(plan.unidades),
            target: Some(plan.id),
        }
    }

    #[must_use]
    pub fn form(&self) -> &UnitFields {
        &self.form
    }

    #[must_use]
    pub fn drafts(&self) -> &DraftList {
        &self.drafts
    }

    #[must_use]
    pub fn target(&self) -> Option<&PlanId> {
        self.target.as_ref()
    }

    pub fn set_field(&mut self, field: UnitField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Append the form as a draft and clear the per-unit fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` if a field is blank; the form
    /// and the list stay as they were.
    pub fn add_draft(&mut self) -> Result<DraftId, ValidationError> {
        let id = self.drafts.add(self.form.clone())?;
        self.form = self.form.cleared_for_next_unit();
        Ok(id)
    }

    /// Load the draft at `index` into the form for editing.
    ///
    /// # Errors
    ///
    /// Returns `DraftError` if another draft is being edited or the index is
    /// out of range.
    pub fn edit_draft(&mut self, index: usize) -> Result<(), DraftError> {
        self.form = self.drafts.edit(index)?;
        Ok(())
    }

    /// Abandon the pending edit, putting the original draft back.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::NoEditInProgress` if nothing is being edited.
    pub fn cancel_edit(&mut self) -> Result<(), DraftError> {
        self.drafts.cancel_edit()?;
        self.form = self.form.cleared_for_next_unit();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DraftError::IndexOutOfRange` for a bad index.
    pub fn delete_draft(&mut self, index: usize) -> Result<(), DraftError> {
        self.drafts.delete(index)?;
        Ok(())
    }

    /// Drop every draft and empty the form.
    pub fn clear(&mut self) {
        self.drafts.clear();
        self.form = UnitFields::default();
    }

    /// Snapshot of what `submit_all` would store, without touching the store.
    ///
    /// The plan's carrera and materia come from the last draft in the list.
    ///
    /// # Errors
    ///
    /// - `SubmitError::EmptyDraftList` if no draft has been added.
    /// - `SubmitError::EditPending` while a draft is out for editing.
    /// - `SubmitError::MissingPlanContext` if the last draft has no carrera or
    ///   materia.
    pub fn prepare_submission(&self) -> Result<PlanSubmission, SubmitError> {
        if self.drafts.is_editing() {
            return Err(SubmitError::EditPending);
        }
        let last = self
            .drafts
            .iter()
            .last()
            .ok_or(SubmitError::EmptyDraftList)?
            .fields();
        if last.carrera.trim().is_empty() || last.materia.trim().is_empty() {
            return Err(SubmitError::MissingPlanContext);
        }

        Ok(PlanSubmission {
            unidades: self.drafts.unidades(),
            carrera: last.carrera.clone(),
            materia: last.materia.clone(),
            target: self.target.clone(),
            drafts: self.drafts.ids(),
        })
    }

    /// Record a write the store confirmed for the drafts in `submitted`.
    ///
    /// A stored plan keeps its id so further changes overwrite it again. For a
    /// new plan only the submitted drafts are dropped; drafts added or taken
    /// out for editing after `prepare_submission` stay.
    pub fn mark_submitted(&mut self, submitted: &[DraftId], id: PlanId) {
        if self.target.is_some() {
            self.target = Some(id);
            return;
        }
        self.drafts.remove_ids(submitted);
        if self.drafts.is_empty() && !self.drafts.is_editing() {
            self.form = UnitFields::default();
        }
    }

    /// Persist every draft as one plan. The drafts are only cleared once the
    /// store confirmed the write.
    ///
    /// # Errors
    ///
    /// See `prepare_submission` and `PlanService::submit`.
    pub async fn submit_all(
        &mut self,
        plans: &PlanService,
        session: &Session,
    ) -> Result<PlanId, SubmitError> {
        let submission = self.prepare_submission()?;
        let submitted = submission.drafts.clone();
        let id = plans.submit(submission, session).await?;
        self.mark_submitted(&submitted, id.clone());
        Ok(id)
    }
}

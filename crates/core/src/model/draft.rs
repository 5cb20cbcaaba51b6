use thiserror::Error;

use crate::model::ids::DraftId;
use crate::model::unit::{UnitFields, ValidationError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DraftError {
    #[error("no draft at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("another unit is already being edited")]
    EditInProgress,

    #[error("no unit is being edited")]
    NoEditInProgress,
}

//
// ─── DRAFTS ────────────────────────────────────────────────────────────────────
//

/// Where a draft currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftStatus {
    /// Sitting in the list, waiting for submit.
    New,
    /// Pulled back into the form; `original_index` is where it came from.
    Editing { original_index: usize },
}

/// One unit awaiting submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    id: DraftId,
    fields: UnitFields,
    status: DraftStatus,
}

impl Draft {
    #[must_use]
    pub fn id(&self) -> DraftId {
        self.id
    }

    #[must_use]
    pub fn fields(&self) -> &UnitFields {
        &self.fields
    }

    #[must_use]
    pub fn status(&self) -> DraftStatus {
        self.status
    }
}

/// Ordered list of unit drafts built up before a plan is submitted.
///
/// At most one draft is out for editing at a time. It is not part of the list
/// until it is added back (at its original position) or the edit is cancelled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftList {
    drafts: Vec<Draft>,
    editing: Option<Draft>,
    next_id: u64,
}

impl DraftList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the list with the unidades of an existing plan.
    #[must_use]
    pub fn from_unidades(unidades: impl IntoIterator<Item = UnitFields>) -> Self {
        let mut list = Self::new();
        for fields in unidades {
            let id = list.allocate_id();
            list.drafts.push(Draft {
                id,
                fields,
                status: DraftStatus::New,
            });
        }
        list
    }

    fn allocate_id(&mut self) -> DraftId {
        self.next_id += 1;
        DraftId::new(self.next_id)
    }

    /// Validate `fields` and append them. While an edit is pending the draft
    /// goes back to the position it was taken from instead, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` when a field is blank; the list
    /// is left untouched.
    pub fn add(&mut self, fields: UnitFields) -> Result<DraftId, ValidationError> {
        fields.validate()?;

        match self.editing.take() {
            Some(Draft {
                id,
                status: DraftStatus::Editing { original_index },
                ..
            }) => {
                let at = original_index.min(self.drafts.len());
                self.drafts.insert(
                    at,
                    Draft {
                        id,
                        fields,
                        status: DraftStatus::New,
                    },
                );
                Ok(id)
            }
            Some(Draft { id, .. }) => {
                self.drafts.push(Draft {
                    id,
                    fields,
                    status: DraftStatus::New,
                });
                Ok(id)
            }
            None => {
                let id = self.allocate_id();
                self.drafts.push(Draft {
                    id,
                    fields,
                    status: DraftStatus::New,
                });
                Ok(id)
            }
        }
    }

    /// Take the draft at `index` out of the list and return its fields for
    /// the form.
    ///
    /// # Errors
    ///
    /// `EditInProgress` if another draft is already out, `IndexOutOfRange` for
    /// a bad index.
    pub fn edit(&mut self, index: usize) -> Result<UnitFields, DraftError> {
        if self.editing.is_some() {
            return Err(DraftError::EditInProgress);
        }
        self.check_index(index)?;

        let mut draft = self.drafts.remove(index);
        draft.status = DraftStatus::Editing {
            original_index: index,
        };
        let fields = draft.fields.clone();
        self.editing = Some(draft);
        Ok(fields)
    }

    /// Put the draft being edited back, unchanged, where it was.
    ///
    /// # Errors
    ///
    /// `NoEditInProgress` when nothing is being edited.
    pub fn cancel_edit(&mut self) -> Result<DraftId, DraftError> {
        let mut draft = self.editing.take().ok_or(DraftError::NoEditInProgress)?;
        let at = match draft.status {
            DraftStatus::Editing { original_index } => original_index.min(self.drafts.len()),
            DraftStatus::New => self.drafts.len(),
        };
        draft.status = DraftStatus::New;
        let id = draft.id;
        self.drafts.insert(at, draft);
        Ok(id)
    }

    /// Remove the draft at `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for a bad index.
    pub fn delete(&mut self, index: usize) -> Result<UnitFields, DraftError> {
        self.check_index(index)?;
        let removed = self.drafts.remove(index);

        if let Some(Draft {
            status: DraftStatus::Editing { original_index },
            ..
        }) = &mut self.editing
        {
            if index < *original_index {
                *original_index -= 1;
            }
        }

        Ok(removed.fields)
    }

    /// Drop every draft, including one that is out for editing.
    pub fn clear(&mut self) {
        self.drafts.clear();
        self.editing = None;
    }

    /// Remove the listed drafts whose id is in `ids`, keeping the rest in
    /// order. A draft out for editing is never removed.
    pub fn remove_ids(&mut self, ids: &[DraftId]) -> usize {
        let before = self.drafts.len();
        let mut kept = Vec::with_capacity(before);
        let mut removed_ahead_of_edit = 0;
        let edit_index = match &self.editing {
            Some(Draft {
                status: DraftStatus::Editing { original_index },
                ..
            }) => Some(*original_index),
            _ => None,
        };

        for (index, draft) in std::mem::take(&mut self.drafts).into_iter().enumerate() {
            if ids.contains(&draft.id) {
                if edit_index.is_some_and(|at| index < at) {
                    removed_ahead_of_edit += 1;
                }
            } else {
                kept.push(draft);
            }
        }
        self.drafts = kept;

        if let Some(Draft {
            status: DraftStatus::Editing { original_index },
            ..
        }) = &mut self.editing
        {
            *original_index -= removed_ahead_of_edit;
        }

        before - self.drafts.len()
    }

    /// Ids of the listed drafts in order.
    #[must_use]
    pub fn ids(&self) -> Vec<DraftId> {
        self.drafts.iter().map(|d| d.id).collect()
    }

    fn check_index(&self, index: usize) -> Result<(), DraftError> {
        if index < self.drafts.len() {
            Ok(())
        } else {
            Err(DraftError::IndexOutOfRange {
                index,
                len: self.drafts.len(),
            })
        }
    }

    /// Number of drafts in the list, not counting one out for editing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Draft> {
        self.drafts.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Draft> {
        self.drafts.iter()
    }

    #[must_use]
    pub fn editing(&self) -> Option<&Draft> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Snapshot of the listed fields in order, as they would be submitted.
    #[must_use]
    pub fn unidades(&self) -> Vec<UnitFields> {
        self.drafts.iter().map(|d| d.fields.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::unit::UnitField;

    fn unit(unidad: &str) -> UnitFields {
        UnitFields {
            unidad: unidad.into(),
            objetivos: format!("O-{unidad}"),
            situaciones: "S".into(),
            estrategias: "E".into(),
            recursos: "R".into(),
            tiempo: "1 semana".into(),
            carrera: "C1".into(),
            materia: "M1".into(),
        }
    }

    fn names(list: &DraftList) -> Vec<String> {
        list.iter().map(|d| d.fields().unidad.clone()).collect()
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut list = DraftList::new();
        for (i, name) in ["U1", "U2", "U3"].iter().enumerate() {
            list.add(unit(name)).unwrap();
            assert_eq!(list.len(), i + 1);
        }
        assert_eq!(names(&list), vec!["U1", "U2", "U3"]);
    }

    #[test]
    fn add_rejects_blank_fields_without_mutation() {
        let mut list = DraftList::new();
        list.add(unit("U1")).unwrap();

        let mut bad = unit("U2");
        bad.recursos = "  ".into();
        assert_eq!(
            list.add(bad),
            Err(ValidationError::MissingField(UnitField::Recursos))
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn edit_then_add_same_fields_restores_list() {
        let mut list = DraftList::new();
        for name in ["U1", "U2", "U3"] {
            list.add(unit(name)).unwrap();
        }
        let before = list.unidades();
        let id_before = list.get(1).unwrap().id();

        let fields = list.edit(1).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.is_editing());
        assert_eq!(
            list.editing().unwrap().status(),
            DraftStatus::Editing { original_index: 1 }
        );

        let id = list.add(fields).unwrap();
        assert_eq!(id, id_before);
        assert_eq!(list.unidades(), before);
        assert!(!list.is_editing());
    }

    #[test]
    fn cancel_edit_restores_abandoned_draft() {
        let mut list = DraftList::from_unidades(vec![unit("U1"), unit("U2")]);
        list.edit(0).unwrap();
        assert_eq!(list.edit(0), Err(DraftError::EditInProgress));

        list.cancel_edit().unwrap();
        assert_eq!(names(&list), vec!["U1", "U2"]);
        assert_eq!(list.cancel_edit(), Err(DraftError::NoEditInProgress));
    }

    #[test]
    fn delete_during_edit_keeps_original_position_consistent() {
        let mut list = DraftList::from_unidades(vec![unit("U1"), unit("U2"), unit("U3")]);
        list.edit(2).unwrap();
        list.delete(0).unwrap();
        list.cancel_edit().unwrap();
        assert_eq!(names(&list), vec!["U2", "U3"]);
    }

    #[test]
    fn delete_last_draft_empties_list() {
        let mut list = DraftList::new();
        list.add(unit("U1")).unwrap();
        list.delete(0).unwrap();
        assert!(list.is_empty());
        assert_eq!(
            list.delete(0),
            Err(DraftError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn remove_ids_keeps_unlisted_drafts_and_edit_position() {
        let mut list = DraftList::from_unidades(vec![unit("U1"), unit("U2")]);
        let submitted = list.ids();
        list.add(unit("U3")).unwrap();
        list.add(unit("U4")).unwrap();
        list.edit(3).unwrap();

        assert_eq!(list.remove_ids(&submitted), 2);
        assert_eq!(names(&list), vec!["U3"]);
        assert_eq!(
            list.editing().unwrap().status(),
            DraftStatus::Editing { original_index: 1 }
        );
        list.cancel_edit().unwrap();
        assert_eq!(names(&list), vec!["U3", "U4"]);
    }

    #[test]
    fn clear_drops_pending_edit() {
        let mut list = DraftList::from_unidades(vec![unit("U1")]);
        list.edit(0).unwrap();
        list.clear();
        assert!(list.is_empty());
        assert!(!list.is_editing());
    }
}

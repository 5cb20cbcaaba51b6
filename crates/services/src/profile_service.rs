use std::sync::Arc;

use planes_core::model::{Session, TeacherProfile};
use storage::repository::TeacherRepository;
use tracing::info;

use crate::error::ProfileServiceError;

/// Reads and writes the teacher profile of the logged-in user.
#[derive(Clone)]
pub struct ProfileService {
    teachers: Arc<dyn TeacherRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(teachers: Arc<dyn TeacherRepository>) -> Self {
        Self { teachers }
    }

    /// The stored profile, `None` if the teacher never saved one.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if the read fails.
    pub async fn load(
        &self,
        session: &Session,
    ) -> Result<Option<TeacherProfile>, ProfileServiceError> {
        Ok(self.teachers.get_profile(session.user_name()).await?)
    }

    /// Overwrite the whole profile document of the session user.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if the write fails.
    pub async fn save(
        &self,
        session: &Session,
        profile: &TeacherProfile,
    ) -> Result<(), ProfileServiceError> {
        self.teachers
            .save_profile(session.user_name(), profile)
            .await?;
        info!(
            user = session.user_name(),
            carreras = profile.carreras().len(),
            "teacher profile saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes_core::model::{Materia, Role};
    use storage::repository::Storage;

    #[tokio::test]
    async fn save_then_load_round_trips_for_session_user() {
        let storage = Storage::in_memory();
        let service = ProfileService::new(Arc::clone(&storage.teachers));
        let ana = Session::authenticated("Ana", Role::Docente).unwrap();
        let luis = Session::authenticated("Luis", Role::Docente).unwrap();

        assert_eq!(service.load(&ana).await.unwrap(), None);

        let mut profile = TeacherProfile::new("FACEN", "Ana Pérez", "123");
        profile.add_materia(
            "Informática",
            Materia {
                nombre: "Redes".into(),
                horas_totales: 64,
                horas_semanales: 4,
            },
        );
        service.save(&ana, &profile).await.unwrap();

        assert_eq!(service.load(&ana).await.unwrap(), Some(profile));
        assert_eq!(service.load(&luis).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_is_a_full_overwrite() {
        let storage = Storage::in_memory();
        let service = ProfileService::new(Arc::clone(&storage.teachers));
        let ana = Session::authenticated("Ana", Role::Docente).unwrap();

        let mut profile = TeacherProfile::new("FACEN", "Ana", "123");
        profile.add_materia(
            "Informática",
            Materia {
                nombre: "Redes".into(),
                horas_totales: 64,
                horas_semanales: 4,
            },
        );
        service.save(&ana, &profile).await.unwrap();

        let emptied = TeacherProfile::new("FACEN", "Ana", "123");
        service.save(&ana, &emptied).await.unwrap();
        let loaded = service.load(&ana).await.unwrap().unwrap();
        assert!(loaded.carreras().is_empty());
    }
}

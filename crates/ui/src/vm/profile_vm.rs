use planes_core::model::TeacherProfile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MateriaChipVm {
    pub label: String,
    pub carrera_index: usize,
    pub materia_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarreraVm {
    pub nombre: String,
    pub summary: String,
    pub chips: Vec<MateriaChipVm>,
}

#[must_use]
pub fn map_carreras(profile: &TeacherProfile) -> Vec<CarreraVm> {
    profile
        .carreras()
        .iter()
        .enumerate()
        .map(|(carrera_index, carrera)| {
            let names: Vec<&str> = carrera.materia_names().collect();
            let summary = if names.is_empty() {
                "No hay materias asignadas".to_string()
            } else {
                format!("Materias: {}", names.join(", "))
            };
            let chips = carrera
                .materias()
                .iter()
                .enumerate()
                .map(|(materia_index, materia)| MateriaChipVm {
                    label: format!(
                        "{} - {} horas totales, {} horas semanales",
                        materia.nombre, materia.horas_totales, materia.horas_semanales
                    ),
                    carrera_index,
                    materia_index,
                })
                .collect();
            CarreraVm {
                nombre: carrera.nombre().to_string(),
                summary,
                chips,
            }
        })
        .collect()
}

/// Carrera names for the plan form selector.
#[must_use]
pub fn carrera_options(profile: &TeacherProfile) -> Vec<String> {
    profile
        .carreras()
        .iter()
        .map(|c| c.nombre().to_string())
        .collect()
}

/// Materias of `carrera`, empty when the carrera is unknown.
#[must_use]
pub fn materia_options(profile: &TeacherProfile, carrera: &str) -> Vec<String> {
    profile
        .carrera(carrera)
        .map(|c| c.materia_names().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes_core::model::Materia;

    fn materia(nombre: &str) -> Materia {
        Materia {
            nombre: nombre.into(),
            horas_totales: 64,
            horas_semanales: 4,
        }
    }

    #[test]
    fn carreras_render_summary_and_chips() {
        let mut profile = TeacherProfile::new("FACEN", "Ana", "123");
        profile.add_materia("Informática", materia("Redes"));
        profile.add_materia("Informática", materia("Bases"));

        let vms = map_carreras(&profile);
        assert_eq!(vms.len(), 1);
        assert_eq!(vms[0].summary, "Materias: Redes, Bases");
        assert_eq!(
            vms[0].chips[1].label,
            "Bases - 64 horas totales, 4 horas semanales"
        );
        assert_eq!(vms[0].chips[1].materia_index, 1);
    }

    #[test]
    fn options_follow_profile() {
        let mut profile = TeacherProfile::default();
        profile.add_materia("C1", materia("M1"));
        profile.add_materia("C2", materia("M2"));

        assert_eq!(carrera_options(&profile), vec!["C1", "C2"]);
        assert_eq!(materia_options(&profile, "C2"), vec!["M2"]);
        assert!(materia_options(&profile, "C9").is_empty());
    }
}

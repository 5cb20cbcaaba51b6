use planes_core::model::{LessonPlan, PlanId};

use crate::vm::time_fmt::format_short_date;

/// One row of the plans table: a single unidad of a stored plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanRowVm {
    pub key: String,
    pub plan_id: PlanId,
    pub carrera: String,
    pub materia: String,
    pub unidad: String,
    pub objetivos: String,
    pub situaciones: String,
    pub estrategias: String,
    pub recursos: String,
    pub tiempo: String,
    pub fecha: String,
}

/// Flatten plans into unidad rows, keeping plan order then unit order.
#[must_use]
pub fn map_plan_rows(plans: &[LessonPlan]) -> Vec<PlanRowVm> {
    plans
        .iter()
        .flat_map(|plan| {
            let fecha = format_short_date(&plan.timestamp);
            plan.unidades.iter().enumerate().map(move |(index, unit)| {
                // Legacy units may lack their own subject.
                let carrera = if unit.carrera.trim().is_empty() {
                    plan.carrera.clone()
                } else {
                    unit.carrera.clone()
                };
                let materia = if unit.materia.trim().is_empty() {
                    plan.materia.clone()
                } else {
                    unit.materia.clone()
                };
                PlanRowVm {
                    key: format!("{}-{index}", plan.id),
                    plan_id: plan.id.clone(),
                    carrera,
                    materia,
                    unidad: unit.unidad.clone(),
                    objetivos: unit.objetivos.clone(),
                    situaciones: unit.situaciones.clone(),
                    estrategias: unit.estrategias.clone(),
                    recursos: unit.recursos.clone(),
                    tiempo: unit.tiempo.clone(),
                    fecha: fecha.clone(),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes_core::model::UnitFields;
    use planes_core::time::fixed_now;

    #[test]
    fn rows_follow_plan_then_unit_order() {
        let unit = |u: &str, carrera: &str| UnitFields {
            unidad: u.into(),
            carrera: carrera.into(),
            ..UnitFields::default()
        };
        let plans = vec![
            LessonPlan {
                id: PlanId::new("b"),
                unidades: vec![unit("U1", "C1"), unit("U2", "")],
                carrera: "C-plan".into(),
                materia: "M1".into(),
                uid_docente: "Ana".into(),
                timestamp: fixed_now(),
            },
            LessonPlan {
                id: PlanId::new("a"),
                unidades: vec![unit("U9", "C2")],
                carrera: "C2".into(),
                materia: "M2".into(),
                uid_docente: "Ana".into(),
                timestamp: fixed_now(),
            },
        ];

        let rows = map_plan_rows(&plans);
        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b-0", "b-1", "a-0"]);
        assert_eq!(rows[1].carrera, "C-plan");
        assert_eq!(rows[1].materia, "M1");
        assert_eq!(rows[2].fecha, "14/11/2023");
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use planes_core::model::{
    LessonPlan, Materia, NewLessonPlan, PlanId, Role, TeacherProfile, UnitFields,
};
use planes_core::time::fixed_now;
use storage::repository::{PlanRepository, Storage, StorageError};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

struct OfflinePlans;

#[async_trait]
impl PlanRepository for OfflinePlans {
    async fn list_plans(&self) -> Result<Vec<LessonPlan>, StorageError> {
        Err(StorageError::Unavailable("offline".into()))
    }
    async fn get_plan(&self, _: &PlanId) -> Result<Option<LessonPlan>, StorageError> {
        Err(StorageError::Unavailable("offline".into()))
    }
    async fn create_plan(&self, _: &NewLessonPlan) -> Result<PlanId, StorageError> {
        Err(StorageError::Unavailable("offline".into()))
    }
    async fn update_plan(&self, _: &LessonPlan) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("offline".into()))
    }
    async fn delete_plan(&self, _: &PlanId) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("offline".into()))
    }
}

fn unit(unidad: &str) -> UnitFields {
    UnitFields {
        unidad: unidad.into(),
        objetivos: format!("Objetivo de {unidad}"),
        situaciones: "Debate".into(),
        estrategias: "Proyecto".into(),
        recursos: "Pizarra".into(),
        tiempo: "2 semanas".into(),
        carrera: "Informática".into(),
        materia: "Bases de Datos".into(),
    }
}

async fn seed_plan(storage: &Storage, owner: &str, units: &[&str]) -> PlanId {
    storage
        .plans
        .create_plan(&NewLessonPlan {
            unidades: units.iter().map(|u| unit(u)).collect(),
            carrera: "Informática".into(),
            materia: "Bases de Datos".into(),
            uid_docente: owner.into(),
            timestamp: fixed_now(),
        })
        .await
        .expect("seed plan")
}

async fn seed_profile(storage: &Storage) {
    let mut profile = TeacherProfile::new("FACEN", "Ana Pérez", "4.567.890");
    profile.add_materia(
        "Informática",
        Materia {
            nombre: "Bases de Datos".into(),
            horas_totales: 96,
            horas_semanales: 6,
        },
    );
    storage
        .teachers
        .save_profile("Ana", &profile)
        .await
        .expect("seed profile");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, None).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Ingrese su usuario"), "missing user label in {html}");
    assert!(html.contains("Ingrese su PIN"), "missing pin label in {html}");
    assert!(html.contains("Ingresar"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_greets_user() {
    let mut harness = setup_view_harness(ViewKind::Landing, Some(Role::Docente)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Bienvenido, Ana"), "missing greeting in {html}");
    assert!(html.contains("Hoy es:"), "missing date in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn menu_view_smoke_filters_by_role() {
    let mut docente = setup_view_harness(ViewKind::Menu, Some(Role::Docente)).await;
    docente.settle().await;
    let html = docente.render();
    assert!(html.contains("Registrar Plan"), "missing plan entry in {html}");
    assert!(html.contains("Salir"), "missing exit entry in {html}");

    let mut verificador = setup_view_harness(ViewKind::Menu, Some(Role::Verificador)).await;
    verificador.settle().await;
    let html = verificador.render();
    assert!(!html.contains("Registrar Plan"), "unexpected plan entry in {html}");
    assert!(html.contains("Ver Datos"), "missing data entry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn plans_view_smoke_lists_only_own_units() {
    let storage = Storage::in_memory();
    seed_profile(&storage).await;
    seed_plan(&storage, "Ana", &["Unidad A1", "Unidad A2"]).await;
    seed_plan(&storage, "Luis", &["Unidad L1"]).await;

    let mut harness =
        setup_view_harness_with_storage(ViewKind::Plans, Some(Role::Docente), storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Unidad A1"), "missing own unit in {html}");
    assert!(html.contains("Unidad A2"), "missing own unit in {html}");
    assert!(!html.contains("Unidad L1"), "foreign unit leaked in {html}");
    assert!(html.contains("FACEN"), "missing teacher panel in {html}");
    assert!(html.contains("Materias: Bases de Datos"), "missing carreras in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn plans_view_smoke_shows_store_error() {
    let storage = Storage {
        plans: Arc::new(OfflinePlans),
        ..Storage::in_memory()
    };
    let mut harness =
        setup_view_harness_with_storage(ViewKind::Plans, Some(Role::Docente), storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("No se pudo acceder a los datos"),
        "missing error banner in {html}"
    );
    assert!(html.contains("Reintentar"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn plan_edit_view_smoke_shows_not_found_banner() {
    let mut harness =
        setup_view_harness(ViewKind::PlanEdit("gone".into()), Some(Role::Docente)).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("El plan solicitado no existe."),
        "missing not found banner in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn plan_edit_view_smoke_loads_units() {
    let storage = Storage::in_memory();
    seed_profile(&storage).await;
    let id = seed_plan(&storage, "Ana", &["Unidad A1", "Unidad A2"]).await;

    let mut harness = setup_view_harness_with_storage(
        ViewKind::PlanEdit(id.as_str().to_string()),
        Some(Role::Docente),
        storage,
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Editar Plan Educativo"), "missing title in {html}");
    assert!(html.contains("Unidad A2"), "missing unit in {html}");
    assert!(html.contains("Actualizar Plan"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn plan_create_view_smoke_offers_profile_carreras() {
    let storage = Storage::in_memory();
    seed_profile(&storage).await;

    let mut harness =
        setup_view_harness_with_storage(ViewKind::PlanCreate, Some(Role::Docente), storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Informática"), "missing carrera option in {html}");
    assert!(
        html.contains("No se ha agregado ninguna unidad."),
        "missing empty draft hint in {html}"
    );
    assert!(html.contains("Unidad y Contenidos"), "missing unit field in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn plan_create_view_smoke_refuses_verificador() {
    let storage = Storage::in_memory();
    seed_profile(&storage).await;

    let mut harness =
        setup_view_harness_with_storage(ViewKind::PlanCreate, Some(Role::Verificador), storage)
            .await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Su rol no permite registrar planes educativos."),
        "missing role banner in {html}"
    );
    assert!(!html.contains("Guardar Plan"), "form rendered for verificador in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_saved_materias() {
    let storage = Storage::in_memory();
    seed_profile(&storage).await;

    let mut harness =
        setup_view_harness_with_storage(ViewKind::Profile, Some(Role::Docente), storage).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Datos del Docente"), "missing title in {html}");
    assert!(
        html.contains("Bases de Datos - 96 horas totales, 6 horas semanales"),
        "missing materia chip in {html}"
    );
    assert!(html.contains("4.567.890"), "missing cedula in {html}");
}

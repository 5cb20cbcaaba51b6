use planes_core::model::{
    LessonPlan, Materia, NewLessonPlan, PlanId, Role, TeacherProfile, UnitFields, UserRecord,
};
use planes_core::time::fixed_now;
use serde_json::json;
use storage::repository::{Collection, DocumentStore, Storage};
use storage::sqlite::SqliteDocumentStore;

fn unit(unidad: &str) -> UnitFields {
    UnitFields {
        unidad: unidad.into(),
        objetivos: "O1".into(),
        situaciones: "S1".into(),
        estrategias: "E1".into(),
        recursos: "R1".into(),
        tiempo: "2 semanas".into(),
        carrera: "C1".into(),
        materia: "M1".into(),
    }
}

#[tokio::test]
async fn sqlite_document_store_put_get_delete() {
    let store = SqliteDocumentStore::connect("sqlite:file:memdb_docs?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");
    store.migrate().await.expect("migrations are idempotent");

    let body = match json!({"nombre": "Ana", "carreras": []}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    store
        .put(Collection::Docentes, "Ana", body.clone())
        .await
        .unwrap();
    assert_eq!(
        store.get_one(Collection::Docentes, "Ana").await.unwrap(),
        Some(body)
    );
    assert!(
        store
            .get_one(Collection::Docentes, "Luis")
            .await
            .unwrap()
            .is_none()
    );

    let key = store
        .add(Collection::PlanesEducativos, serde_json::Map::new())
        .await
        .unwrap();
    let all = store.get_all(Collection::PlanesEducativos).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].key, key);

    store.delete(Collection::Docentes, "Ana").await.unwrap();
    store.delete(Collection::Docentes, "Ana").await.unwrap();
    assert!(store.get_all(Collection::Docentes).await.unwrap().is_empty());
}

#[tokio::test]
async fn sqlite_storage_round_trips_every_collection() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");

    storage
        .users
        .upsert_user(&UserRecord {
            name: "Ana".into(),
            pin: 1234,
            role: Role::Verificador,
        })
        .await
        .unwrap();
    let users = storage.users.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Verificador);

    let mut profile = TeacherProfile::new("FACEN", "Ana Pérez", "4.567.890");
    profile.add_materia(
        "Informática",
        Materia {
            nombre: "Bases de Datos".into(),
            horas_totales: 96,
            horas_semanales: 6,
        },
    );
    storage.teachers.save_profile("Ana", &profile).await.unwrap();
    assert_eq!(
        storage.teachers.get_profile("Ana").await.unwrap(),
        Some(profile)
    );

    let new_plan = NewLessonPlan {
        unidades: vec![unit("U1"), unit("U2")],
        carrera: "C1".into(),
        materia: "M1".into(),
        uid_docente: "Ana".into(),
        timestamp: fixed_now(),
    };
    let id = storage.plans.create_plan(&new_plan).await.unwrap();
    let stored = storage.plans.get_plan(&id).await.unwrap().unwrap();
    assert_eq!(stored, LessonPlan::from_new(id.clone(), new_plan));
    let units: Vec<_> = stored.unidades.iter().map(|u| u.unidad.as_str()).collect();
    assert_eq!(units, vec!["U1", "U2"]);

    storage.plans.delete_plan(&id).await.unwrap();
    assert!(storage.plans.list_plans().await.unwrap().is_empty());
    assert!(
        storage
            .plans
            .get_plan(&PlanId::new("missing"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn sqlite_storage_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("planes.sqlite3").display());
    let storage = Storage::sqlite(&url).await.expect("storage");
    assert!(storage.plans.list_plans().await.unwrap().is_empty());
    assert!(dir.path().join("planes.sqlite3").exists());
}

//! `DirectoryClient` against an in-process backend.

use std::sync::{Arc, Mutex};

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use company_directory::AppError;
use company_directory::client::DirectoryClient;
use company_directory::directory::{Directory, PanelSlot, UiMessage};
use company_directory::models::{
    CreateDepartment, Department, Employee, HireEmployee, OpenVacancy, Position, UpdateDepartment, UpdatePosition,
    Vacancy,
};
use company_directory::panel::{EntityId, PanelEvent};

/// Bind an ephemeral port, serve `router` on it and return a client for it.
async fn spawn_backend(router: Router) -> DirectoryClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    DirectoryClient::new(&format!("http://{addr}"), None).unwrap()
}

#[derive(Debug, Deserialize)]
struct IdForm {
    id: i32,
}

#[tokio::test]
async fn test_list_keeps_server_order() {
    let router = Router::new().route(
        "/api/department/",
        get(|| async {
            Json(json!([
                {"id": 2, "name": "Sales", "description": null},
                {"id": 1, "name": "Eng", "description": "Engineering"}
            ]))
        }),
    );
    let client = spawn_backend(router).await;

    let departments = client.list::<Department>().await.unwrap();
    let ids: Vec<i32> = departments.iter().map(|d| d.id).collect();
    assert_eq!(ids, [2, 1]);
    assert_eq!(departments[0].description, "");
}

#[tokio::test]
async fn test_department_list_renders_rows() {
    let router = Router::new().route(
        "/api/department/",
        get(|| async { Json(json!([{"id": 1, "name": "Eng", "description": "Engineering"}])) }),
    );
    let client = spawn_backend(router).await;

    let mut dir = Directory::new();
    dir.apply(Department::message(PanelEvent::Loaded(
        client.list::<Department>().await.unwrap(),
    )));

    let view = dir.departments.row(EntityId(1)).unwrap().view();
    assert_eq!(view.element_id.to_string(), "department-1");
    assert_eq!(view.text("name"), Some("Eng"));
    assert_eq!(view.text("description"), Some("Engineering"));
    let controls: Vec<String> = view.controls.iter().map(|c| c.element_id.to_string()).collect();
    assert_eq!(controls, ["department-1-delete-button", "department-1-edit-button"]);
}

#[tokio::test]
async fn test_create_unwraps_envelope() {
    let router = Router::new().route(
        "/api/department/",
        get(|| async { Json(json!([])) }).post(|Form(body): Form<CreateDepartment>| async move {
            Json(json!({"department": {"id": 7, "name": body.name, "description": body.description}}))
        }),
    );
    let client = spawn_backend(router).await;

    let created = client
        .create::<Department>(&CreateDepartment {
            name: "Ops".to_string(),
            description: "Operations".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(created.name, "Ops");
    assert_eq!(created.description, "Operations");
}

#[tokio::test]
async fn test_create_without_envelope_is_parse_error() {
    let router = Router::new().route(
        "/api/vacancy/",
        get(|| async { Json(json!([])) }).post(|| async { Json(json!({"success": "created"})) }),
    );
    let client = spawn_backend(router).await;

    let result = client
        .create::<Vacancy>(&OpenVacancy {
            position_id: 1,
            department_id: 1,
            date_opened: String::new(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Parse(_))));
}

#[tokio::test]
async fn test_update_prefers_server_record() {
    let router = Router::new().route(
        "/api/position/",
        get(|| async { Json(json!([])) }).patch(|Form(body): Form<UpdatePosition>| async move {
            Json(json!({"position": {
                "id": body.id,
                "name": body.name.to_uppercase(),
                "description": "normalized",
                "department_id": 3
            }}))
        }),
    );
    let client = spawn_backend(router).await;

    let updated = client
        .update::<Position>(&UpdatePosition {
            id: 4,
            name: "qa".to_string(),
            description: "testing".to_string(),
            department_id: None,
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "QA");
    assert_eq!(updated.description, "normalized");
    assert_eq!(updated.department_id, Some(3));
}

#[tokio::test]
async fn test_update_without_envelope_uses_submitted_values() {
    let router = Router::new().route(
        "/api/department/",
        get(|| async { Json(json!([])) }).patch(|| async { Json(json!({"success": "updated"})) }),
    );
    let client = spawn_backend(router).await;

    let update = UpdateDepartment {
        id: 3,
        name: "Finance".to_string(),
        description: "Money".to_string(),
    };
    let updated = client.update::<Department>(&update).await.unwrap();
    assert_eq!(updated, update.applied());
}

#[tokio::test]
async fn test_delete_sends_id_form() {
    let deleted: Arc<Mutex<Vec<i32>>> = Arc::default();
    let router = Router::new()
        .route(
            "/api/position/",
            get(|| async { Json(json!([])) }).delete(
                |State(deleted): State<Arc<Mutex<Vec<i32>>>>, Form(body): Form<IdForm>| async move {
                    deleted.lock().unwrap().push(body.id);
                    Json(json!({"success": "deleted"}))
                },
            ),
        )
        .with_state(deleted.clone());
    let client = spawn_backend(router).await;

    client.delete::<Position>(EntityId(12)).await.unwrap();
    assert_eq!(*deleted.lock().unwrap(), [12]);
}

#[tokio::test]
async fn test_error_body_message_is_extracted() {
    let router = Router::new().route(
        "/api/department/",
        get(|| async { Json(json!([])) }).delete(|| async {
            (StatusCode::BAD_REQUEST, Json(json!({"error": "department has positions"})))
        }),
    );
    let client = spawn_backend(router).await;

    let err = client.delete::<Department>(EntityId(1)).await.unwrap_err();
    match &err {
        AppError::Api { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "department has positions");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.display_text("error deleting department"), "department has positions");
}

#[tokio::test]
async fn test_unparsable_error_body_falls_back_to_static_text() {
    let router = Router::new().route(
        "/api/vacancy/",
        get(|| async { Json(json!([])) })
            .delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>").into_response() }),
    );
    let client = spawn_backend(router).await;

    let err = client.delete::<Vacancy>(EntityId(5)).await.unwrap_err();
    assert!(matches!(err, AppError::Api { status: 500, .. }));
    assert_eq!(err.display_text("error deleting vacancy"), "error deleting vacancy");
}

#[tokio::test]
async fn test_hire_closes_vacancy() {
    let router = Router::new()
        .route(
            "/api/vacancy/",
            get(|| async {
                Json(json!([
                    {"id": 5, "position": {"id": 2, "name": "QA"}, "date_opened": 1514851200, "department_id": 1},
                    {"id": 6, "position": {"id": 3, "name": "Backend"}, "date_opened": "03/04/2019", "department_id": 1}
                ]))
            }),
        )
        .route(
            "/api/employee/",
            get(|| async { Json(json!([])) }).post(|Form(body): Form<HireEmployee>| async move {
                Json(json!({"employee": {
                    "id": 40,
                    "name": body.name,
                    "surname": body.surname,
                    "position": {"id": 2, "name": "QA"},
                    "department": {"id": 1, "name": "Eng"}
                }}))
            }),
        );
    let client = spawn_backend(router).await;

    let mut dir = Directory::new();
    dir.apply(UiMessage::Vacancies(PanelEvent::Loaded(
        client.list::<Vacancy>().await.unwrap(),
    )));
    assert_eq!(dir.vacancies.get(EntityId(5)).unwrap().date_opened, "01/02/2018");

    let request = HireEmployee {
        name: "Grace".to_string(),
        surname: "Hopper".to_string(),
        vacancy_id: 5,
    };
    let result = client.create::<Employee>(&request).await;
    dir.apply(Employee::created(&request, result));

    assert!(dir.vacancies.get(EntityId(5)).is_none());
    assert_eq!(dir.vacancies.len(), 1);
    let hired = dir.employees.get(EntityId(40)).unwrap();
    assert_eq!(hired.full_name(), "Grace Hopper");
}

#[tokio::test]
async fn test_company_info_and_connection() {
    let router = Router::new().route(
        "/api/company/",
        get(|| async { Json(json!({"company_name": "Evo", "departments": 4, "positions": 9})) }),
    );
    let client = spawn_backend(router).await;

    let info = client.company().await.unwrap();
    assert_eq!(info.company_name, "Evo");
    assert_eq!(info.departments, 4);
    assert!(client.test_connection().await.unwrap());

    let missing = spawn_backend(Router::new()).await;
    assert!(!missing.test_connection().await.unwrap());
}

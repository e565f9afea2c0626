//! RemoteStore against an in-process fake of the API gateway.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use bday_core::date::parse_date;
use bday_core::{
    BdayError, BirthdayBook, BirthdayStore, BirthdayUpdate, NewBirthday, NewGroup, RemoteStore,
};
use serde_json::{Value, json};

#[derive(Default)]
struct Gateway {
    birthdays: Vec<Value>,
    groups: Vec<Value>,
    messages: Vec<Value>,
    next_id: u32,
}

type Shared = Arc<Mutex<Gateway>>;
type ApiError = (StatusCode, Json<Value>);

fn not_found() -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Birthday not found" })))
}

async fn list_birthdays(State(gw): State<Shared>) -> Json<Value> {
    Json(Value::Array(gw.lock().unwrap().birthdays.clone()))
}

async fn create_birthday(State(gw): State<Shared>, Json(mut body): Json<Value>) -> Json<Value> {
    let mut gw = gw.lock().unwrap();
    gw.next_id += 1;
    body["birthday_id"] = json!(format!("b-{}", gw.next_id));
    gw.birthdays.push(body.clone());
    Json(body)
}

async fn update_birthday(
    State(gw): State<Shared>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let mut gw = gw.lock().unwrap();
    let slot = gw
        .birthdays
        .iter_mut()
        .find(|b| b["birthday_id"] == id.as_str())
        .ok_or_else(not_found)?;
    body["birthday_id"] = json!(id);
    *slot = body.clone();
    Ok(Json(body))
}

async fn delete_birthday(
    State(gw): State<Shared>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut gw = gw.lock().unwrap();
    let before = gw.birthdays.len();
    gw.birthdays.retain(|b| b["birthday_id"] != id.as_str());
    if gw.birthdays.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_groups(State(gw): State<Shared>) -> Json<Value> {
    Json(Value::Array(gw.lock().unwrap().groups.clone()))
}

async fn create_group(State(gw): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut gw = gw.lock().unwrap();
    gw.next_id += 1;
    let id = format!("g-{}", gw.next_id);
    let mut stored = body;
    stored["group_id"] = json!(id);
    gw.groups.push(stored);
    // Only an id stub comes back, like the real gateway
    Json(json!({ "id": id }))
}

async fn test_message(State(gw): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    gw.lock().unwrap().messages.push(body);
    Json(json!({ "status": "sent" }))
}

async fn spawn_gateway() -> (String, Shared) {
    let gw: Shared = Arc::default();
    let app = Router::new()
        .route("/birthdays", get(list_birthdays).post(create_birthday))
        .route("/birthdays/{id}", put(update_birthday).delete(delete_birthday))
        .route("/groups", get(list_groups).post(create_group))
        .route("/test-message", post(test_message))
        .with_state(gw.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), gw)
}

fn store(base_url: &str) -> RemoteStore {
    RemoteStore::new(base_url, Duration::from_secs(5)).unwrap()
}

fn jane() -> NewBirthday {
    NewBirthday {
        name: "Jane Smith".into(),
        birth_date: "1985-07-22".parse().unwrap(),
        group_id: "g-1".into(),
        notes: Some("Prefers gifts to parties".into()),
    }
}

#[tokio::test]
async fn add_list_update_delete_birthday() {
    let (url, gw) = spawn_gateway().await;
    let today = parse_date("2024-04-10").unwrap();
    let mut book = BirthdayBook::new(store(&url));

    let added = book.add_birthday(jane(), today).await.unwrap();
    assert_eq!(added.id, "b-1");
    assert_eq!(gw.lock().unwrap().birthdays[0]["birth_month_day"], "07-22");

    let listed = book.birthdays().await.unwrap();
    assert_eq!(listed, vec![added.clone()]);

    let updated = book
        .update_birthday(
            "b-1",
            BirthdayUpdate {
                birth_date: Some("1985-07-23".parse().unwrap()),
                ..Default::default()
            },
            today,
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Jane Smith");
    {
        let gw = gw.lock().unwrap();
        assert_eq!(gw.birthdays[0]["birth_date"], "1985-07-23");
        assert_eq!(gw.birthdays[0]["birth_month_day"], "07-23");
    }

    book.delete_birthday("b-1").await.unwrap();
    assert!(book.birthdays().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_bodies_become_api_errors() {
    let (url, _gw) = spawn_gateway().await;
    let mut remote = store(&url);

    let err = remote.delete_birthday("missing").await.unwrap_err();
    match err {
        BdayError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Birthday not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn groups_can_be_added_but_not_removed() {
    let (url, _gw) = spawn_gateway().await;
    let today = parse_date("2024-04-10").unwrap();
    let mut book = BirthdayBook::new(store(&url));

    let family = book
        .add_group(NewGroup {
            name: "Family".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(family.id, "g-1");
    assert_eq!(book.groups().await.unwrap(), vec![family.clone()]);

    book.add_birthday(jane(), today).await.unwrap();
    assert!(matches!(
        book.delete_group("g-1").await,
        Err(BdayError::GroupInUse { count: 1, .. })
    ));
    assert!(matches!(
        book.delete_group("g-99").await,
        Err(BdayError::Unsupported(_))
    ));
}

#[tokio::test]
async fn sends_test_message() {
    let (url, gw) = spawn_gateway().await;
    let book = BirthdayBook::new(store(&url));

    let ack = book.send_test_message("g-1", "Happy Birthday!").await.unwrap();
    assert_eq!(ack["status"], "sent");
    assert_eq!(
        gw.lock().unwrap().messages,
        vec![json!({ "group_id": "g-1", "message": "Happy Birthday!" })]
    );
}

#[tokio::test]
async fn unreachable_gateway_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = store(&format!("http://{addr}")).list_birthdays().await.unwrap_err();
    assert!(matches!(err, BdayError::Http(_)));
    assert!(!err.is_user_error());
}

#[tokio::test]
async fn create_without_returned_id_is_an_error() {
    let app = Router::new()
        .route("/birthdays", post(|| async { StatusCode::CREATED }))
        .route("/groups", post(|| async { Json(json!({ "status": "ok" })) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let today = parse_date("2024-04-10").unwrap();
    let mut book = BirthdayBook::new(store(&format!("http://{addr}")));

    let err = book.add_birthday(jane(), today).await.unwrap_err();
    assert!(matches!(err, BdayError::Serialization(_)), "got {err:?}");

    let err = book
        .add_group(NewGroup {
            name: "Family".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BdayError::Serialization(_)), "got {err:?}");
}

#[tokio::test]
async fn ids_with_reserved_characters_reach_their_own_route() {
    let (url, gw) = spawn_gateway().await;
    gw.lock().unwrap().birthdays.push(json!({
        "birthday_id": "a/b?c",
        "name": "Odd Id",
        "birth_date": "2000-01-01",
        "group_id": "g-1"
    }));
    let mut remote = store(&url);

    remote.delete_birthday("a/b?c").await.unwrap();
    assert!(gw.lock().unwrap().birthdays.is_empty());
}

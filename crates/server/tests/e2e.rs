use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::Value;
use tokio::net::TcpListener;

use server::routes::{self, ServerState};
use server::startup::build_cors;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Router on an ephemeral port backed by a fresh, migrated in-memory SQLite database.
async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = configs::DatabaseConfig {
        url: "sqlite::memory:".into(),
        max_connections: 1,
        min_connections: 1,
        ..configs::DatabaseConfig::default()
    };
    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;

    let app: Router = routes::build_router(ServerState { db }, build_cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("reqwest client")
}

/// Posts the add-customer form and returns the new id taken from the redirect target.
async fn add_customer(app: &TestApp, form: &[(&str, &str)]) -> anyhow::Result<i64> {
    let res = client().post(app.url("/add/")).form(form).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    Ok(body["customer"]["id"].as_i64().expect("customer id"))
}

async fn add_reservation(app: &TestApp, customer_id: i64, start_at: &str, guests: &str) -> anyhow::Result<Value> {
    let res = client()
        .post(app.url(&format!("/{}/add-reservation/", customer_id)))
        .form(&[("startAt", start_at), ("numGuests", guests), ("notes", "")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_lists_routes() -> anyhow::Result<()> {
    let app = start_server().await?;
    let body = client().get(app.url("/api-docs/openapi.json")).send().await?.json::<Value>().await?;
    assert!(body["paths"]["/top-ten/"].is_object());
    assert!(body["paths"]["/edit-reservation/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_add_customer_redirects_to_detail() -> anyhow::Result<()> {
    let app = start_server().await?;

    let res = client()
        .post(app.url("/add/"))
        .form(&[("firstName", "Ann"), ("lastName", "Lee"), ("phone", "555-0100"), ("notes", "")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let id_segment = res.url().path().trim_matches('/').to_string();
    let body = res.json::<Value>().await?;

    assert_eq!(body["customer"]["id"].to_string(), id_segment);
    assert_eq!(body["customer"]["full_name"], "Ann  Lee");
    assert_eq!(body["customer"]["notes"], "");
    assert_eq!(body["reservations"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn e2e_add_customer_without_last_name_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().post(app.url("/add/")).form(&[("firstName", "Ann")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], 400);

    let list = client().get(app.url("/")).send().await?.json::<Value>().await?;
    assert_eq!(list.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn e2e_list_orders_by_last_name() -> anyhow::Result<()> {
    let app = start_server().await?;
    add_customer(&app, &[("firstName", "Bob"), ("lastName", "Lee")]).await?;
    add_customer(&app, &[("firstName", "Zoe"), ("lastName", "Adams")]).await?;

    let list = client().get(app.url("/")).send().await?.json::<Value>().await?;
    let last_names: Vec<_> = list.as_array().unwrap().iter().map(|c| c["last_name"].as_str().unwrap().to_string()).collect();
    assert_eq!(last_names, vec!["Adams", "Lee"]);
    Ok(())
}

#[tokio::test]
async fn e2e_missing_customer_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/999999/")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "No such customer: 999999");

    let res = client().get(app.url("/edit-reservation/999999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_search_matches_or_404s() -> anyhow::Result<()> {
    let app = start_server().await?;
    add_customer(&app, &[("firstName", "Ann"), ("lastName", "Lee")]).await?;
    add_customer(&app, &[("firstName", "Carl"), ("lastName", "Anderson")]).await?;
    add_customer(&app, &[("firstName", "Bob"), ("lastName", "Smith")]).await?;

    let res = client().post(app.url("/search/")).form(&[("name", "AN")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let found = res.json::<Value>().await?;
    assert_eq!(found.as_array().map(Vec::len), Some(2));

    let res = client().post(app.url("/search/")).form(&[("name", "zzz")]).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_edit_customer_overwrites_fields() -> anyhow::Result<()> {
    let app = start_server().await?;
    let id = add_customer(&app, &[("firstName", "Ann"), ("lastName", "Lee")]).await?;

    let res = client()
        .post(app.url(&format!("/{}/edit/", id)))
        .form(&[("firstName", "Anne"), ("middleName", "Q"), ("lastName", "Lee"), ("phone", "555-0199"), ("notes", "vip")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let edited = client().get(app.url(&format!("/{}/edit/", id))).send().await?.json::<Value>().await?;
    assert_eq!(edited["full_name"], "Anne Q Lee");
    assert_eq!(edited["phone"], "555-0199");
    assert_eq!(edited["notes"], "vip");
    Ok(())
}

#[tokio::test]
async fn e2e_reservations_flow_and_top_ten() -> anyhow::Result<()> {
    let app = start_server().await?;
    let regular = add_customer(&app, &[("firstName", "Ann"), ("lastName", "Lee")]).await?;
    let newcomer = add_customer(&app, &[("firstName", "Zoe"), ("lastName", "Adams")]).await?;

    add_reservation(&app, regular, "2024-07-03T18:00", "2").await?;
    add_reservation(&app, regular, "2024-07-01 12:30 pm", "4").await?;
    let detail = add_reservation(&app, regular, "2024-07-02 20:15", "3").await?;

    let starts: Vec<_> = detail["reservations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["start_at"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(starts, vec!["2024-07-01T12:30:00", "2024-07-02T20:15:00", "2024-07-03T18:00:00"]);
    assert_eq!(detail["reservations"][0]["formatted_start_at"], "July 1st 2024, 12:30 pm");

    let top = client().get(app.url("/top-ten/")).send().await?.json::<Value>().await?;
    assert_eq!(top[0]["id"].as_i64(), Some(regular));
    assert_eq!(top[0]["times"], 3);
    assert_eq!(top[1]["id"].as_i64(), Some(newcomer));
    assert_eq!(top[1]["times"], 0);

    let reservation_id = detail["reservations"][0]["id"].as_i64().unwrap();
    let res = client()
        .post(app.url(&format!("/edit-reservation/{}", reservation_id)))
        .form(&[("startAt", "2024-07-05T19:00"), ("numGuests", "6"), ("notes", "window")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.url().path(), format!("/{}/", regular));

    let shown = client()
        .get(app.url(&format!("/edit-reservation/{}", reservation_id)))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(shown["reservation"]["num_guests"], 6);
    assert_eq!(shown["reservation"]["notes"], "window");
    assert_eq!(shown["reservation"]["customer_id"].as_i64(), Some(regular));
    assert_eq!(shown["customer"]["last_name"], "Lee");
    Ok(())
}

#[tokio::test]
async fn e2e_reservation_needs_guests() -> anyhow::Result<()> {
    let app = start_server().await?;
    let id = add_customer(&app, &[("firstName", "Ann"), ("lastName", "Lee")]).await?;
    let res = client()
        .post(app.url(&format!("/{}/add-reservation/", id)))
        .form(&[("startAt", "2024-07-03T18:00"), ("numGuests", "0")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

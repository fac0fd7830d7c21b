use chrono::{Duration as ChronoDuration, Utc};
use homeshare_infra::{AppConfig, Stores};
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, fresh in-memory stores, ephemeral port.
        let app = homeshare_api::app::build_app(&AppConfig::default(), Stores::in_memory());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_household(client: &reqwest::Client, srv: &TestServer, member: &str, name: &str) -> Value {
    let res = client
        .post(srv.url("/households"))
        .header("x-member-id", member)
        .json(&json!({ "name": name }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn join(client: &reqwest::Client, srv: &TestServer, member: &str, code: &str) -> reqwest::Response {
    client
        .post(srv.url("/households/join"))
        .header("x-member-id", member)
        .json(&json!({ "inviteCode": code }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn member_header_required_for_household_endpoints() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .post(srv.url("/households"))
        .json(&json!({ "name": "Flat" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expense_flow_produces_balances() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let household = create_household(&client, &srv, "ana", "Maple Street").await;
    let id = household["id"].as_str().unwrap().to_string();
    let code = household["inviteCode"].as_str().unwrap().to_string();

    for member in ["ben", "cy"] {
        assert_eq!(join(&client, &srv, member, &code).await.status(), StatusCode::OK);
    }

    let res = client
        .post(srv.url(&format!("/households/{id}/expenses")))
        .header("x-member-id", "ana")
        .json(&json!({
            "title": "Groceries",
            "amount": "90.00",
            "paidBy": "ana",
            "splitBetween": ["ana", "ben", "cy"],
            "split": { "type": "equal" },
            "date": Utc::now() - ChronoDuration::days(1),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(srv.url(&format!("/households/{id}/expenses")))
        .header("x-member-id", "ben")
        .json(&json!({
            "title": "Takeaway",
            "amount": 30,
            "paidBy": "ben",
            "splitBetween": ["ana", "ben"],
            "split": { "type": "custom", "shares": { "ana": "10.00", "ben": "20.00" } },
            "date": Utc::now(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(srv.url(&format!("/households/{id}/expenses")))
        .header("x-member-id", "cy")
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"][0]["title"], "Takeaway");
    assert_eq!(body["total"], "120.00");

    let res = client
        .get(srv.url(&format!("/households/{id}/balances")))
        .header("x-member-id", "cy")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["balances"]["ana"]["netBalance"], "50.00");
    assert_eq!(body["balances"]["ben"]["netBalance"], "-20.00");
    assert_eq!(body["balances"]["ben"]["owes"]["ana"], "30.00");
    assert_eq!(body["balances"]["cy"]["netBalance"], "-30.00");

    let res = client
        .get(srv.url(&format!("/households/{id}/balances/me")))
        .header("x-member-id", "ben")
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["display"], "-$20.00");
    assert_eq!(body["label"], "You owe $20.00");
}

#[tokio::test]
async fn invalid_expenses_and_outsiders_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let household = create_household(&client, &srv, "ana", "Flat").await;
    let id = household["id"].as_str().unwrap().to_string();

    let res = client
        .post(srv.url(&format!("/households/{id}/expenses")))
        .header("x-member-id", "ana")
        .json(&json!({
            "title": "Dinner",
            "amount": "40.00",
            "paidBy": "ana",
            "splitBetween": ["ana"],
            "split": { "type": "custom", "shares": {} },
            "date": Utc::now(),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_expense");

    let res = client
        .get(srv.url(&format!("/households/{id}/balances")))
        .header("x-member-id", "mallory")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = join(&client, &srv, "ben", "ZZZZZZ").await;
    // Only fails if the random code happened to be ZZZZZZ.
    if household["inviteCode"] != "ZZZZZZ" {
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Invalid invite code");
    }

    let res = client
        .get(srv.url("/households/not-a-uuid"))
        .header("x-member-id", "ana")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chores_calendar_and_dashboard() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let household = create_household(&client, &srv, "ana", "Flat").await;
    let id = household["id"].as_str().unwrap().to_string();
    let code = household["inviteCode"].as_str().unwrap().to_string();
    assert_eq!(join(&client, &srv, "ben", &code).await.status(), StatusCode::OK);

    let res = client
        .post(srv.url(&format!("/households/{id}/chores")))
        .header("x-member-id", "ana")
        .json(&json!({
            "title": "Take out bins",
            "assignedTo": "ben",
            "dueDate": Utc::now() - ChronoDuration::hours(2),
            "priority": "high",
            "recurrence": "weekly",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let chore: Value = res.json().await.unwrap();
    let chore_id = chore["id"].as_str().unwrap().to_string();

    let res = client
        .get(srv.url(&format!("/households/{id}/dashboard")))
        .header("x-member-id", "ben")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["memberCount"], 2);
    assert_eq!(body["chores"]["overdue"], 1);
    assert_eq!(body["overdueAlert"], "1 chore is overdue and needs attention!");
    assert_eq!(body["balance"]["label"], "All settled up");

    let res = client
        .patch(srv.url(&format!("/households/{id}/chores/{chore_id}")))
        .header("x-member-id", "ben")
        .json(&json!({ "priority": "low" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(srv.url(&format!("/households/{id}/chores/{chore_id}/complete")))
        .header("x-member-id", "ben")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["chore"]["completion"]["completedBy"], "ben");
    assert_eq!(body["next"]["priority"], "low");

    let res = client
        .post(srv.url(&format!("/households/{id}/chores/{chore_id}/complete")))
        .header("x-member-id", "ben")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .get(srv.url(&format!("/households/{id}/calendar")))
        .header("x-member-id", "ana")
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["events"][0]["type"], "chore");
    assert_eq!(days[0]["overdue"], false);
}

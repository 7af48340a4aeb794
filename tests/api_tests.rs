mod common;

use axum::http::StatusCode;
use common::{TestClient, body_json, ids};
use serde_json::json;

#[tokio::test]
async fn test_auth_endpoints() {
    let mut client = TestClient::spawn().await;

    let response = client.get("/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    let response = client.api_login("admin", "falsch").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client.api_login("", "admin").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.api_login("admin", "admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["role"], "admin");

    let response = client.get("/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.json("POST", "/api/auth/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.get("/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_member_role_rules() {
    let mut client = TestClient::spawn().await;
    client.api_login("member", "member").await;

    let response = client.get("/api/vehicles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .json("POST", "/api/vehicles", json!({ "name": "TLF", "besatzung": 6 }))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(ids(&client.document("vehicles.json")), [1, 2]);

    let response = client
        .json(
            "POST",
            "/api/kameraden",
            json!({ "name": "Kai Berg", "qualifikationen": ["San", "TM"] }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], 3);

    let response = client.json("DELETE", "/api/kameraden/3", json!(null)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client.json("POST", "/api/kameraden/seed", json!({ "confirm": true })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .json("PUT", "/api/settings", json!({ "min_agt": 0 }))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_roster_changes() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    let response = client
        .json(
            "POST",
            "/api/vehicles",
            json!({ "name": "  ", "funk": "x", "besatzung": 3 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .json(
            "POST",
            "/api/vehicles",
            json!({ "name": "RW", "funk": "Florian Schwedt 1/52/1", "besatzung": 3 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(body["data"]["funk"], "Florian Schwedt 1/52/1");

    let response = client.json("DELETE", "/api/vehicles/3", json!(null)).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["deleted"], true);

    let response = client.json("DELETE", "/api/vehicles/3", json!(null)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["deleted"], false);

    let response = client.json("DELETE", "/api/vehicles/0", json!(null)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .json(
            "POST",
            "/api/kameraden",
            json!({ "name": "Sven Roth", "qualifikationen": ["Koch"] }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ids(&client.document("kameraden.json")), [1, 2]);
}

#[tokio::test]
async fn test_vehicle_crew_count_is_coerced() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    let response = client
        .json("POST", "/api/vehicles", json!({ "name": "TLF", "besatzung": "abc" }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["besatzung"], 0);

    let response = client
        .json("POST", "/api/vehicles", json!({ "name": "MTW", "besatzung": "8" }))
        .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["besatzung"], 8);
}

#[tokio::test]
async fn test_non_numeric_id_is_a_json_error() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    for uri in ["/api/vehicles/abc", "/api/kameraden/abc", "/api/vehicles/-1"] {
        let response = client.json("DELETE", uri, json!(null)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
    assert_eq!(ids(&client.document("vehicles.json")), [1, 2]);
}

#[tokio::test]
async fn test_vehicle_create_with_no_ids_left() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    let full = br#"[{"id": 18446744073709551615, "name": "A", "funk": "", "besatzung": 0}]"#;
    std::fs::write(client.data_dir.join("vehicles.json"), full).unwrap();

    let response = client.json("POST", "/api/vehicles", json!({ "name": "B" })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(client.document_bytes("vehicles.json"), full);
}

#[tokio::test]
async fn test_seed_endpoint() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    let response = client.json("POST", "/api/kameraden/seed", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ids(&client.document("kameraden.json")), [1, 2]);

    let response = client
        .json("POST", "/api/kameraden/seed", json!({ "confirm": true }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["generated"], 77);

    let body = body_json(client.get("/api/kameraden").await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 77);
}

#[tokio::test]
async fn test_besetzungscheck() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    let body = body_json(client.get("/api/besetzungscheck").await).await;
    let report = &body["data"];
    assert_eq!(report["available"], json!({ "agt": 1, "maschinist": 0, "gf": 0, "total": 2 }));
    assert_eq!(
        report["required"],
        json!({ "min_agt": 2, "min_maschinist": 1, "min_gf": 1, "crew_required": 9 })
    );
    assert_eq!(report["fulfilled"], false);

    let response = client
        .json(
            "PUT",
            "/api/settings",
            json!({ "schichtlaenge_std": 24, "min_agt": 1, "min_maschinist": 0, "min_gf": 0 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .json(
            "PUT",
            "/api/einsatz",
            json!({ "stichwort": " H: Tier ", "bemerkung": "", "mannschaftsbedarf": 2 }),
        )
        .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["stichwort"], "H: Tier");

    let body = body_json(client.get("/api/besetzungscheck").await).await;
    assert_eq!(body["data"]["fulfilled"], true);

    let body = body_json(client.get("/api/settings").await).await;
    assert_eq!(body["data"]["schichtlaenge_std"], 24);
}

#[tokio::test]
async fn test_qualification_vocabulary() {
    let mut client = TestClient::spawn().await;
    client.api_login("member", "member").await;

    let body = body_json(client.get("/api/qualifikationen").await).await;
    let tags: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["tag"].as_str().unwrap())
        .collect();
    assert_eq!(tags, ["TM", "AGT", "Maschinist", "GF", "Sprechfunker", "San"]);
}

#[tokio::test]
async fn test_vehicle_configs_follow_vehicles() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    let body = body_json(client.get("/api/vehicle-configs").await).await;
    assert_eq!(ids(&body["data"]), [1, 2]);
    assert_eq!(body["data"][0]["type"], "LF");
    assert_eq!(body["data"][0]["slots"].as_array().unwrap().len(), 9);

    let response = client.json("POST", "/api/vehicles", json!({ "name": "RW 1" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    client.json("POST", "/api/vehicles", json!({ "name": "KdoW" })).await;

    let configs = client.document("fahrzeugkonfig.json");
    assert_eq!(ids(&configs), [1, 2, 3]);
    assert_eq!(configs[2]["vehicle"], "RW 1");
    assert_eq!(configs[2]["type"], "RW");
    assert_eq!(configs[2]["slots"][1]["requires"], json!(["Maschinist"]));

    let response = client.get("/api/vehicle-configs/3").await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = client.get("/api/vehicle-configs/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = client.get("/api/vehicle-configs/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vehicle_config_management() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    let layout = json!({
        "vehicle": "ELW 1",
        "slots": [{ "position": "Fahrer" }, { "position": "Beifahrer", "requires": ["Sprechfunker"] }],
        "constraints": { "min_funk_total": 1 }
    });
    let response = client.json("POST", "/api/vehicle-configs", layout).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], 3);
    assert_eq!(body["data"]["type"], "ELW");
    assert_eq!(body["data"]["slots"][0]["allow_fallback"], true);

    let response = client
        .json(
            "PUT",
            "/api/vehicle-configs/3",
            json!({ "vehicle": "ELW 1", "slots": [{ "position": "A" }, { "position": " A " }] }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .json(
            "PUT",
            "/api/vehicle-configs/3",
            json!({ "vehicle": "ELW 1", "type": "MTW", "slots": [{ "position": "Fahrer" }] }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["type"], "MTW");

    let response = client
        .json("PUT", "/api/vehicle-configs/42", json!({ "vehicle": "GW" }))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .json("POST", "/api/vehicle-configs", json!({ "vehicle": "hlf 20" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.json("DELETE", "/api/vehicle-configs/3", json!(null)).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["deleted"], true);
    assert_eq!(ids(&client.document("fahrzeugkonfig.json")), [1, 2]);
}

#[tokio::test]
async fn test_vehicles_seeded_from_layouts() {
    let mut client = TestClient::spawn().await;
    client.api_login("admin", "admin").await;

    client
        .json(
            "POST",
            "/api/vehicle-configs",
            json!({ "vehicle": "MTF", "slots": [{ "position": "Fahrer" }, { "position": "Beifahrer" }] }),
        )
        .await;

    let response = client.json("POST", "/api/vehicles/seed", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["created"], 1);
    assert_eq!(body["data"]["skipped"], 2);
    assert_eq!(
        body["data"]["message"],
        "1 Fahrzeuge erstellt, 2 übersprungen (existieren bereits)"
    );

    let vehicles = client.document("vehicles.json");
    assert_eq!(ids(&vehicles), [1, 2, 3]);
    assert_eq!(vehicles[2]["name"], "MTF");
    assert_eq!(vehicles[2]["funk"], "Florian Schwedt 1/XX/1");
    assert_eq!(vehicles[2]["besatzung"], 2);

    let body = body_json(client.json("POST", "/api/vehicles/seed", json!({})).await).await;
    assert_eq!(body["data"]["created"], 0);
    assert_eq!(body["data"]["skipped"], 3);
}

#[tokio::test]
async fn test_crew_assignment_endpoints() {
    let mut client = TestClient::spawn().await;

    let response = client.get("/api/crew-assignment").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    client.api_login("member", "member").await;

    let response = client
        .json("POST", "/api/crew-assignment", json!({ "vehicleIds": [2] }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let plan = &body["data"];
    assert_eq!(plan["total_vehicles"], 1);
    assert_eq!(plan["assignments"][0]["vehicle"], "DLK 23/12");
    assert_eq!(plan["assignments"][0]["slots"][2]["position"], "MELDER");
    assert_eq!(plan["assignments"][0]["slots"][2]["assigned"]["id"], 1);
    assert_eq!(plan["assignments"][0]["fulfilled"], false);
    assert_eq!(ids(&plan["unassigned"]), [2]);
    assert_eq!(
        client.document("einteilung.json"),
        json!([{ "vehicle_config_id": 2, "position": "MELDER", "person_id": 1 }])
    );

    let body = body_json(client.get("/api/crew-assignment").await).await;
    let current = &body["data"];
    assert_eq!(current["total_vehicles"], 2);
    assert_eq!(current["assignments"][1]["slots"][2]["assigned"]["name"], "Max Mustermann");
    assert!(current["assignments"][0]["slots"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["assigned"].is_null()));

    let body = body_json(client.json("POST", "/api/crew-assignment", json!({})).await).await;
    let plan = &body["data"];
    assert_eq!(plan["total_vehicles"], 2);
    assert_eq!(plan["total_fulfilled"], 0);
    assert_eq!(
        plan["warnings"],
        json!(["Nicht genug AGT: 1/4 (HLF 20)", "Nicht genug Sprechfunker: 0/1 (DLK 23/12)"])
    );

    let response = client
        .json("POST", "/api/crew-assignment", json!({ "vehicleIds": "alle" }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .json("POST", "/api/vehicle-configs", json!({ "vehicle": "RW" }))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = client.json("POST", "/api/vehicles/seed", json!({})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

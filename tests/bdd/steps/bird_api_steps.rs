use cucumber::{given, then, when};
use serde_json::{Value, json};

use crate::PajarosWorld;
use crate::steps::web_steps::{http_get, record, url};

// ---------------------------------------------------------------------------
// HTTP helper functions
// ---------------------------------------------------------------------------

/// Send `body` verbatim with a JSON content type.
async fn http_send(
    world: &mut PajarosWorld,
    method: reqwest::Method,
    path: &str,
    body: String,
) -> (u16, String) {
    let url = url(world, path);
    let resp = world
        .http_client
        .request(method.clone(), &url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .unwrap_or_else(|e| panic!("{method} {url} failed: {e}"));
    record(world, resp).await
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn is_female(word: &str) -> bool {
    match word {
        "female" => true,
        "male" => false,
        other => panic!("expected 'female' or 'male', got {other:?}"),
    }
}

fn bird_json(name: &str, family: &str, sex: &str) -> Value {
    json!({"nombre": name, "familia": family, "hembra": is_female(sex)})
}

fn parse_last_response(world: &PajarosWorld) -> Value {
    let body = world
        .last_response_body
        .as_deref()
        .expect("no HTTP response body recorded");
    serde_json::from_str(body)
        .unwrap_or_else(|e| panic!("response body is not valid JSON: {e}\nbody: {body}"))
}

fn names_in_last_response(world: &PajarosWorld) -> Vec<String> {
    parse_last_response(world)
        .as_array()
        .unwrap_or_else(|| panic!("response is not a JSON array"))
        .iter()
        .map(|b| b["nombre"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn id_of(world: &PajarosWorld, alias: &str) -> i64 {
    *world
        .bird_ids
        .get(alias)
        .unwrap_or_else(|| panic!("no bird with alias '{alias}'"))
}

/// Create a bird via the API and remember its id under `alias`.
async fn api_create_bird(world: &mut PajarosWorld, alias: &str, body: Value) {
    let (status, body_text) =
        http_send(world, reqwest::Method::POST, "/pajaros", body.to_string()).await;
    assert_eq!(
        status, 201,
        "expected 201 from POST /pajaros but got {status}: {body_text}"
    );
    let created: Value = serde_json::from_str(&body_text)
        .unwrap_or_else(|e| panic!("POST /pajaros response is not valid JSON: {e}\n{body_text}"));
    let id = created["id"]
        .as_i64()
        .unwrap_or_else(|| panic!("POST /pajaros response has no integer 'id': {created}"));
    world.bird_ids.insert(alias.to_string(), id);
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given(expr = "a {word} bird {string} of family {string} created as {string}")]
async fn a_bird_created_as(
    world: &mut PajarosWorld,
    sex: String,
    name: String,
    family: String,
    alias: String,
) {
    api_create_bird(world, &alias, bird_json(&name, &family, &sex)).await;
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when(expr = "I create a {word} bird {string} of family {string} as {string}")]
async fn i_create_a_bird(
    world: &mut PajarosWorld,
    sex: String,
    name: String,
    family: String,
    alias: String,
) {
    api_create_bird(world, &alias, bird_json(&name, &family, &sex)).await;
}

#[when(expr = "I POST the raw body {string} to {string}")]
async fn i_post_raw_body(world: &mut PajarosWorld, body: String, path: String) {
    http_send(world, reqwest::Method::POST, &path, body).await;
}

#[when(expr = "I PUT the raw body {string} to {string}")]
async fn i_put_raw_body(world: &mut PajarosWorld, body: String, path: String) {
    http_send(world, reqwest::Method::PUT, &path, body).await;
}

#[when(expr = "I replace bird {string} with a {word} bird {string} of family {string}")]
async fn i_replace_bird(
    world: &mut PajarosWorld,
    alias: String,
    sex: String,
    name: String,
    family: String,
) {
    let id = id_of(world, &alias);
    let body = bird_json(&name, &family, &sex).to_string();
    http_send(world, reqwest::Method::PUT, &format!("/pajaros/{id}"), body).await;
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the response is an empty JSON array")]
async fn the_response_is_an_empty_array(world: &mut PajarosWorld) {
    assert_eq!(parse_last_response(world), json!([]));
}

#[then(expr = "the response lists the bird {string}")]
async fn the_response_lists_the_bird(world: &mut PajarosWorld, name: String) {
    let names = names_in_last_response(world);
    assert!(
        names.contains(&name),
        "expected {name:?} in listing, got {names:?}"
    );
}

#[then(expr = "the response does not list the bird {string}")]
async fn the_response_does_not_list_the_bird(world: &mut PajarosWorld, name: String) {
    let names = names_in_last_response(world);
    assert!(
        !names.contains(&name),
        "expected {name:?} to be absent, got {names:?}"
    );
}

#[then(expr = "the response lists {int} birds")]
async fn the_response_lists_n_birds(world: &mut PajarosWorld, expected: usize) {
    let names = names_in_last_response(world);
    assert_eq!(names.len(), expected, "listing was {names:?}");
}

#[then(expr = "the response error is {string}")]
async fn the_response_error_is(world: &mut PajarosWorld, expected: String) {
    let body = parse_last_response(world);
    assert_eq!(body["error"], json!(expected), "body was {body}");
}

#[then("the response carries an error message")]
async fn the_response_carries_an_error_message(world: &mut PajarosWorld) {
    let body = parse_last_response(world);
    let message = body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("no 'error' string in {body}"));
    assert!(!message.is_empty());
}

#[then(expr = "the response is bird {string} named {string} of family {string}")]
async fn the_response_is_bird(
    world: &mut PajarosWorld,
    alias: String,
    name: String,
    family: String,
) {
    let id = id_of(world, &alias);
    let body = parse_last_response(world);
    assert_eq!(body["id"], json!(id), "body was {body}");
    assert_eq!(body["nombre"], json!(name), "body was {body}");
    assert_eq!(body["familia"], json!(family), "body was {body}");
}

#[then(expr = "birds {string} and {string} have different ids")]
async fn birds_have_different_ids(world: &mut PajarosWorld, a: String, b: String) {
    assert_ne!(id_of(world, &a), id_of(world, &b));
}

#[then(expr = "listing all birds shows {string} named {string}")]
async fn listing_shows_bird_named(world: &mut PajarosWorld, alias: String, name: String) {
    let id = id_of(world, &alias);
    http_get(world, "/pajaros").await;
    let body = parse_last_response(world);
    let found = body
        .as_array()
        .expect("listing is not an array")
        .iter()
        .find(|b| b["id"] == json!(id))
        .unwrap_or_else(|| panic!("bird {alias} (id {id}) missing from {body}"));
    assert_eq!(found["nombre"], json!(name));
}

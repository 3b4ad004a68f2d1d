use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use littlesearch_core::Corpus;
use serde_json::Value;
use server::{build_app, AppConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tower::ServiceExt;

const TOKEN: &str = "secret";

fn build_tiny_corpus(dir: &Path) {
    fs::write(dir.join("noise.txt"), "the a and\n").unwrap();
    fs::write(dir.join("docs.txt"), "d1.txt\nd2.txt\nd3.txt\nd4.txt\n").unwrap();
    fs::write(dir.join("d1.txt"), "Cat cat cat. The cat, the cat!").unwrap();
    fs::write(dir.join("d2.txt"), "A cat\nand a cat.").unwrap();
    fs::write(dir.join("d3.txt"), "dog dog dog dog dog").unwrap();
    fs::write(dir.join("d4.txt"), "The dog barked at the cat? No, at the bird.").unwrap();
}

fn app_for(dir: &Path) -> Router {
    let corpus = Corpus::new(dir.join("docs.txt")).with_noise(dir.join("noise.txt"));
    build_app(AppConfig { corpus, admin_token: Some(TOKEN.into()) }).unwrap()
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = call(app, req).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn documents(json: &Value) -> Vec<String> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["document"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn search_ranks_by_frequency_with_first_keyword_winning_ties() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = app_for(dir.path());

    // cat: d1(5) d2(2) d4(1); dog: d3(5) d4(1)
    let (status, json) = get(app, "/search?kw1=Cat&kw2=DOG!").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kw1"], "cat");
    assert_eq!(json["kw2"], "dog");
    assert_eq!(documents(&json), vec!["d1.txt", "d3.txt", "d2.txt", "d4.txt"]);
    assert_eq!(json["results"][0]["frequency"], 5);
}

#[tokio::test]
async fn search_without_matches_returns_null_results() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = app_for(dir.path());

    let (status, json) = get(app.clone(), "/search?kw1=whale&kw2=shark").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["results"].is_null());

    let (_, json) = get(app, "/search?kw1=bird&kw2=whale&k=1").await;
    assert_eq!(documents(&json), vec!["d4.txt"]);
}

#[tokio::test]
async fn keyword_and_stats_endpoints() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = app_for(dir.path());

    let (status, json) = get(app.clone(), "/keyword/dog").await;
    assert_eq!(status, StatusCode::OK);
    let occs = json["occurrences"].as_array().unwrap();
    assert_eq!(occs.len(), 2);
    assert_eq!(occs[0]["document"], "d3.txt");
    assert_eq!(occs[0]["frequency"], 5);

    let (status, _) = get(app.clone(), "/keyword/the").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = get(app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["documents"], 4);
}

#[tokio::test]
async fn rebuild_requires_token_and_swaps_index() {
    let dir = tempdir().unwrap();
    build_tiny_corpus(dir.path());
    let app = app_for(dir.path());

    let req = Request::post("/index/rebuild").body(Body::empty()).unwrap();
    let (status, _) = call(app.clone(), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    fs::write(dir.path().join("d2.txt"), "dog dog dog dog dog dog").unwrap();
    let req = Request::post("/index/rebuild")
        .header("X-ADMIN-TOKEN", TOKEN)
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(app.clone(), req).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get(app, "/search?kw1=dog&kw2=cat").await;
    assert_eq!(documents(&json), vec!["d2.txt", "d3.txt", "d1.txt", "d4.txt"]);
}

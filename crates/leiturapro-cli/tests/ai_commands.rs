//! `analyze` and `passage` against a stubbed Gemini endpoint.

use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-test:generateContent";

/// Write a config pointing at `server` and return the working directory.
fn workspace(server: &MockServer) -> TempDir {
    let dir = TempDir::new().unwrap();
    let config = format!(
        "[gemini]\napi_key = \"test-key\"\nbase_url = \"{}\"\nmodel = \"gemini-test\"\ntimeout_secs = 5\n",
        server.uri()
    );
    std::fs::write(dir.path().join("leiturapro.toml"), config).unwrap();
    dir
}

async fn run(dir: &TempDir, args: &[&str]) -> Output {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("leiturapro").unwrap();
    cmd.current_dir(dir.path()).env("HOME", dir.path()).args(args);
    for var in ["LEITURAPRO_API_KEY", "GEMINI_API_KEY", "API_KEY"] {
        cmd.env_remove(var);
    }
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"parts": [{"text": text}]},
            "groundingMetadata": {
                "groundingChunks": [
                    {"web": {"uri": "https://novaescola.example/fluencia", "title": "Nova Escola"}}
                ]
            }
        }]
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn analyze_prints_report_and_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("**Desempenho**: ótimo progresso")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = workspace(&server);
    let output = run(&dir, &["analyze", "--student", "Elisa"]).await;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Análise pedagógica: Elisa Rocha"));
    assert!(stdout.contains("ótimo progresso"));
    assert!(stdout.contains("Fontes:"));
    assert!(stdout.contains("Nova Escola <https://novaescola.example/fluencia>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn analyze_falls_back_when_service_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = workspace(&server);
    let output = run(&dir, &["analyze", "--student", "Felipe"]).await;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Erro ao conectar com o serviço de pesquisa do Google."));
    assert!(!stdout.contains("Fontes:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn passage_prints_plain_text() {
    let server = MockServer::start().await;
    let passage = serde_json::json!({
        "title": "As Abelhas",
        "content": "As abelhas polinizam as flores.",
        "questions": ["O que as abelhas fazem?", "Onde vivem?", "Por que são importantes?"]
    })
    .to_string();
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&passage)))
        .mount(&server)
        .await;

    let dir = workspace(&server);
    let output = run(
        &dir,
        &["passage", "--grade", "2º Ano Fundamental", "--topic", "Abelhas"],
    )
    .await;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("As Abelhas\n\nAs abelhas polinizam as flores.\n\nPerguntas:\n"));
    assert!(stdout.contains("Por que são importantes?"));
    assert!(stdout.contains("Nova Escola"));
}

#[tokio::test(flavor = "multi_thread")]
async fn passage_failure_shows_retry_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("not json")))
        .mount(&server)
        .await;

    let dir = workspace(&server);
    let output = run(&dir, &["passage", "--grade", "1º Ano", "--topic", "Sol"]).await;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(
        "Erro ao gerar material. Tente novamente ou verifique as configurações."
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn passage_rejected_key_points_at_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let dir = workspace(&server);
    let output = run(&dir, &["passage", "--grade", "1º Ano", "--topic", "Sol"]).await;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Erro ao gerar material."));
    assert!(stderr.contains("check the API key and model in leiturapro.toml"));
}

#[tokio::test(flavor = "multi_thread")]
async fn passage_rate_limited_reports_wait() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
        .mount(&server)
        .await;

    let dir = workspace(&server);
    let output = run(&dir, &["passage", "--grade", "1º Ano", "--topic", "Lua"]).await;
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rate limited, try again in 12s"));
}

use demo_localization::{
    build_app,
    config::{AppConfig, Environment},
};
use poem::{
    endpoint::BoxEndpoint,
    http::{header, StatusCode},
    test::{TestClient, TestResponse},
    web::cookie::Cookie,
    Response,
};

const FORM: &str = "application/x-www-form-urlencoded";

fn client() -> TestClient<BoxEndpoint<'static, Response>> {
    TestClient::new(build_app(&AppConfig::default()).unwrap())
}

fn set_cookie(resp: &TestResponse) -> Option<Cookie> {
    resp.0
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Cookie::parse(value).ok())
}

async fn body(resp: TestResponse) -> String {
    resp.0.into_body().into_string().await.unwrap()
}

#[tokio::test]
async fn home_page_in_default_culture() {
    let cli = client();
    let resp = cli.get("/").send().await;
    resp.assert_status_is_ok();
    resp.assert_content_type("text/html; charset=utf-8");
    resp.assert_header(header::CONTENT_LANGUAGE, "en-US");
    resp.assert_header_exist("x-request-id");

    let body = body(resp).await;
    assert!(body.contains("<html lang=\"en-US\">"));
    assert!(body.contains("<h1>Welcome</h1>"));
    assert!(body.contains("<option value=\"en-US\" selected>"));
}

#[tokio::test]
async fn home_page_in_spanish_uses_suffixed_view() {
    let cli = client();
    let resp = cli
        .get("/Home/Index")
        .header(header::ACCEPT_LANGUAGE, "es-ES,en;q=0.5")
        .send()
        .await;
    resp.assert_status_is_ok();
    resp.assert_header(header::CONTENT_LANGUAGE, "es-ES");

    let body = body(resp).await;
    assert!(body.contains("<h1>Bienvenido</h1>"));
    assert!(body.contains("Esta vista se ha seleccionado"));
    assert!(body.contains("<option value=\"es-ES\" selected>"));
}

#[tokio::test]
async fn privacy_page() {
    let cli = client();
    let resp = cli
        .get("/Home/Privacy")
        .header(header::ACCEPT_LANGUAGE, "es-ES")
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = body(resp).await;
    assert!(body.contains("<h1>Política de privacidad</h1>"));
    assert!(body.contains("name=\"returnUrl\""));
}

#[tokio::test]
async fn error_page_is_not_cached() {
    let cli = client();
    let resp = cli.get("/Home/Error").send().await;
    resp.assert_status_is_ok();
    resp.assert_header(header::CACHE_CONTROL, "no-store, no-cache, max-age=0");
    resp.assert_header(header::PRAGMA, "no-cache");

    let request_id = resp.0.header("x-request-id").unwrap().to_string();
    let body = body(resp).await;
    assert!(body.contains("An error occurred while processing your request."));
    assert!(body.contains(&request_id));
}

#[tokio::test]
async fn get_value() {
    let cli = client();

    let resp = cli.get("/TestController1/GetValue").send().await;
    resp.assert_status_is_ok();
    resp.assert_text("Welcome").await;

    let resp = cli
        .get("/TestController1/GetValue")
        .header(header::ACCEPT_LANGUAGE, "fr-FR, es-ES;q=0.8")
        .send()
        .await;
    resp.assert_text("Bienvenido").await;
}

#[tokio::test]
async fn set_culture_then_follow_cookie() {
    let cli = client();
    let resp = cli
        .post("/Home/SetCulture")
        .content_type(FORM)
        .body("culture=es-ES&returnUrl=%2FHome%2FPrivacy")
        .send()
        .await;
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header(header::LOCATION, "/Home/Privacy");

    let cookie = set_cookie(&resp).expect("culture cookie");
    assert_eq!(cookie.name(), ".Poem.Culture");
    assert_eq!(cookie.value_str(), "c=es-ES|uic=es-ES");
    assert_eq!(cookie.path(), Some("/"));
    assert!(cookie.expires().is_some());

    let cookie_header = resp
        .0
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_string();

    let resp = cli
        .get("/TestController1/GetValue")
        .header(header::COOKIE, cookie_header)
        .header(header::ACCEPT_LANGUAGE, "en-US")
        .send()
        .await;
    resp.assert_header(header::CONTENT_LANGUAGE, "es-ES");
    resp.assert_text("Bienvenido").await;
}

#[tokio::test]
async fn set_culture_rejects_open_redirect() {
    let cli = client();
    let resp = cli
        .post("/Home/SetCulture")
        .content_type(FORM)
        .body("culture=es-ES&returnUrl=https%3A%2F%2Fevil.example%2Fphish")
        .send()
        .await;
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header(header::LOCATION, "/");
    assert_eq!(set_cookie(&resp).unwrap().value_str(), "c=es-ES|uic=es-ES");
}

#[tokio::test]
async fn set_culture_without_fields() {
    let cli = client();
    let resp = cli
        .post("/Home/SetCulture")
        .content_type(FORM)
        .body("")
        .send()
        .await;
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header(header::LOCATION, "/");
    resp.assert_header_is_not_exist(header::SET_COOKIE);
}

#[tokio::test]
async fn set_culture_without_body() {
    let cli = client();
    let resp = cli.post("/Home/SetCulture").send().await;
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header(header::LOCATION, "/");
    resp.assert_header_is_not_exist(header::SET_COOKIE);
}

#[tokio::test]
async fn set_culture_from_query_string() {
    let cli = client();
    let resp = cli
        .post("/Home/SetCulture")
        .query("culture", &"es-ES")
        .query("returnUrl", &"/Home/Privacy")
        .send()
        .await;
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header(header::LOCATION, "/Home/Privacy");
    assert_eq!(set_cookie(&resp).unwrap().value_str(), "c=es-ES|uic=es-ES");
}

#[tokio::test]
async fn page_with_trailing_id() {
    let cli = client();
    let resp = cli.get("/Home/Privacy/5").send().await;
    resp.assert_status_is_ok();
    let resp = cli.get("/Home/Index/5").send().await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn set_culture_ignores_unsupported_culture() {
    let cli = client();
    let resp = cli
        .post("/Home/SetCulture")
        .content_type(FORM)
        .body("culture=xx-YY&returnUrl=%2F")
        .send()
        .await;
    resp.assert_status(StatusCode::SEE_OTHER);
    resp.assert_header_is_not_exist(header::SET_COOKIE);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let cli = client();
    let resp = cli.get("/Nope").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn development_environment() {
    let config = AppConfig::default().environment(Environment::Development);
    let cli = TestClient::new(build_app(&config).unwrap());
    let resp = cli.get("/").send().await;
    resp.assert_status_is_ok();
    resp.assert_header(header::CONTENT_LANGUAGE, "en-US");
}

#[tokio::test]
async fn resources_from_directory() {
    let config =
        AppConfig::default().resources_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"));
    let cli = TestClient::new(build_app(&config).unwrap());
    let resp = cli
        .get("/TestController1/GetValue")
        .header(header::ACCEPT_LANGUAGE, "es-ES")
        .send()
        .await;
    resp.assert_text("Bienvenido").await;
}

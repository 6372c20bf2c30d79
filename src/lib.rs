//! A culture-based localization demo built on
//! [Poem](https://crates.io/crates/poem).
//!
//! Every request is rendered in a culture chosen from the culture cookie, the
//! `Accept-Language` header or the default culture, in that order. The culture
//! picker posts to `/Home/SetCulture`, which stores the choice in the cookie.
//!
//! # Routes
//!
//! | Method | Path                        | Description                         |
//! |--------|-----------------------------|-------------------------------------|
//! | GET    | `/`                         | Home page                           |
//! | GET    | `/Home/Privacy`             | Privacy page                        |
//! | GET    | `/Home/Error`               | Error page, never cached            |
//! | POST   | `/Home/SetCulture`          | Store the culture and redirect back |
//! | GET    | `/TestController1/GetValue` | The localized `WelcomeMessage`      |
//!
//! Every route except `/` also accepts an optional trailing `/:id` segment.
//!
//! # Example
//!
//! ```
//! use demo_localization::{build_app, config::AppConfig};
//! use poem::{http::header, test::TestClient};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let app = build_app(&AppConfig::default()).unwrap();
//! let cli = TestClient::new(app);
//!
//! let resp = cli
//!     .get("/TestController1/GetValue")
//!     .header(header::ACCEPT_LANGUAGE, "es-ES")
//!     .send()
//!     .await;
//! resp.assert_status_is_ok();
//! resp.assert_text("Bienvenido").await;
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod controllers;
pub mod culture;
pub mod error;
pub mod error_page;
pub mod local_url;
pub mod resources;
pub mod views;

use poem::{
    endpoint::BoxEndpoint,
    get,
    middleware::{CatchPanic, RequestId, Tracing},
    post, EndpointExt, Response, Route,
};

pub use crate::error::AppError;
use crate::{
    config::AppConfig,
    controllers::{home, test_controller},
    culture::{CultureCatalog, CulturePersistence, RequestLocalization},
    error_page::ErrorPage,
    resources::{Resources, ResourcesBuilder},
    views::Views,
};

const BUILTIN_RESOURCES: &[(&str, &str)] = &[
    ("en-US", include_str!("../resources/en-US/shared.ftl")),
    ("es-ES", include_str!("../resources/es-ES/shared.ftl")),
];

fn load_resources(config: &AppConfig, catalog: &CultureCatalog) -> Result<Resources, AppError> {
    let builder = match &config.resources_dir {
        Some(dir) => {
            tracing::info!(path = ?dir, "loading resources from directory");
            Resources::builder().add_path(dir)
        }
        None => BUILTIN_RESOURCES
            .iter()
            .fold(Resources::builder(), |builder: ResourcesBuilder, (culture, ftl)| {
                builder.add_ftl(*culture, *ftl)
            }),
    };
    Ok(builder.build(catalog)?)
}

/// Builds the application endpoint.
///
/// Outside of the development environment, panics and server errors are
/// rendered with the generic error page.
pub fn build_app(config: &AppConfig) -> Result<BoxEndpoint<'static, Response>, AppError> {
    let options = &config.localization;
    let catalog = CultureCatalog::from_options(options)?;
    let resources = load_resources(config, &catalog)?;
    let views = Views::new(catalog.clone(), resources.clone())?;
    let persistence = CulturePersistence::new(catalog.clone(), options);

    let routes = Route::new()
        .at("/", get(home::index))
        .at("/Home", get(home::index))
        .at("/Home/Index", get(home::index))
        .at("/Home/Index/:id", get(home::index))
        .at("/Home/Privacy", get(home::privacy))
        .at("/Home/Privacy/:id", get(home::privacy))
        .at("/Home/Error", get(home::error))
        .at("/Home/Error/:id", get(home::error))
        .at("/Home/SetCulture", post(home::set_culture))
        .at("/Home/SetCulture/:id", post(home::set_culture))
        .at("/TestController1/GetValue", get(test_controller::get_value))
        .at("/TestController1/GetValue/:id", get(test_controller::get_value));

    let app = if config.environment.is_development() {
        routes.with(CatchPanic::new()).boxed()
    } else {
        routes
            .with(ErrorPage::new(views.clone(), catalog.clone()))
            .boxed()
    };

    Ok(app
        .with(RequestLocalization::new(catalog, options))
        .with(RequestId::default())
        .with(Tracing)
        .data(resources)
        .data(views)
        .data(persistence)
        .boxed())
}

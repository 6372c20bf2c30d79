//! Generic error page.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use poem::{
    http::{header, StatusCode},
    middleware::ReqId,
    Endpoint, IntoResponse, Middleware, Request, Response, Result,
};
use tera::Context;
use unic_langid::LanguageIdentifier;

use crate::{
    culture::{CultureCatalog, RequestCulture},
    views::Views,
};

const ERROR_VIEW: &str = "home/error";

/// Marks a response as never cacheable.
pub fn no_cache(resp: impl IntoResponse) -> Response {
    resp.with_header(header::CACHE_CONTROL, "no-store, no-cache, max-age=0")
        .with_header(header::PRAGMA, "no-cache")
        .into_response()
}

/// Renders the error view carrying `request_id`.
pub fn render_error_page(
    views: &Views,
    culture: &LanguageIdentifier,
    request_id: Option<String>,
) -> Result<Response> {
    let mut context = Context::new();
    context.insert("request_id", &request_id);
    views
        .render(ERROR_VIEW, culture, context)
        .map(no_cache)
}

/// Middleware that replaces panics and server errors with the error page.
///
/// Client errors such as `404 Not Found` pass through unchanged.
pub struct ErrorPage {
    views: Views,
    catalog: CultureCatalog,
}

impl ErrorPage {
    /// Create an `ErrorPage` middleware.
    pub fn new(views: Views, catalog: CultureCatalog) -> Self {
        Self { views, catalog }
    }
}

impl<E: Endpoint> Middleware<E> for ErrorPage {
    type Output = ErrorPageEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorPageEndpoint {
            inner: ep,
            views: self.views.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

/// Endpoint for the `ErrorPage` middleware.
pub struct ErrorPageEndpoint<E> {
    inner: E,
    views: Views,
    catalog: CultureCatalog,
}

impl<E: Endpoint> ErrorPageEndpoint<E> {
    fn error_response(&self, culture: &LanguageIdentifier, request_id: Option<String>) -> Response {
        match render_error_page(&self.views, culture, request_id) {
            Ok(resp) => resp.with_status(StatusCode::INTERNAL_SERVER_ERROR).into_response(),
            Err(_) => no_cache(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl<E: Endpoint> Endpoint for ErrorPageEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let culture = req
            .data::<RequestCulture>()
            .map(|culture| culture.culture().clone())
            .unwrap_or_else(|| self.catalog.default_culture().clone());
        let request_id = req.data::<ReqId>().map(ToString::to_string);
        let path = req.uri().path().to_string();

        match AssertUnwindSafe(self.inner.call(req)).catch_unwind().await {
            Ok(Ok(resp)) => Ok(resp.into_response()),
            Ok(Err(err)) if !err.status().is_server_error() => Err(err),
            Ok(Err(err)) => {
                tracing::error!(
                    path = %path,
                    request_id = ?request_id,
                    error = %err,
                    "unhandled error"
                );
                Ok(self.error_response(&culture, request_id))
            }
            Err(_) => {
                tracing::error!(path = %path, request_id = ?request_id, "panic while handling request");
                Ok(self.error_response(&culture, request_id))
            }
        }
    }
}

use std::fmt::{self, Display, Formatter};

use poem::{
    http::{header, HeaderValue, StatusCode},
    middleware::{CookieJarManager, CookieJarManagerEndpoint},
    Endpoint, Error, FromRequest, IntoResponse, Middleware, Request, RequestBody, Response,
    Result,
};
use unic_langid::LanguageIdentifier;

use crate::{
    config::LocalizationOptions,
    culture::{resolve, CultureCatalog},
};

/// The culture resolved for the current request.
///
/// Inserted by [`RequestLocalization`] and extracted by handlers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RequestCulture(LanguageIdentifier);

impl RequestCulture {
    /// Create a `RequestCulture`.
    pub fn new(culture: LanguageIdentifier) -> Self {
        Self(culture)
    }

    /// Returns the culture.
    #[inline]
    pub fn culture(&self) -> &LanguageIdentifier {
        &self.0
    }
}

impl Display for RequestCulture {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'a> FromRequest<'a> for RequestCulture {
    async fn from_request(req: &'a Request, _body: &mut RequestBody) -> Result<Self> {
        Ok(req
            .extensions()
            .get::<RequestCulture>()
            .ok_or_else(|| {
                tracing::error!(
                    "`RequestLocalization` middleware is not active, while trying to extract `RequestCulture`!"
                );
                Error::from_string("no associated culture", StatusCode::INTERNAL_SERVER_ERROR)
            })?
            .clone())
    }
}

/// Middleware that resolves the culture of every request.
///
/// The culture comes from the culture cookie, then the `Accept-Language`
/// header, then the catalog default. The result is stored as a
/// [`RequestCulture`] in the request data and, when enabled, echoed in the
/// `Content-Language` response header.
pub struct RequestLocalization {
    catalog: CultureCatalog,
    cookie_name: String,
    apply_to_response_headers: bool,
}

impl RequestLocalization {
    /// Create a `RequestLocalization` middleware.
    pub fn new(catalog: CultureCatalog, options: &LocalizationOptions) -> Self {
        Self {
            catalog,
            cookie_name: options.cookie_name.clone(),
            apply_to_response_headers: options.apply_current_culture_to_response_headers,
        }
    }
}

impl<E: Endpoint> Middleware<E> for RequestLocalization {
    type Output = CookieJarManagerEndpoint<RequestLocalizationEndpoint<E>>;

    fn transform(&self, ep: E) -> Self::Output {
        CookieJarManager::new().transform(RequestLocalizationEndpoint {
            inner: ep,
            catalog: self.catalog.clone(),
            cookie_name: self.cookie_name.clone(),
            apply_to_response_headers: self.apply_to_response_headers,
        })
    }
}

/// Endpoint for the `RequestLocalization` middleware.
pub struct RequestLocalizationEndpoint<E> {
    inner: E,
    catalog: CultureCatalog,
    cookie_name: String,
    apply_to_response_headers: bool,
}

impl<E: Endpoint> Endpoint for RequestLocalizationEndpoint<E> {
    type Output = Response;

    async fn call(&self, mut req: Request) -> Result<Self::Output> {
        let cookie = req
            .cookie()
            .get(&self.cookie_name)
            .map(|cookie| cookie.value_str().to_string());
        let accept_language = req.header(header::ACCEPT_LANGUAGE);
        let culture = resolve(&self.catalog, cookie.as_deref(), accept_language);

        tracing::debug!(
            cookie = ?cookie,
            accept_language = ?accept_language,
            culture = %culture,
            "resolved request culture"
        );

        let content_language = HeaderValue::from_str(&culture.to_string()).ok();
        req.set_data(RequestCulture::new(culture));

        let mut resp = match self.inner.call(req).await {
            Ok(resp) => resp.into_response(),
            Err(err) => err.into_response(),
        };

        if self.apply_to_response_headers {
            if let Some(value) = content_language {
                resp.headers_mut().insert(header::CONTENT_LANGUAGE, value);
            }
        }

        Ok(resp)
    }
}

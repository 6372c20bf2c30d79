//! Culture selection.
//!
//! A request's culture is taken from the culture cookie when it names a
//! supported culture, then from the `Accept-Language` header, and finally
//! falls back to the catalog default.
//!
//! ```
//! use demo_localization::{
//!     config::LocalizationOptions,
//!     culture::{CultureCatalog, RequestCulture, RequestLocalization},
//! };
//! use poem::{get, handler, EndpointExt, Route};
//!
//! #[handler]
//! fn index(culture: RequestCulture) -> String {
//!     culture.to_string()
//! }
//!
//! let options = LocalizationOptions::default();
//! let catalog = CultureCatalog::from_options(&options).unwrap();
//! let app = Route::new()
//!     .at("/", get(index))
//!     .with(RequestLocalization::new(catalog, &options));
//! ```

mod catalog;
mod cookie;
mod middleware;
mod persistence;
mod resolver;

pub use unic_langid::LanguageIdentifier;

pub use self::{
    catalog::CultureCatalog,
    cookie::{CultureCookie, DEFAULT_COOKIE_NAME},
    middleware::{RequestCulture, RequestLocalization, RequestLocalizationEndpoint},
    persistence::CulturePersistence,
    resolver::{parse_accept_languages, resolve},
};

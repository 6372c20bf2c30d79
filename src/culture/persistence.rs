use poem::web::{cookie::CookieJar, Redirect};

use crate::{
    config::LocalizationOptions,
    culture::{CultureCatalog, CultureCookie},
    local_url::local_path,
};

/// Stores a selected culture in the culture cookie.
#[derive(Clone)]
pub struct CulturePersistence {
    catalog: CultureCatalog,
    cookie_name: String,
    home: String,
}

impl CulturePersistence {
    /// Create a `CulturePersistence`.
    pub fn new(catalog: CultureCatalog, options: &LocalizationOptions) -> Self {
        Self {
            catalog,
            cookie_name: options.cookie_name.clone(),
            home: "/".to_string(),
        }
    }

    /// Writes the culture cookie and returns where to send the client.
    ///
    /// Only supported cultures are written, using the catalog's spelling of
    /// the tag. The redirect goes to `return_url` when it is local and to the
    /// home page otherwise.
    pub fn set_culture(
        &self,
        cookie_jar: &CookieJar,
        culture: Option<&str>,
        return_url: Option<&str>,
    ) -> Redirect {
        if let Some(requested) = culture.filter(|culture| !culture.is_empty()) {
            match self.catalog.find(requested) {
                Some(culture) => {
                    tracing::debug!(culture = %culture, "persist culture");
                    cookie_jar.add(CultureCookie::new(culture).to_cookie(&self.cookie_name));
                }
                None => {
                    tracing::debug!(culture = requested, "ignore unsupported culture");
                }
            }
        }

        match return_url.filter(|url| !url.is_empty()) {
            Some(url) => match local_path(url) {
                Some(path) => Redirect::see_other(path),
                None => {
                    tracing::warn!(return_url = url, "rejected non-local return url");
                    Redirect::see_other(&self.home)
                }
            },
            None => Redirect::see_other(&self.home),
        }
    }
}

//! Localized string resources.
//!
//! Resources are Fluent (FTL) messages grouped by culture. A lookup that
//! misses in the requested culture falls back to the default culture and then
//! to the key itself, so it never fails.
//!
//! ```
//! use demo_localization::{culture::CultureCatalog, resources::Resources};
//! use unic_langid::langid;
//!
//! let catalog = CultureCatalog::new(["en-US", "es-ES"], "en-US").unwrap();
//! let resources = Resources::builder()
//!     .add_ftl("en-US", "hello-world = Hello world!\nonly-english = English")
//!     .add_ftl("es-ES", "hello-world = ¡Hola mundo!")
//!     .build(&catalog)
//!     .unwrap();
//!
//! assert_eq!(resources.get_string("hello-world", &langid!("es-ES")), "¡Hola mundo!");
//! assert_eq!(resources.get_string("only-english", &langid!("es-ES")), "English");
//! assert_eq!(resources.get_string("missing", &langid!("es-ES")), "missing");
//! ```

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use fluent::FluentResource;
use fluent_syntax::ast::Entry;
use intl_memoizer::concurrent::IntlLangMemoizer;
use poem::{http::StatusCode, Error, FromRequest, Request, RequestBody, Result};
use unic_langid::LanguageIdentifier;

use crate::{
    culture::{CultureCatalog, RequestCulture},
    error::ResourcesError,
};

type FluentBundle = fluent::bundle::FluentBundle<FluentResource, IntlLangMemoizer>;

struct InnerResources {
    bundles: HashMap<LanguageIdentifier, FluentBundle>,
    keys: BTreeSet<String>,
    default_culture: LanguageIdentifier,
}

/// Resources builder.
#[derive(Default)]
pub struct ResourcesBuilder {
    paths: Vec<PathBuf>,
    resources: Vec<(String, String)>,
}

impl ResourcesBuilder {
    /// Add resources directory.
    ///
    /// The directory contains one sub-directory per culture, each holding any
    /// number of FTL files.
    ///
    /// ```text
    /// /resources
    ///     /en-US
    ///         shared.ftl
    ///     /es-ES
    ///         shared.ftl
    /// ```
    #[must_use]
    pub fn add_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Add FTL (Fluent Translation List) source for the specified culture.
    #[must_use]
    pub fn add_ftl(mut self, culture: impl Into<String>, ftl: impl Into<String>) -> Self {
        self.resources.push((culture.into(), ftl.into()));
        self
    }

    /// Consumes this builder and returns a [`Resources`] object.
    ///
    /// Missing translations are reported with `tracing::warn!` but do not
    /// fail the build.
    pub fn build(self, catalog: &CultureCatalog) -> Result<Resources, ResourcesError> {
        let mut loader = Loader::default();

        for path in self.paths {
            loader.load_path(path)?;
        }

        for (culture, ftl) in self.resources {
            let culture = LanguageIdentifier::from_str(&culture)
                .map_err(|_| ResourcesError::InvalidCulture(culture.clone()))?;
            loader.add(culture, ftl)?;
        }

        for culture in loader.bundles.keys() {
            if catalog.get(culture).is_none() {
                tracing::warn!(culture = %culture, "resources loaded for an unsupported culture");
            }
        }

        let resources = Resources {
            inner: Arc::new(InnerResources {
                bundles: loader.bundles,
                keys: loader.keys,
                default_culture: catalog.default_culture().clone(),
            }),
        };
        resources.report_missing(catalog);

        Ok(resources)
    }
}

#[derive(Default)]
struct Loader {
    bundles: HashMap<LanguageIdentifier, FluentBundle>,
    keys: BTreeSet<String>,
}

impl Loader {
    fn add(&mut self, culture: LanguageIdentifier, ftl: String) -> Result<(), ResourcesError> {
        let resource = FluentResource::try_new(ftl).map_err(|(_, errors)| ResourcesError::Parse {
            culture: culture.to_string(),
            message: join_errors(&errors),
        })?;

        for entry in resource.entries() {
            if let Entry::Message(message) = entry {
                self.keys.insert(message.id.name.to_string());
            }
        }

        self.bundles
            .entry(culture.clone())
            .or_insert_with(|| {
                let mut bundle = FluentBundle::new_concurrent(vec![culture.clone()]);
                bundle.set_use_isolating(false);
                bundle
            })
            .add_resource(resource)
            .map_err(|errors| ResourcesError::Duplicate {
                culture: culture.to_string(),
                message: join_errors(&errors),
            })
    }

    fn load_path(&mut self, path: impl AsRef<Path>) -> Result<(), ResourcesError> {
        let path = path.as_ref();

        for res in std::fs::read_dir(path)? {
            let culture_dir = res?;

            let culture = match culture_dir
                .path()
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| LanguageIdentifier::from_str(name).ok())
            {
                Some(culture) => culture,
                None => continue,
            };

            for res in std::fs::read_dir(culture_dir.path())? {
                let resource_path = res?.path();
                if resource_path.extension().and_then(|ext| ext.to_str()) != Some("ftl") {
                    continue;
                }

                tracing::debug!(path = ?resource_path, "load fluent resource");
                self.add(culture.clone(), std::fs::read_to_string(&resource_path)?)?;
            }
        }

        Ok(())
    }
}

fn join_errors(errors: &[impl ToString]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Localized strings for every supported culture.
///
/// Cheap to clone and safe to share between requests.
#[derive(Clone)]
pub struct Resources {
    inner: Arc<InnerResources>,
}

impl Resources {
    /// Create a resources builder.
    pub fn builder() -> ResourcesBuilder {
        ResourcesBuilder::default()
    }

    /// Returns the localized string for `key`.
    ///
    /// Falls back to the default culture, then to `key` itself.
    pub fn get_string(&self, key: &str, culture: &LanguageIdentifier) -> String {
        self.format(key, culture)
            .or_else(|| {
                tracing::debug!(key, culture = %culture, "falling back to the default culture");
                self.format(key, &self.inner.default_culture)
            })
            .unwrap_or_else(|| key.to_string())
    }

    /// Returns every known key with its localized string for `culture`.
    pub fn text_for(&self, culture: &LanguageIdentifier) -> BTreeMap<String, String> {
        self.inner
            .keys
            .iter()
            .map(|key| (key.clone(), self.get_string(key, culture)))
            .collect()
    }

    /// Returns every known key.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys.iter().map(String::as_str)
    }

    fn format(&self, key: &str, culture: &LanguageIdentifier) -> Option<String> {
        let bundle = self.inner.bundles.get(culture)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = Vec::new();
        let value = bundle.format_pattern(pattern, None, &mut errors);
        if !errors.is_empty() {
            tracing::warn!(
                key,
                culture = %culture,
                errors = %join_errors(&errors),
                "failed to format resource"
            );
            return None;
        }
        Some(value.into_owned())
    }

    fn report_missing(&self, catalog: &CultureCatalog) {
        let default_culture = &self.inner.default_culture;
        let Some(default_bundle) = self.inner.bundles.get(default_culture) else {
            tracing::warn!(culture = %default_culture, "no resources for the default culture");
            return;
        };

        for culture in catalog.cultures().iter().filter(|c| *c != default_culture) {
            let bundle = self.inner.bundles.get(culture);
            for key in self.keys().filter(|key| default_bundle.has_message(key)) {
                if !bundle.is_some_and(|bundle| bundle.has_message(key)) {
                    tracing::warn!(key, culture = %culture, "missing translation");
                }
            }
        }
    }
}

/// An extractor that looks up strings in the request's culture.
///
/// Requires the [`Resources`] data and the
/// [`RequestLocalization`](crate::culture::RequestLocalization) middleware.
pub struct Localizer {
    resources: Resources,
    culture: RequestCulture,
}

impl Localizer {
    /// Create a `Localizer` for the given culture.
    pub fn new(resources: Resources, culture: RequestCulture) -> Self {
        Self { resources, culture }
    }

    /// Returns the localized string for `key`.
    ///
    /// See also: [`Resources::get_string`]
    pub fn get_string(&self, key: &str) -> String {
        self.resources.get_string(key, self.culture.culture())
    }

    /// Returns every localized string of the request's culture.
    pub fn all_strings(&self) -> BTreeMap<String, String> {
        self.resources.text_for(self.culture.culture())
    }

    /// Returns the request's culture.
    pub fn culture(&self) -> &RequestCulture {
        &self.culture
    }
}

impl<'a> FromRequest<'a> for Localizer {
    async fn from_request(req: &'a Request, body: &mut RequestBody) -> Result<Self> {
        let resources = req
            .extensions()
            .get::<Resources>()
            .ok_or_else(|| {
                tracing::error!("`Resources` data is missing, while trying to extract `Localizer`!");
                Error::from_string("no associated resources", StatusCode::INTERNAL_SERVER_ERROR)
            })?
            .clone();
        let culture = RequestCulture::from_request(req, body).await?;
        Ok(Self::new(resources, culture))
    }
}

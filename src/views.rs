//! Server rendered views.
//!
//! Views are [Tera](https://keats.github.io/tera/) templates compiled into the
//! binary. A view may have culture-specific variants named
//! `<view>.<culture>.html` or `<view>.<language>.html`, which take precedence
//! over the neutral `<view>.html`.

use std::{collections::HashSet, sync::Arc};

use poem::{error::InternalServerError, web::Html, Result};
use tera::{Context, Tera};
use unic_langid::LanguageIdentifier;

use crate::{culture::CultureCatalog, resources::Resources};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("home/index.html", include_str!("../templates/home/index.html")),
    ("home/index.es-ES.html", include_str!("../templates/home/index.es-ES.html")),
    ("home/privacy.html", include_str!("../templates/home/privacy.html")),
    ("home/error.html", include_str!("../templates/home/error.html")),
];

struct InnerViews {
    tera: Tera,
    names: HashSet<String>,
    catalog: CultureCatalog,
    resources: Resources,
}

/// The view renderer.
#[derive(Clone)]
pub struct Views {
    inner: Arc<InnerViews>,
}

impl Views {
    /// Create the renderer with the built-in templates.
    pub fn new(catalog: CultureCatalog, resources: Resources) -> tera::Result<Self> {
        Self::with_templates(catalog, resources, TEMPLATES.iter().copied())
    }

    /// Create the renderer from `(name, source)` template pairs.
    pub fn with_templates<I, N, C>(
        catalog: CultureCatalog,
        resources: Resources,
        templates: I,
    ) -> tera::Result<Self>
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        let names = tera.get_template_names().map(ToString::to_string).collect();

        Ok(Self {
            inner: Arc::new(InnerViews {
                tera,
                names,
                catalog,
                resources,
            }),
        })
    }

    /// Returns the template that renders `view` for `culture`.
    pub fn template_name(&self, view: &str, culture: &LanguageIdentifier) -> Option<String> {
        [
            format!("{view}.{culture}.html"),
            format!("{view}.{}.html", culture.language),
            format!("{view}.html"),
        ]
        .into_iter()
        .find(|name| self.inner.names.contains(name))
    }

    /// Renders `view` in `culture`.
    ///
    /// Besides `context`, every view receives `culture`, the supported
    /// `cultures` and the localized `text` of the culture.
    pub fn render(
        &self,
        view: &str,
        culture: &LanguageIdentifier,
        context: Context,
    ) -> Result<Html<String>> {
        let name = self.template_name(view, culture).ok_or_else(|| {
            tracing::error!(view, culture = %culture, "view not found");
            InternalServerError(tera::Error::template_not_found(view))
        })?;

        let cultures = self
            .inner
            .catalog
            .cultures()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        let mut ctx = Context::new();
        ctx.insert("culture", &culture.to_string());
        ctx.insert("cultures", &cultures);
        ctx.insert("text", &self.inner.resources.text_for(culture));
        ctx.extend(context);

        tracing::debug!(template = %name, "render view");

        self.inner
            .tera
            .render(&name, &ctx)
            .map(Html)
            .map_err(|err| {
                tracing::error!(template = %name, error = ?err, "failed to render view");
                InternalServerError(err)
            })
    }
}

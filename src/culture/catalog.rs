use std::{str::FromStr, sync::Arc};

use unic_langid::LanguageIdentifier;

use crate::{config::LocalizationOptions, error::CatalogError};

struct InnerCatalog {
    cultures: Vec<LanguageIdentifier>,
    default_culture: LanguageIdentifier,
}

/// The fixed, ordered list of supported cultures and the default one.
///
/// Built once at startup and shared read-only between requests.
///
/// # Example
///
/// ```
/// use demo_localization::culture::CultureCatalog;
///
/// let catalog = CultureCatalog::new(["en-US", "es-ES"], "en-US").unwrap();
/// assert!(catalog.is_supported("ES-es"));
/// assert!(!catalog.is_supported("fr-FR"));
/// assert_eq!(catalog.default_culture().to_string(), "en-US");
/// ```
#[derive(Clone)]
pub struct CultureCatalog {
    inner: Arc<InnerCatalog>,
}

impl CultureCatalog {
    /// Create a catalog from culture tags and the default culture tag.
    pub fn new<I, S>(cultures: I, default_culture: &str) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed: Vec<LanguageIdentifier> = Vec::new();

        for tag in cultures {
            let tag = tag.as_ref();
            let culture = LanguageIdentifier::from_str(tag).map_err(|_| {
                CatalogError::InvalidTag {
                    tag: tag.to_string(),
                }
            })?;
            if !parsed.contains(&culture) {
                parsed.push(culture);
            }
        }

        if parsed.is_empty() {
            return Err(CatalogError::Empty);
        }

        let default = LanguageIdentifier::from_str(default_culture)
            .ok()
            .filter(|culture| parsed.contains(culture))
            .ok_or_else(|| CatalogError::DefaultNotSupported(default_culture.to_string()))?;

        Ok(Self {
            inner: Arc::new(InnerCatalog {
                cultures: parsed,
                default_culture: default,
            }),
        })
    }

    /// Create a catalog from the localization options.
    pub fn from_options(options: &LocalizationOptions) -> Result<Self, CatalogError> {
        Self::new(&options.supported_cultures, &options.default_culture)
    }

    /// Returns the supported cultures in declaration order.
    #[inline]
    pub fn cultures(&self) -> &[LanguageIdentifier] {
        &self.inner.cultures
    }

    /// Returns the default culture.
    #[inline]
    pub fn default_culture(&self) -> &LanguageIdentifier {
        &self.inner.default_culture
    }

    /// Returns the catalog entry equal to `culture`, if any.
    pub fn get(&self, culture: &LanguageIdentifier) -> Option<&LanguageIdentifier> {
        self.inner.cultures.iter().find(|item| *item == culture)
    }

    /// Parses `tag` and returns the matching catalog entry.
    ///
    /// Tags are compared after canonicalization, so the comparison is
    /// case-insensitive. Unparseable tags never match.
    pub fn find(&self, tag: &str) -> Option<&LanguageIdentifier> {
        let culture = LanguageIdentifier::from_str(tag.trim()).ok()?;
        self.get(&culture)
    }

    /// Returns `true` if `tag` names a supported culture.
    #[inline]
    pub fn is_supported(&self, tag: &str) -> bool {
        self.find(tag).is_some()
    }
}

#[cfg(test)]
mod tests {
    use unic_langid::{langid, langids};

    use super::*;

    #[test]
    fn keeps_declaration_order() {
        let catalog = CultureCatalog::new(["es-ES", "en-US", "es-es"], "en-US").unwrap();
        assert_eq!(catalog.cultures(), &langids!("es-ES", "en-US")[..]);
        assert_eq!(catalog.default_culture(), &langid!("en-US"));
    }

    #[test]
    fn find_is_case_insensitive() {
        let catalog = CultureCatalog::new(["en-US", "es-ES"], "en-US").unwrap();
        assert_eq!(catalog.find("es-es"), Some(&langid!("es-ES")));
        assert_eq!(catalog.find(" EN-us "), Some(&langid!("en-US")));
        assert_eq!(catalog.find("es"), None);
        assert_eq!(catalog.find("not a tag!"), None);
        assert_eq!(catalog.find(""), None);
    }

    #[test]
    fn invalid_catalogs() {
        assert!(matches!(
            CultureCatalog::new(Vec::<String>::new(), "en-US"),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            CultureCatalog::new(["en-US", "%%"], "en-US"),
            Err(CatalogError::InvalidTag { tag }) if tag == "%%"
        ));
        assert!(matches!(
            CultureCatalog::new(["en-US"], "fr-FR"),
            Err(CatalogError::DefaultNotSupported(tag)) if tag == "fr-FR"
        ));
    }
}

use std::str::FromStr;

use smallvec::SmallVec;
use unic_langid::LanguageIdentifier;

use crate::culture::{CultureCatalog, CultureCookie};

type LanguageArray = SmallVec<[LanguageIdentifier; 8]>;

/// Determines the active culture of a request.
///
/// The cookie wins if it names a supported culture, then the highest weighted
/// supported `Accept-Language` entry, then the default culture. Malformed
/// input is treated as a non-match.
///
/// # Example
///
/// ```
/// use demo_localization::culture::{resolve, CultureCatalog};
///
/// let catalog = CultureCatalog::new(["en-US", "es-ES"], "en-US").unwrap();
///
/// assert_eq!(resolve(&catalog, None, None).to_string(), "en-US");
/// assert_eq!(
///     resolve(&catalog, None, Some("es-ES,en;q=0.5")).to_string(),
///     "es-ES"
/// );
/// assert_eq!(
///     resolve(&catalog, Some("c=en-US|uic=en-US"), Some("es-ES")).to_string(),
///     "en-US"
/// );
/// ```
pub fn resolve(
    catalog: &CultureCatalog,
    cookie_value: Option<&str>,
    accept_language: Option<&str>,
) -> LanguageIdentifier {
    if let Some(culture) = cookie_value
        .and_then(CultureCookie::parse_value)
        .and_then(|cookie| catalog.find(cookie.culture()))
    {
        return culture.clone();
    }

    accept_language
        .map(parse_accept_languages)
        .unwrap_or_default()
        .iter()
        .find_map(|language| catalog.get(language))
        .unwrap_or_else(|| catalog.default_culture())
        .clone()
}

/// Parses an `Accept-Language` header value into languages ordered by
/// descending quality.
///
/// Entries with equal quality keep their header order. Entries with a zero
/// quality and unparseable tags are dropped.
pub fn parse_accept_languages(value: &str) -> LanguageArray {
    let mut languages = SmallVec::<[_; 8]>::new();

    for s in value.split(',').map(str::trim) {
        if let Some(res) = parse_language(s) {
            languages.push(res);
        }
    }

    languages.sort_by(|(_, a), (_, b)| b.cmp(a));
    languages
        .into_iter()
        .map(|(language, _)| language)
        .collect()
}

fn parse_language(value: &str) -> Option<(LanguageIdentifier, u16)> {
    let mut parts = value.split(';');
    let name = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }
    let quality = match parts.next() {
        Some(quality) => parse_quality(quality).unwrap_or_default(),
        None => 1000,
    };
    if quality == 0 {
        return None;
    }
    let language = LanguageIdentifier::from_str(name).ok()?;
    Some((language, quality))
}

fn parse_quality(value: &str) -> Option<u16> {
    let mut parts = value.split('=');
    let name = parts.next()?.trim();
    if name != "q" {
        return None;
    }
    let q = parts.next()?.trim().parse::<f32>().ok()?;
    if !q.is_finite() {
        return None;
    }
    Some((q.clamp(0.0, 1.0) * 1000.0) as u16)
}

#[cfg(test)]
mod tests {
    use unic_langid::{langid, langids};

    use super::*;

    fn catalog() -> CultureCatalog {
        CultureCatalog::new(["en-US", "es-ES"], "en-US").unwrap()
    }

    #[test]
    fn test_parse_accept_languages() {
        assert_eq!(
            parse_accept_languages("zh-CN;q=0.5,en-US;q=0.7,fr;q=0.3").into_vec(),
            langids!("en-US", "zh-CN", "fr")
        );

        assert_eq!(
            parse_accept_languages("zh-CN ; q=0.5,en-US;q = 0.7,   fr;q=0.3").into_vec(),
            langids!("en-US", "zh-CN", "fr")
        );

        assert_eq!(
            parse_accept_languages("en-US;q=0.7,zh-CN,fr;q=0.3").into_vec(),
            langids!("zh-CN", "en-US", "fr")
        );
    }

    #[test]
    fn parse_accept_languages_ties_and_garbage() {
        assert_eq!(
            parse_accept_languages("fr;q=0.8,es-ES;q=0.8,de").into_vec(),
            langids!("de", "fr", "es-ES")
        );
        assert_eq!(
            parse_accept_languages("en-US;q=0,es-ES;q=abc,,@@,fr;q=0.1").into_vec(),
            langids!("fr")
        );
        assert!(parse_accept_languages("").is_empty());
    }

    #[test]
    fn supported_cookie_wins() {
        let catalog = catalog();
        for culture in catalog.cultures() {
            let value = CultureCookie::new(culture).make_value();
            for header in [None, Some("es-ES"), Some("en-US"), Some("@@@")] {
                assert_eq!(&resolve(&catalog, Some(value.as_str()), header), culture);
            }
        }
    }

    #[test]
    fn unsupported_cookie_is_ignored() {
        let catalog = catalog();
        for cookie in ["c=fr-FR|uic=fr-FR", "garbage", "", "c=|uic="] {
            for header in [None, Some("es-ES"), Some("fr;q=0.9, en-US;q=0.8"), Some(";;")] {
                assert_eq!(
                    resolve(&catalog, Some(cookie), header),
                    resolve(&catalog, None, header)
                );
            }
        }
    }

    #[test]
    fn header_negotiation() {
        let catalog = catalog();
        assert_eq!(resolve(&catalog, None, None), langid!("en-US"));
        assert_eq!(
            resolve(&catalog, None, Some("es-ES,en;q=0.5")),
            langid!("es-ES")
        );
        assert_eq!(
            resolve(&catalog, None, Some("fr-FR, en-US;q=0.4, es-es;q=0.6")),
            langid!("es-ES")
        );
        assert_eq!(resolve(&catalog, None, Some("fr-FR, de")), langid!("en-US"));
        assert_eq!(resolve(&catalog, None, Some("es")), langid!("en-US"));
        assert_eq!(resolve(&catalog, None, Some("es-ES;q=0")), langid!("en-US"));
    }
}

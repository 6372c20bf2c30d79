use chrono::{Months, Utc};
use poem::web::cookie::Cookie;
use unic_langid::LanguageIdentifier;

/// Default name of the cookie holding the selected culture.
pub const DEFAULT_COOKIE_NAME: &str = ".Poem.Culture";

const CULTURE_PREFIX: &str = "c=";
const UI_CULTURE_PREFIX: &str = "uic=";
const SEPARATOR: char = '|';

/// The culture selection stored on the client.
///
/// Serialized as `c=<culture>|uic=<ui culture>`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CultureCookie {
    culture: String,
    ui_culture: String,
}

impl CultureCookie {
    /// Create a cookie value where the culture and the UI culture are the
    /// same.
    pub fn new(culture: &LanguageIdentifier) -> Self {
        Self {
            culture: culture.to_string(),
            ui_culture: culture.to_string(),
        }
    }

    /// Returns the formatting culture tag.
    #[inline]
    pub fn culture(&self) -> &str {
        &self.culture
    }

    /// Returns the UI culture tag.
    #[inline]
    pub fn ui_culture(&self) -> &str {
        &self.ui_culture
    }

    /// Returns the serialized cookie value.
    pub fn make_value(&self) -> String {
        format!(
            "{CULTURE_PREFIX}{}{SEPARATOR}{UI_CULTURE_PREFIX}{}",
            self.culture, self.ui_culture
        )
    }

    /// Parses a cookie value.
    ///
    /// Returns `None` for anything that is not one `c=` part and/or one `uic=`
    /// part. A single part is used for both cultures.
    pub fn parse_value(value: &str) -> Option<Self> {
        let mut culture = None;
        let mut ui_culture = None;

        for part in value.split(SEPARATOR).filter(|part| !part.is_empty()) {
            if let Some(tag) = part.strip_prefix(UI_CULTURE_PREFIX) {
                if ui_culture.replace(tag).is_some() {
                    return None;
                }
            } else if let Some(tag) = part.strip_prefix(CULTURE_PREFIX) {
                if culture.replace(tag).is_some() {
                    return None;
                }
            } else {
                return None;
            }
        }

        let (culture, ui_culture) = match (culture, ui_culture) {
            (Some(c), Some(uic)) => (c, uic),
            (Some(c), None) => (c, c),
            (None, Some(uic)) => (uic, uic),
            (None, None) => return None,
        };
        if culture.is_empty() && ui_culture.is_empty() {
            return None;
        }

        Some(Self {
            culture: culture.to_string(),
            ui_culture: ui_culture.to_string(),
        })
    }

    /// Builds the `Set-Cookie` entry, expiring one year from now.
    pub fn to_cookie(&self, name: &str) -> Cookie {
        let mut cookie = Cookie::new_with_str(name, self.make_value());
        cookie.set_path("/");
        if let Some(expires) = Utc::now().checked_add_months(Months::new(12)) {
            cookie.set_expires(expires);
        }
        cookie
    }
}

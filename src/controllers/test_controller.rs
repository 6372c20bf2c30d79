//! Diagnostic endpoints.

use poem::handler;

use crate::resources::Localizer;

const WELCOME_MESSAGE: &str = "WelcomeMessage";

/// Resolves `WelcomeMessage` in the request's culture.
#[handler]
pub fn get_value(localizer: Localizer) -> String {
    let value = localizer.get_string(WELCOME_MESSAGE);
    tracing::debug!(culture = %localizer.culture(), value = %value, "resolved welcome message");
    value
}

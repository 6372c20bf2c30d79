//! Home pages and the culture picker endpoint.

use poem::{
    handler,
    http::Uri,
    middleware::ReqId,
    web::{cookie::CookieJar, Data, Form, Html, Query, Redirect},
    Request, Response, Result,
};
use serde::Deserialize;
use tera::Context;

use crate::{
    culture::{CulturePersistence, RequestCulture},
    error_page::render_error_page,
    views::Views,
};

fn page_context(uri: &Uri) -> Context {
    let mut context = Context::new();
    let return_url = uri.path_and_query().map_or("/", |pq| pq.as_str());
    context.insert("return_url", return_url);
    context
}

/// Home page.
#[handler]
pub fn index(views: Data<&Views>, culture: RequestCulture, uri: &Uri) -> Result<Html<String>> {
    views.render("home/index", culture.culture(), page_context(uri))
}

/// Privacy page.
#[handler]
pub fn privacy(views: Data<&Views>, culture: RequestCulture, uri: &Uri) -> Result<Html<String>> {
    views.render("home/privacy", culture.culture(), page_context(uri))
}

/// Error page carrying the request id. Never cached.
#[handler]
pub fn error(views: Data<&Views>, culture: RequestCulture, req: &Request) -> Result<Response> {
    let request_id = req.data::<ReqId>().map(ToString::to_string);
    render_error_page(&views, culture.culture(), request_id)
}

/// Form posted by the culture picker.
#[derive(Debug, Default, Deserialize)]
pub struct SetCultureForm {
    culture: Option<String>,
    #[serde(rename = "returnUrl")]
    return_url: Option<String>,
}

/// Stores the selected culture and redirects back.
///
/// Fields are read from the form body, or from the query string when the
/// request carries no form. Missing fields are treated as absent.
#[handler]
pub fn set_culture(
    form: Option<Form<SetCultureForm>>,
    query: Option<Query<SetCultureForm>>,
    persistence: Data<&CulturePersistence>,
    cookie_jar: &CookieJar,
) -> Redirect {
    let form = match (form, query) {
        (Some(Form(form)), _) => form,
        (None, Some(Query(query))) => query,
        (None, None) => SetCultureForm::default(),
    };
    persistence.set_culture(
        cookie_jar,
        form.culture.as_deref(),
        form.return_url.as_deref(),
    )
}

use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use http::header::{HeaderValue, CONTENT_TYPE, SET_COOKIE};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header(CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}

/// htmx leaves the target untouched on 204.
pub fn no_content() -> ResultResp {
    ResponseBuilder::new()
        .status(204)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

pub fn with_cookie(mut resp: Response, cookie: &str) -> ResultResp {
    let value = HeaderValue::from_str(cookie).map_err(|_| ServerError::InternalError)?;
    resp.headers_mut().append(SET_COOKIE, value);
    Ok(resp)
}

pub mod errors;
pub mod html;
pub mod xlsx;

pub use errors::{html_error_response, ResultResp};

// Normal HTML response
pub use html::{html_response, no_content, with_cookie};
pub use xlsx::xlsx_response;

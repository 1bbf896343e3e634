pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{card, error_page, load_error, pagination};
pub use layouts::desktop::{desktop_layout, NavItem};

/// `base?op=<op>&value=<value>` for htmx controls.
pub fn op_url(base: &str, op: &str, value: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("op", op)
        .append_pair("value", value)
        .finish();
    format!("{base}?{query}")
}

/// Static `hx-vals` payload naming the mutation.
pub fn op_vals(op: &str) -> String {
    serde_json::json!({ "op": op }).to_string()
}

use crate::templates::op_url;
use maud::{html, Markup};

/// Pages shown on each side of the current one.
const SPAN: u32 = 2;

/// Page numbers shown around the current page, with gaps as `None`.
/// First and last page are always present.
pub fn page_window(current: u32, pages: u32) -> Vec<Option<u32>> {
    if pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, pages);
    let lo = current.saturating_sub(SPAN).max(1);
    let hi = current.saturating_add(SPAN).min(pages);

    let mut out = Vec::with_capacity((hi - lo) as usize + 5);
    if lo > 1 {
        out.push(Some(1));
        if lo > 2 {
            out.push(None);
        }
    }
    out.extend((lo..=hi).map(Some));
    if hi < pages {
        if hi < pages - 1 {
            out.push(None);
        }
        out.push(Some(pages));
    }
    out
}

/// Renders nothing when there are no pages, so a failed or empty listing
/// never offers page links.
pub fn pagination(base: &str, target: &str, sync: &str, current: u32, pages: u32) -> Markup {
    let window = page_window(current, pages);
    let current = current.clamp(1, pages.max(1));
    html! {
        @if !window.is_empty() {
            nav class="pagination" aria-label="Страницы" {
                @for slot in &window {
                    @match slot {
                        Some(p) if *p == current => {
                            span class="page current" aria-current="page" { (p) }
                        }
                        Some(p) => {
                            button
                                type="button"
                                class="page"
                                hx-get=(op_url(base, "page", &p.to_string()))
                                hx-target=(target)
                                hx-swap="outerHTML"
                                hx-sync=(sync)
                            { (p) }
                        }
                        None => span class="gap" { "…" },
                    }
                }
            }
        }
    }
}

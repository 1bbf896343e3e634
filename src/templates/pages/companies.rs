use crate::listing::format::{format_count, format_phone, or_placeholder};
use crate::listing::{CompanyFilters, Snapshot, ViewStatus};
use crate::templates::{desktop_layout, load_error, op_vals, pagination, NavItem};
use maud::{html, Markup};

pub const TABLE_URL: &str = "/companies/table";
const TARGET: &str = "#companies-table";
const SYNC: &str = "#companies-listing:replace";

pub fn companies_page(snapshot: &Snapshot<CompanyFilters>) -> Markup {
    desktop_layout(
        "Управляющие компании",
        NavItem::Companies,
        html! {
            main class="container" {
                h1 { "Управляющие компании" }
                div id="companies-listing" {
                    form class="filters" onsubmit="return false" {
                        label {
                            "Поиск по названию, ОГРН или телефону"
                            input
                                type="search"
                                name="value"
                                value=(snapshot.query.search_text())
                                hx-get=(TABLE_URL)
                                hx-vals=(op_vals("search"))
                                hx-trigger="input changed delay:300ms, search"
                                hx-target=(TARGET)
                                hx-swap="outerHTML"
                                hx-sync=(SYNC);
                        }
                    }
                    (companies_table(snapshot))
                }
            }
        },
    )
}

pub fn companies_table(snapshot: &Snapshot<CompanyFilters>) -> Markup {
    if snapshot.stale {
        return html! {
            div id="companies-table" hx-get=(TABLE_URL) hx-trigger="load" hx-swap="outerHTML" hx-sync=(SYNC) {
                p class="loading" { "Загрузка…" }
            }
        };
    }

    let view = &snapshot.view;

    html! {
        div id="companies-table" {
            @match view.status {
                ViewStatus::Failed => (load_error()),
                ViewStatus::Pending => p class="loading" { "Загрузка…" },
                ViewStatus::Ready => {}
            }

            table class="listing" {
                thead {
                    tr {
                        th { "Название" }
                        th { "ОГРН" }
                        th { "Телефон" }
                        th { "Email" }
                        th { "Директор" }
                        th { "Зданий" }
                    }
                }
                tbody {
                    @for c in &view.rows {
                        tr {
                            td { a href=(format!("/companies/{}", c.id)) { (c.name) } }
                            td { (or_placeholder(c.ogrn.as_deref())) }
                            td class="phone" { (format_phone(c.phone.as_deref())) }
                            td { (or_placeholder(c.email.as_deref())) }
                            td { (or_placeholder(c.director_name.as_deref())) }
                            td class="num" { (format_count(c.buildings_count)) }
                        }
                    }
                    @if view.status == ViewStatus::Ready && view.rows.is_empty() {
                        tr { td class="empty" colspan="6" { "Ничего не найдено" } }
                    }
                }
            }

            (pagination(TABLE_URL, TARGET, SYNC, snapshot.query.page(), view.pages))
        }
    }
}

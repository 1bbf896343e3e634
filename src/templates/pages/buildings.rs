use crate::listing::format::{
    account_type_label, format_area, format_balance, format_count, format_date, format_phone,
    or_placeholder,
};
use crate::listing::{AccountType, BuildingFilters, SortColumn, SortOrder, Snapshot, ViewStatus};
use crate::templates::{desktop_layout, load_error, op_url, op_vals, pagination, NavItem};
use maud::{html, Markup};

pub const TABLE_URL: &str = "/buildings/table";
const TABLE_ID: &str = "buildings-table";
const TARGET: &str = "#buildings-table";
const SYNC: &str = "#buildings-listing:replace";

pub struct BuildingsVm<'a> {
    pub snapshot: &'a Snapshot<BuildingFilters>,
    pub regions: &'a [String],
    pub year_choices: Vec<i32>,
}

pub fn buildings_page(vm: &BuildingsVm) -> Markup {
    desktop_layout(
        "Здания",
        NavItem::Buildings,
        html! {
            main class="container" {
                h1 { "Здания" }
                div id="buildings-listing" {
                    (filters_form(&vm.snapshot.query, vm.regions, &vm.year_choices))
                    (buildings_table(vm.snapshot))
                }
            }
        },
    )
}

fn filters_form(state: &BuildingFilters, regions: &[String], year_choices: &[i32]) -> Markup {
    html! {
        form id="building-filters" class="filters" onsubmit="return false" {
            label {
                "Поиск по адресу или коду МКД"
                input
                    type="search"
                    name="value"
                    value=(state.search_text())
                    hx-get=(TABLE_URL)
                    hx-vals=(op_vals("search"))
                    hx-trigger="input changed delay:300ms, search"
                    hx-target=(TARGET)
                    hx-swap="outerHTML"
                    hx-sync=(SYNC);
            }

            label {
                "Тип счёта"
                select
                    name="value"
                    hx-get=(TABLE_URL)
                    hx-vals=(op_vals("account_type"))
                    hx-trigger="change"
                    hx-target=(TARGET)
                    hx-swap="outerHTML"
                    hx-sync=(SYNC)
                {
                    @for t in AccountType::CHOICES {
                        option value=(t.code()) selected[t == state.account_type()] { (t.label()) }
                    }
                }
            }

            label {
                "Баланс ФКР от, тыс. ₽"
                input
                    type="number"
                    name="value"
                    min="0"
                    step="any"
                    value=(state.min_balance())
                    hx-get=(TABLE_URL)
                    hx-vals=(op_vals("min_balance"))
                    hx-trigger="change"
                    hx-target=(TARGET)
                    hx-swap="outerHTML"
                    hx-sync=(SYNC);
            }

            label {
                "Регион"
                select
                    name="value"
                    hx-get=(TABLE_URL)
                    hx-vals=(op_vals("region"))
                    hx-trigger="change"
                    hx-target=(TARGET)
                    hx-swap="outerHTML"
                    hx-sync=(SYNC)
                {
                    option value="" selected[state.region().is_none()] { "Все регионы" }
                    @for region in regions {
                        option value=(region) selected[state.region() == Some(region.as_str())] { (region) }
                    }
                }
            }

            fieldset id="replacement-years" {
                legend { "Замена лифтов в году" }
                @for year in year_choices {
                    label {
                        input
                            type="checkbox"
                            name="value"
                            value=(year)
                            checked[state.replacement_years().contains(*year)]
                            hx-get=(TABLE_URL)
                            hx-vals=(op_vals("replacement_year"))
                            hx-include="#replacement-years"
                            hx-trigger="change"
                            hx-target=(TARGET)
                            hx-swap="outerHTML"
                            hx-sync=(SYNC);
                        " " (year)
                    }
                }
            }

            label {
                input
                    type="checkbox"
                    name="value"
                    value="true"
                    checked[state.has_lifts()]
                    hx-get=(TABLE_URL)
                    hx-vals=(op_vals("has_lifts"))
                    hx-trigger="change"
                    hx-target=(TARGET)
                    hx-swap="outerHTML"
                    hx-sync=(SYNC);
                " Только дома с лифтами"
            }

            a class="export" href="/buildings/export.xlsx" { "Скачать XLSX" }
        }
    }
}

/// The swappable part of the listing: table plus pagination. A stale
/// snapshot renders a placeholder that fetches the table on load.
pub fn buildings_table(snapshot: &Snapshot<BuildingFilters>) -> Markup {
    if snapshot.stale {
        return html! {
            div id=(TABLE_ID) hx-get=(TABLE_URL) hx-trigger="load" hx-swap="outerHTML" hx-sync=(SYNC) {
                p class="loading" { "Загрузка…" }
            }
        };
    }

    let state = &snapshot.query;
    let view = &snapshot.view;

    html! {
        div id=(TABLE_ID) {
            @match view.status {
                ViewStatus::Failed => (load_error()),
                ViewStatus::Pending => p class="loading" { "Загрузка…" },
                ViewStatus::Ready => {
                    @if let Some(total) = view.total {
                        p class="found" { "Найдено: " strong { (format_count(total)) } }
                    }
                }
            }

            div class="table-wrap" {
                table class="listing" {
                    thead {
                        tr {
                            th { "ID" }
                            (sort_header(state, SortColumn::Address, "Адрес"))
                            th { "Регион" }
                            th { "Код МКД" }
                            th { "Площадь" }
                            (sort_header(state, SortColumn::Balance, "Баланс ФКР, ₽"))
                            (sort_header(state, SortColumn::Lifts, "Лифтов"))
                            (sort_header(state, SortColumn::Date, "Ближайшая замена"))
                            th { "УК" }
                            th { "Директор" }
                            th { "Телефон" }
                            th { "Email" }
                            th { "Владелец спецсчёта" }
                        }
                    }
                    tbody {
                        @for b in &view.rows {
                            tr {
                                td { (b.id) }
                                td { (or_placeholder(b.address.as_deref())) }
                                td { (or_placeholder(b.region.as_deref())) }
                                td { (or_placeholder(b.building_code.as_deref())) }
                                td class="num" { (format_area(b.total_area)) }
                                td class="num" { (format_balance(b.balance)) }
                                td class="num" {
                                    @match b.lifts_count {
                                        Some(n) => (n),
                                        None => "-",
                                    }
                                }
                                td { (format_date(b.nearest_replacement_date)) }
                                td { (or_placeholder(b.company_name.as_deref())) }
                                td { (or_placeholder(b.director_name.as_deref())) }
                                td class="phone" { (format_phone(b.phone.as_deref())) }
                                td { (or_placeholder(b.email.as_deref())) }
                                td { (account_type_label(b.owner_type.as_deref())) }
                            }
                        }
                        @if view.status == ViewStatus::Ready && view.rows.is_empty() {
                            tr { td class="empty" colspan="13" { "Ничего не найдено" } }
                        }
                    }
                }
            }

            (pagination(TABLE_URL, TARGET, SYNC, state.page(), view.pages))
        }
    }
}

fn sort_header(state: &BuildingFilters, column: SortColumn, label: &str) -> Markup {
    let active = state.sort_by() == column;
    let (arrow, aria) = match (active, state.sort_order()) {
        (false, _) => ("", "none"),
        (true, SortOrder::Asc) => (" ▲", "ascending"),
        (true, SortOrder::Desc) => (" ▼", "descending"),
    };

    html! {
        th aria-sort=(aria) {
            button
                type="button"
                class="sort"
                hx-get=(op_url(TABLE_URL, "sort", column.as_str()))
                hx-target=(TARGET)
                hx-swap="outerHTML"
                hx-sync=(SYNC)
            { (label) (arrow) }
        }
    }
}

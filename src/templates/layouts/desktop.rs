use maud::{html, Markup, DOCTYPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Dashboard,
    Buildings,
    Companies,
}

const NAV: [(NavItem, &str, &str); 3] = [
    (NavItem::Dashboard, "/", "Дашборд"),
    (NavItem::Buildings, "/buildings", "Здания"),
    (NavItem::Companies, "/companies", "Управляющие компании"),
];

pub fn desktop_layout(title: &str, active: NavItem, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Капитальный ремонт" }
                link rel="stylesheet" href="/static/main.css";
                script src="https://unpkg.com/htmx.org@1.9.12" defer {};
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    h3 { "Капитальный ремонт - Управление" }
                    nav {
                        ul {
                            @for (item, href, label) in NAV {
                                li {
                                    a href=(href) aria-current=[(item == active).then_some("page")] { (label) }
                                }
                            }
                        }
                    }
                }
                (content)
            }
        }
    }
}

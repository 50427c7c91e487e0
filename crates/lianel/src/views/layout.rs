use maud::{html, Markup, DOCTYPE};

use super::PageContext;
use crate::navigation::{LISTING_PATH, ROOT_PATH, SIGNUP_PATH};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Page shell: header with drawer menu, brand link and sign-up link.
///
/// The drawer is a `<details>` disclosure, so its open/closed state lives
/// in the rendered page and resets on every navigation.
pub fn page(ctx: &PageContext, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · " (ctx.app_name) }
                script src=(HTMX_SRC) {}
            }
            body {
                header {
                    div.header-bar {
                        (drawer(ctx))
                        a.brand href=(ctx.href(ROOT_PATH)) {
                            span { (ctx.app_name) }
                        }
                        nav.right-nav {
                            a href=(ctx.href(SIGNUP_PATH)) { "Sign up" }
                        }
                    }
                }
                main { (content) }
            }
        }
    }
}

fn drawer(ctx: &PageContext) -> Markup {
    html! {
        details.drawer id="app-drawer" {
            summary aria-label="Open menu" { "☰" }
            aside role="dialog" aria-label="Main menu" {
                div.drawer-title { "Menu" }
                nav {
                    a href=(ctx.href(LISTING_PATH)) { "Profiles" }
                }
                div.drawer-footer { "v" (ctx.version) " • " (ctx.app_name) }
            }
        }
    }
}

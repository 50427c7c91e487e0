use maud::{html, Markup};

use super::{layout, PageContext};
use crate::navigation::LISTING_PATH;

pub fn landing_page(ctx: &PageContext) -> Markup {
    layout::page(
        ctx,
        "Welcome",
        html! {
            section.landing {
                h1 { "Welcome to " (ctx.app_name) }
                p { "This is your landing page. Use the menu to explore." }
                a.button href=(ctx.href(LISTING_PATH)) { "Show Profiles" }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_page() {
        let html = landing_page(&PageContext::default()).into_string();
        assert!(html.contains("<h1>Welcome to Lianel</h1>"));
        assert!(html.contains("Show Profiles"));
    }
}

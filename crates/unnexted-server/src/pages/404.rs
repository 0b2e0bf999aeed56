use anyhow::Result;
use maud::{html, Markup};
use unnexted::{PageModule, Props};

use super::str_prop;

pub fn page() -> PageModule {
    PageModule::page(render)
}

fn render(props: &Props) -> Result<Markup> {
    let pathname = str_prop(props, "pathname", "unknown");

    Ok(html! {
        div.page.not-found {
            h1 { "404" }
            p.muted { "Page not found" }
            p { "The page " code { (pathname) } " does not exist." }
            a.button href="/" { "Go Home" }
        }
    })
}

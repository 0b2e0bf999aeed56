use anyhow::Result;
use maud::{html, Markup};
use unnexted::{PageModule, Props};

use super::{nav, str_prop};

pub fn page() -> PageModule {
    PageModule::page(render)
}

fn render(props: &Props) -> Result<Markup> {
    let title = str_prop(props, "title", "About");

    Ok(html! {
        div.page {
            header {
                h1 { (title) }
                p.muted { "Learn about this project" }
            }
            main {
                section {
                    h2 { "What is Un-nexted?" }
                    p {
                        "A small meta-framework built to show the moving parts of "
                        "server-side rendering, client-side hydration and file-system routing."
                    }
                }
                section {
                    h2 { "Technology Stack" }
                    ul {
                        li { strong { "Server:" } " axum on tokio" }
                        li { strong { "Templates:" } " Maud, checked at compile time" }
                        li { strong { "Client:" } " a hydration bootstrap compiled to WebAssembly" }
                    }
                }
                section {
                    h2 { "Interactive Demo" }
                    p { "Like this page: " span data-likes { "0" } }
                    button data-action="like" { "Like" }
                }
                section {
                    h2 { "Navigation" }
                    (nav())
                }
            }
        }
    })
}

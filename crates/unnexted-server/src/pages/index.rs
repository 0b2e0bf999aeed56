use anyhow::Result;
use maud::{html, Markup};
use unnexted::{PageModule, Props};

use super::{nav, str_prop};

pub fn page() -> PageModule {
    PageModule::page(render)
}

fn render(props: &Props) -> Result<Markup> {
    let title = str_prop(props, "title", "Un-nexted");

    Ok(html! {
        div.page {
            header {
                h1 { "Welcome to " (title) }
                p.muted { "A Next.js-style framework built from scratch with SSR and hydration" }
            }
            main {
                section {
                    h2 { "Interactive Counter" }
                    p { "This counter becomes interactive once the page is hydrated:" }
                    div.counter {
                        button data-action="decrement" { "-" }
                        span data-count { "0" }
                        button data-action="increment" { "+" }
                    }
                }
                section {
                    h2 { "Features" }
                    ul {
                        li { "Server-Side Rendering (SSR)" }
                        li { "Client Hydration" }
                        li { "File-System Routing" }
                        li { "Dynamic Routes" }
                        li { "Server-Side Props" }
                    }
                }
                section {
                    h2 { "Navigation" }
                    (nav())
                }
            }
        }
    })
}

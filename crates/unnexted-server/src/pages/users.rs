use std::time::Duration;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use maud::{html, Markup};
use serde_json::{json, Value};
use unnexted::{PageModule, Props, ServerProps, ServerPropsContext};

pub fn page() -> PageModule {
    PageModule::with_server_props(render, load)
}

/// Stands in for a remote API call
async fn load(_ctx: ServerPropsContext) -> Result<ServerProps> {
    tokio::time::sleep(Duration::from_millis(100)).await;

    let users = json!([
        { "id": 1, "name": "Alice Johnson", "email": "alice@example.com" },
        { "id": 2, "name": "Bob Smith", "email": "bob@example.com" },
        { "id": 3, "name": "Charlie Brown", "email": "charlie@example.com" },
        { "id": 4, "name": "Diana Prince", "email": "diana@example.com" },
        { "id": 5, "name": "Evan Williams", "email": "evan@example.com" },
    ]);

    Ok(ServerProps::default()
        .with("title", "Users")
        .with("users", users)
        .with("fetchedAt", Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)))
}

fn render(props: &Props) -> Result<Markup> {
    let users = props
        .get("users")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let fetched_at = props.get("fetchedAt").and_then(Value::as_str).unwrap_or("");

    Ok(html! {
        div.page.users {
            header {
                h1 { "Users" }
                p.muted { "Data fetched at: " time datetime=(fetched_at) { (fetched_at) } }
            }
            main {
                section {
                    h2 { "Search Users" }
                    input type="search" placeholder="Filter by name or email..." data-filter;
                }
                section {
                    h2 { "User List (" (users.len()) ")" }
                    table {
                        thead { tr { th { "ID" } th { "Name" } th { "Email" } } }
                        tbody {
                            @for user in users {
                                tr data-user-id=(user["id"]) {
                                    td { (user["id"]) }
                                    td { (user["name"].as_str().unwrap_or_default()) }
                                    td { (user["email"].as_str().unwrap_or_default()) }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

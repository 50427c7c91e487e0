use chrono::{DateTime, Utc};
use maud::{html, Markup};

use super::{layout, PageContext};
use crate::api::Profile;
use crate::navigation::LISTING_PATH;

/// Shown for optional values the service left out
const MISSING: &str = "—";

pub fn table_url(ctx: &PageContext) -> String {
    ctx.href(&format!("{}/table", LISTING_PATH))
}

/// `createdAt` as `YYYY-MM-DD HH:MM:SS` UTC, or verbatim when it is not RFC 3339
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(MISSING)
}

/// Listing page; the table itself loads as a fragment
pub fn profiles_page(ctx: &PageContext) -> Markup {
    layout::page(
        ctx,
        "Profiles",
        html! {
            div.listing {
                h1 { "Profiles" }
                div.table-card hx-get=(table_url(ctx)) hx-trigger="load" hx-swap="outerHTML" {
                    "Loading profiles…"
                }
            }
        },
    )
}

/// Table fragment: error first, then the empty state, then rows
pub fn profile_table(profiles: &Result<Vec<Profile>, String>) -> Markup {
    html! {
        @match profiles {
            Err(message) => {
                div.table-card.error { "Error: " (message) }
            }
            Ok(rows) => {
                @if rows.is_empty() {
                    div.table-card.empty { "No profiles found." }
                } @else {
                    div.table-card {
                        table {
                            thead {
                                tr {
                                    @for heading in ["Username", "Name", "Email", "Mobile", "Country", "Birthday", "Profile ID", "Created"] {
                                        th { (heading) }
                                    }
                                }
                            }
                            tbody {
                                @for profile in rows {
                                    (profile_row(profile))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn profile_row(profile: &Profile) -> Markup {
    let created = profile.created_at.as_deref().map(format_timestamp);
    html! {
        tr {
            td { span.badge { (profile.username) } }
            td { (profile.full_name()) }
            td { (profile.email) }
            td { (or_missing(profile.mobile.as_deref())) }
            td { (or_missing(profile.country.as_deref())) }
            td { (or_missing(profile.birthday.as_deref())) }
            td.muted { (or_missing(profile.profile_id.as_deref())) }
            td.muted { (or_missing(created.as_deref())) }
        }
    }
}

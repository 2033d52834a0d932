//! # Messages
//!
//! Constant strings and format functions for user-facing replies.
//! The four project-lookup outcomes (single, several, none on file, not
//! found) are deliberately distinct texts.

pub fn mention(id: &str) -> String {
    format!("<@{id}>")
}

pub fn project_manager_single(name: &str, id: &str) -> String {
    format!("**{name}** is managed by {}.", mention(id))
}

pub fn project_manager_many(name: &str, ids: &[String]) -> String {
    let mentions: Vec<String> = ids.iter().map(|id| mention(id)).collect();
    let joined = match mentions.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {last}", rest.join(", ")),
        _ => mentions.join(", "),
    };
    format!("**{name}** is managed by {joined}.")
}

pub fn project_no_manager(name: &str) -> String {
    format!("**{name}** has no responsible person on file.")
}

pub fn project_not_found(key: &str) -> String {
    format!("❓ No project named `{key}` was found.")
}

pub fn user_projects(id: &str, lines: &str) -> String {
    format!("{} is responsible for:\n{lines}", mention(id))
}

pub fn user_project_line(name: &str, key: &str) -> String {
    format!("• {name} ({key})")
}

pub fn user_no_projects(id: &str) -> String {
    format!("{} has no assigned projects.", mention(id))
}

pub fn user_not_recognized(raw: &str) -> String {
    format!("`{raw}` doesn't look like a user, so no projects to show. Use an @mention or a user ID.")
}

pub fn list_line(id: &str, names: &str) -> String {
    format!("{}: {names}", mention(id))
}

pub const LIST_HEADER: &str = "📋 **Projects by responsible person**";
pub const LIST_EMPTY: &str = "No projects are registered.";

pub const GENERIC_FAILURE: &str = "⚠️ Something went wrong. Please try again.";

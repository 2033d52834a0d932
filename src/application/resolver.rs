//! # Command Resolver
//!
//! Turns one command invocation (the argument text after the command word)
//! into exactly one reply string. Pure over the directory: no side effects,
//! so every behavior here is unit-testable without a chat transport.

use anyhow::Result;
use regex::Regex;

use crate::application::directory::Directory;
use crate::strings::{help, messages};

/// Resolve an invocation. `sender` is the invoking person's identifier, used
/// when `user` is given without a target.
///
/// Dispatch is on the first whitespace token: empty or `help` shows usage,
/// `list` groups all projects by manager, `user` looks up a person, and
/// anything else is treated as a project key.
pub fn resolve(directory: &Directory, text: &str, sender: &str) -> Result<String> {
    let mut tokens = text.split_whitespace();
    let first = tokens.next().unwrap_or("").to_lowercase();

    let reply = match first.as_str() {
        "" | "help" => help::MAIN.to_string(),
        "list" => list_reply(directory),
        "user" => user_reply(directory, tokens.next(), sender),
        key => project_reply(directory, key),
    };
    Ok(reply)
}

/// Extract a bare person identifier from user input.
///
/// Accepts an identifier that already matches the platform shape (`U` plus
/// uppercase alphanumerics, at least 9 characters total) unchanged, or a
/// mention wrapper `<@ID>` / `<@ID|displayname>`. Anything else yields `None`
/// and the caller never queries the directory with it.
pub fn extract_person_id(text: &str) -> Option<String> {
    let raw = text.trim();
    if raw.is_empty() {
        return None;
    }

    let bare = Regex::new(r"^U[A-Z0-9]{8,}$").unwrap();
    if bare.is_match(raw) {
        return Some(raw.to_string());
    }

    let mention = Regex::new(r"<@([A-Z0-9]{8,})(?:\|.+)?>").unwrap();
    mention.captures(raw).map(|caps| caps[1].to_string())
}

fn project_reply(directory: &Directory, key: &str) -> String {
    match directory.get(key) {
        None => messages::project_not_found(key),
        Some(record) if record.managers.is_empty() => messages::project_no_manager(&record.name),
        Some(record) if record.managers.len() == 1 => {
            messages::project_manager_single(&record.name, &record.managers[0])
        }
        Some(record) => messages::project_manager_many(&record.name, &record.managers),
    }
}

fn user_reply(directory: &Directory, target: Option<&str>, sender: &str) -> String {
    let id = match target {
        // No target given: the invoker is asking about themselves.
        None => Some(sender.to_string()),
        Some(raw) => extract_person_id(raw),
    };

    let Some(id) = id else {
        return messages::user_not_recognized(target.unwrap_or(""));
    };

    let projects = directory.projects_of(&id);
    if projects.is_empty() {
        messages::user_no_projects(&id)
    } else {
        let lines: Vec<String> = projects
            .iter()
            .map(|p| messages::user_project_line(&p.name, &p.key))
            .collect();
        messages::user_projects(&id, &lines.join("\n"))
    }
}

fn list_reply(directory: &Directory) -> String {
    let groups = directory.manager_groups();
    if groups.is_empty() {
        return messages::LIST_EMPTY.to_string();
    }

    let mut lines: Vec<String> = vec![messages::LIST_HEADER.to_string()];
    for (person, projects) in groups {
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        lines.push(messages::list_line(&person, &names.join(", ")));
    }
    lines.join("\n")
}

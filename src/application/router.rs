//! # Command Router
//!
//! Routes incoming room messages to the command resolver. Messages that do
//! not start with the configured command word are ignored; everything else
//! produces exactly one reply. Resolution failures are logged here and turned
//! into a single generic failure message, never shown raw to the room.

use std::sync::Arc;

use anyhow::Result;

use crate::application::directory::Directory;
use crate::application::resolver;
use crate::application::stats::CommandStats;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;

pub struct CommandRouter {
    config: AppConfig,
    directory: Arc<Directory>,
    stats: Arc<CommandStats>,
}

impl CommandRouter {
    pub fn new(config: AppConfig, directory: Arc<Directory>, stats: Arc<CommandStats>) -> Self {
        Self {
            config,
            directory,
            stats,
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &str, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let msg = message.trim();
        let Some(args) = strip_command(msg, &self.config.commands.name) else {
            return Ok(());
        };

        let count = self.stats.record();
        tracing::info!(
            "Router dispatching args='{}' sender='{}' (invocation #{})",
            args,
            sender,
            count
        );

        let reply = match resolver::resolve(&self.directory, args, sender) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Command resolution failed: {e:#}");
                messages::GENERIC_FAILURE.to_string()
            }
        };

        chat.send_message(&reply)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!(e))
    }
}

/// Returns the argument text when `msg` invokes `name`, None otherwise.
/// `.projects` must not match a command word of `.project`.
fn strip_command<'a>(msg: &'a str, name: &str) -> Option<&'a str> {
    let rest = msg.strip_prefix(name)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockChat {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatProvider for MockChat {
        async fn send_message(&self, content: &str) -> Result<String, String> {
            self.sent.lock().unwrap().push(content.to_string());
            Ok("$event".to_string())
        }

        async fn send_notification(&self, content: &str) -> Result<(), String> {
            self.send_message(content).await.map(|_| ())
        }

        fn room_id(&self) -> String {
            "!room:example.org".to_string()
        }
    }

    fn router() -> CommandRouter {
        let config: AppConfig = serde_yaml::from_str(
            r#"
            services:
              matrix:
                homeserver: "https://example.org"
                username: "roster"
                password: "secret"
            "#,
        )
        .unwrap();
        let directory = Directory::from_json(
            r#"{"bk": {"name": "BK", "managers": ["U100000001"]}}"#,
        )
        .unwrap();
        CommandRouter::new(config, Arc::new(directory), Arc::new(CommandStats::new()))
    }

    #[tokio::test]
    async fn replies_to_a_project_lookup() {
        let router = router();
        let chat = MockChat::default();
        router.route(&chat, ".project bk", "U100000009").await.unwrap();

        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("<@U100000001>"));
    }

    #[tokio::test]
    async fn ignores_unrelated_messages() {
        let router = router();
        let chat = MockChat::default();
        router.route(&chat, "good morning", "U100000009").await.unwrap();
        router.route(&chat, ".projects bk", "U100000009").await.unwrap();

        assert!(chat.sent.lock().unwrap().is_empty());
        assert_eq!(router.stats.handled(), 0);
    }

    #[tokio::test]
    async fn bare_command_shows_help_and_counts() {
        let router = router();
        let chat = MockChat::default();
        router.route(&chat, ".project", "U100000009").await.unwrap();

        let sent = chat.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], crate::strings::help::MAIN);
        assert_eq!(router.stats.handled(), 1);
    }

    #[test]
    fn strip_command_requires_word_boundary() {
        assert_eq!(strip_command(".project bk", ".project"), Some("bk"));
        assert_eq!(strip_command(".project", ".project"), Some(""));
        assert_eq!(strip_command(".projects bk", ".project"), None);
        assert_eq!(strip_command("hello", ".project"), None);
    }
}

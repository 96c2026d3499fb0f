use serde::Serialize;

use crate::bitbucket::models::CommitSummary;

/// Body of a Discord execute-webhook call.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub content: String,
}

impl OutboundMessage {
    pub fn from_commit(commit: &CommitSummary<'_>) -> Self {
        Self {
            content: format!(
                "🚀 **New Commit:** `{}`\n\
                 👤 **Committer:** {}\n\
                 🔑 **Hash:** `{}`\n\
                 📝 **Message:** {}\n\
                 🔗 **URL:** [View Commit]({})",
                commit.repository, commit.author, commit.hash, commit.message, commit.url
            ),
        }
    }
}

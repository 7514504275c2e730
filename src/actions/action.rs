//! Catalog actions.

use clap::Subcommand;
use strum_macros::{EnumIter, IntoStaticStr};

use super::catalog::{self, ActionRoute};
use super::ActionRequest;
use crate::session::FormDraft;

/// Default thread prefix (no prefix).
pub const DEFAULT_PREFIX_ID: &str = "0";

/// A write the session can perform.
///
/// Each variant maps to one [`ActionRoute`]; [`Action::request`] renders it.
/// The enum doubles as the CLI's action subcommands.
///
/// # Examples
///
/// ```
/// use xenforo_client::Action;
///
/// let request = Action::react("5", "1001").request();
/// assert_eq!(request.path, "posts/1001/react");
/// assert_eq!(request.fields.get("reaction_id"), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Subcommand, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    /// React to a post
    React {
        /// Reaction id (1 is "Like" on a stock install)
        #[arg(long)]
        reaction_id: String,
        /// Post id
        #[arg(long)]
        post_id: String,
    },
    /// Reply to a thread
    Reply {
        /// Thread id
        #[arg(long)]
        thread_id: String,
        /// Message body (BBCode)
        #[arg(long)]
        message: String,
    },
    /// Edit a post
    EditPost {
        /// Post id
        #[arg(long)]
        post_id: String,
        /// New message body
        #[arg(long)]
        message: String,
    },
    /// Start a thread on a board
    NewThread {
        /// Board path, e.g. `/general.4`
        #[arg(long)]
        board_path: String,
        /// Thread title
        #[arg(long)]
        title: String,
        /// Message body
        #[arg(long)]
        message: String,
        /// Thread prefix id
        #[arg(long, default_value = DEFAULT_PREFIX_ID)]
        prefix_id: String,
    },
    /// Edit a thread through its first post
    EditThread {
        /// Id of the thread's first post
        #[arg(long)]
        post_id: String,
        /// New thread title
        #[arg(long)]
        title: String,
        /// New message body
        #[arg(long)]
        message: String,
        /// Thread prefix id
        #[arg(long, default_value = DEFAULT_PREFIX_ID)]
        prefix_id: String,
    },
    /// Start a private conversation
    PrivateMessage {
        /// Conversation title
        #[arg(long)]
        title: String,
        /// Message body
        #[arg(long)]
        message: String,
        /// Recipient usernames (comma separated)
        #[arg(long, value_delimiter = ',', required = true)]
        recipients: Vec<String>,
    },
    /// Reply to a private conversation
    ReplyPrivateMessage {
        /// Conversation id
        #[arg(long)]
        conversation_id: String,
        /// Message body
        #[arg(long)]
        message: String,
    },
    /// Leave a private conversation
    LeavePrivateMessage {
        /// Conversation id
        #[arg(long)]
        conversation_id: String,
        /// Whether new replies bring the conversation back
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        accept_future_messages: bool,
    },
    /// Ignore a member
    Ignore {
        /// Member id
        #[arg(long)]
        member_id: String,
    },
    /// Follow a member
    Follow {
        /// Member id
        #[arg(long)]
        member_id: String,
    },
    /// Post on a member's profile
    ProfilePost {
        /// Member id
        #[arg(long)]
        member_id: String,
        /// Message body
        #[arg(long)]
        message: String,
    },
    /// Edit a profile post
    EditProfilePost {
        /// Profile post id
        #[arg(long)]
        profile_post_id: String,
        /// New message body
        #[arg(long)]
        message: String,
    },
    /// Delete a profile post
    DeleteProfilePost {
        /// Profile post id
        #[arg(long)]
        profile_post_id: String,
        /// Reason shown in the moderator log
        #[arg(long)]
        reason: Option<String>,
    },
    /// Bookmark a post
    Bookmark {
        /// Post id
        #[arg(long)]
        post_id: String,
        /// Private note attached to the bookmark
        #[arg(long)]
        message: Option<String>,
        /// Bookmark labels (comma separated)
        #[arg(long, value_delimiter = ',')]
        labels: Vec<String>,
    },
    /// Replace the account signature
    Signature {
        /// Signature text
        #[arg(long)]
        signature: String,
    },
}

impl Action {
    /// React to `post_id` with `reaction_id`.
    pub fn react(reaction_id: impl Into<String>, post_id: impl Into<String>) -> Self {
        Action::React {
            reaction_id: reaction_id.into(),
            post_id: post_id.into(),
        }
    }

    /// Start a thread on `board_path` with the default (empty) prefix.
    pub fn new_thread(
        title: impl Into<String>,
        message: impl Into<String>,
        board_path: impl Into<String>,
    ) -> Self {
        Action::NewThread {
            board_path: board_path.into(),
            title: title.into(),
            message: message.into(),
            prefix_id: DEFAULT_PREFIX_ID.to_string(),
        }
    }

    /// Edit the thread whose first post is `post_id`, with the default prefix.
    pub fn edit_thread(
        title: impl Into<String>,
        message: impl Into<String>,
        post_id: impl Into<String>,
    ) -> Self {
        Action::EditThread {
            post_id: post_id.into(),
            title: title.into(),
            message: message.into(),
            prefix_id: DEFAULT_PREFIX_ID.to_string(),
        }
    }

    /// Leave `conversation_id`, letting new replies bring it back.
    pub fn leave_private_message(conversation_id: impl Into<String>) -> Self {
        Action::LeavePrivateMessage {
            conversation_id: conversation_id.into(),
            accept_future_messages: true,
        }
    }

    /// Catalog name of the action (kebab-case).
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The route this action posts to.
    pub fn route(&self) -> &'static ActionRoute {
        match self {
            Action::React { .. } => &catalog::REACT,
            Action::Reply { .. } => &catalog::REPLY,
            Action::EditPost { .. } => &catalog::EDIT_POST,
            Action::NewThread { .. } => &catalog::NEW_THREAD,
            Action::EditThread { .. } => &catalog::EDIT_THREAD,
            Action::PrivateMessage { .. } => &catalog::PRIVATE_MESSAGE,
            Action::ReplyPrivateMessage { .. } => &catalog::REPLY_PRIVATE_MESSAGE,
            Action::LeavePrivateMessage { .. } => &catalog::LEAVE_PRIVATE_MESSAGE,
            Action::Ignore { .. } => &catalog::IGNORE,
            Action::Follow { .. } => &catalog::FOLLOW,
            Action::ProfilePost { .. } => &catalog::PROFILE_POST,
            Action::EditProfilePost { .. } => &catalog::EDIT_PROFILE_POST,
            Action::DeleteProfilePost { .. } => &catalog::DELETE_PROFILE_POST,
            Action::Bookmark { .. } => &catalog::BOOKMARK,
            Action::Signature { .. } => &catalog::SIGNATURE,
        }
    }

    /// Renders the action into its path, fields and success message.
    pub fn request(&self) -> ActionRequest {
        let mut fields = FormDraft::new();
        let params: Vec<(&str, String)> = match self {
            Action::React {
                reaction_id,
                post_id,
            } => {
                fields.set("reaction_id", reaction_id);
                vec![("post_id", post_id.clone())]
            }
            Action::Reply { thread_id, message } => {
                fields.set("message", message);
                vec![("thread_id", thread_id.clone())]
            }
            Action::EditPost { post_id, message } => {
                fields.set("message", message);
                vec![("post_id", post_id.clone())]
            }
            Action::NewThread {
                board_path,
                title,
                message,
                prefix_id,
            } => {
                fields.set("title", title);
                fields.set("message", message);
                fields.set("prefix_id", prefix_id);
                vec![("board_path", board_path.clone())]
            }
            Action::EditThread {
                post_id,
                title,
                message,
                prefix_id,
            } => {
                fields.set("title", title);
                fields.set("message", message);
                fields.set("prefix_id", prefix_id);
                vec![("post_id", post_id.clone())]
            }
            Action::PrivateMessage {
                title,
                message,
                recipients,
            } => {
                let recipients = recipients.join(",");
                fields.set("title", title);
                fields.set("message", message);
                fields.set("recipients", recipients.clone());
                vec![("recipients", recipients)]
            }
            Action::ReplyPrivateMessage {
                conversation_id,
                message,
            } => {
                fields.set("message", message);
                vec![("conversation_id", conversation_id.clone())]
            }
            Action::LeavePrivateMessage {
                conversation_id,
                accept_future_messages,
            } => {
                let state = if *accept_future_messages {
                    "deleted"
                } else {
                    "deleted_ignored"
                };
                fields.set("recipient_state", state);
                vec![("conversation_id", conversation_id.clone())]
            }
            Action::Ignore { member_id } | Action::Follow { member_id } => {
                vec![("member_id", member_id.clone())]
            }
            Action::ProfilePost { member_id, message } => {
                fields.set("message", message);
                vec![("member_id", member_id.clone())]
            }
            Action::EditProfilePost {
                profile_post_id,
                message,
            } => {
                fields.set("message", message);
                vec![("profile_post_id", profile_post_id.clone())]
            }
            Action::DeleteProfilePost {
                profile_post_id,
                reason,
            } => {
                if let Some(reason) = reason {
                    fields.set("reason", reason);
                }
                vec![("profile_post_id", profile_post_id.clone())]
            }
            Action::Bookmark {
                post_id,
                message,
                labels,
            } => {
                if let Some(message) = message {
                    fields.set("message", message);
                }
                if !labels.is_empty() {
                    fields.set("labels", labels.join(","));
                }
                vec![("post_id", post_id.clone())]
            }
            Action::Signature { signature } => {
                fields.set("signature", signature);
                Vec::new()
            }
        };

        let params: Vec<(&str, &str)> = params
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        let route = self.route();
        ActionRequest {
            name: route.name,
            path: route.render_path(&params),
            fields,
            log_message: route.render_log(&params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ROUTES;
    use strum::IntoEnumIterator;

    fn sample_actions() -> Vec<Action> {
        vec![
            Action::react("5", "1001"),
            Action::Reply {
                thread_id: "42".into(),
                message: "hello".into(),
            },
            Action::EditPost {
                post_id: "7".into(),
                message: "fixed".into(),
            },
            Action::new_thread("T", "B", "/general"),
            Action::edit_thread("T2", "B2", "9"),
            Action::PrivateMessage {
                title: "hi".into(),
                message: "there".into(),
                recipients: vec!["alice".into(), "bob".into()],
            },
            Action::ReplyPrivateMessage {
                conversation_id: "3".into(),
                message: "ok".into(),
            },
            Action::leave_private_message("3"),
            Action::Ignore {
                member_id: "11".into(),
            },
            Action::Follow {
                member_id: "12".into(),
            },
            Action::ProfilePost {
                member_id: "13".into(),
                message: "wall".into(),
            },
            Action::EditProfilePost {
                profile_post_id: "14".into(),
                message: "wall2".into(),
            },
            Action::DeleteProfilePost {
                profile_post_id: "15".into(),
                reason: Some("spam".into()),
            },
            Action::Bookmark {
                post_id: "16".into(),
                message: Some("note".into()),
                labels: vec!["rust".into(), "later".into()],
            },
            Action::Signature {
                signature: "sig".into(),
            },
        ]
    }

    #[test]
    fn test_react_request() {
        let request = Action::react("5", "1001").request();
        assert_eq!(request.name, "react");
        assert_eq!(request.path, "posts/1001/react");
        assert_eq!(request.uri(), "index.php?posts/1001/react");
        assert_eq!(
            request.fields.to_pairs(),
            vec![("reaction_id".to_string(), "5".to_string())]
        );
        assert_eq!(request.log_message, "reacted on post: 1001");
    }

    #[test]
    fn test_new_thread_request_uses_default_prefix() {
        let request = Action::new_thread("T", "B", "/general").request();
        assert_eq!(request.path, "forums/general/post-thread");
        assert_eq!(
            request.fields.to_pairs(),
            vec![
                ("title".to_string(), "T".to_string()),
                ("message".to_string(), "B".to_string()),
                ("prefix_id".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_private_message_joins_recipients() {
        let request = sample_actions()[5].request();
        assert_eq!(request.path, "conversations/add");
        assert_eq!(request.fields.get("recipients"), Some("alice,bob"));
        assert_eq!(request.log_message, "private message sent to: alice,bob");
    }

    #[test]
    fn test_leave_private_message_states() {
        let accept = Action::leave_private_message("3").request();
        assert_eq!(accept.fields.get("recipient_state"), Some("deleted"));

        let ignore = Action::LeavePrivateMessage {
            conversation_id: "3".into(),
            accept_future_messages: false,
        }
        .request();
        assert_eq!(ignore.fields.get("recipient_state"), Some("deleted_ignored"));
        assert_eq!(ignore.path, "conversations/3/leave");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let bookmark = Action::Bookmark {
            post_id: "16".into(),
            message: None,
            labels: Vec::new(),
        }
        .request();
        assert!(bookmark.fields.is_empty());
        assert_eq!(bookmark.path, "posts/16/bookmark/");

        let delete = Action::DeleteProfilePost {
            profile_post_id: "15".into(),
            reason: None,
        }
        .request();
        assert!(delete.fields.is_empty());
    }

    #[test]
    fn test_bookmark_joins_labels() {
        let request = sample_actions()[13].request();
        assert_eq!(request.fields.get("labels"), Some("rust,later"));
        assert_eq!(request.fields.get("message"), Some("note"));
    }

    #[test]
    fn test_every_variant_has_a_route() {
        let variants: Vec<Action> = Action::iter().collect();
        assert_eq!(variants.len(), ROUTES.len());
        for action in variants {
            assert_eq!(action.name(), action.route().name);
        }
    }

    #[test]
    fn test_requests_match_their_route() {
        for action in sample_actions() {
            let request = action.request();
            let route = action.route();
            assert!(
                !request.path.contains('{') && !request.log_message.contains('{'),
                "{} left a placeholder unrendered",
                route.name
            );
            for (field, _) in request.fields.iter() {
                assert!(route.accepts_field(field), "{} sent unexpected {}", route.name, field);
            }
            for field in route.required {
                assert!(
                    request.fields.get(field).is_some(),
                    "{} is missing required {}",
                    route.name,
                    field
                );
            }
        }
    }

    #[test]
    fn test_sample_covers_every_route() {
        let names: Vec<&str> = sample_actions().iter().map(Action::name).collect();
        for route in ROUTES {
            assert!(names.contains(&route.name), "no sample for {}", route.name);
        }
    }
}

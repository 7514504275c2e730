//! Route table for forum actions.

/// Template for one action: where it posts and which fields it sends.
///
/// `{placeholders}` in `path` and `log` are filled from the action's
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRoute {
    /// Catalog name (kebab-case, matches the CLI subcommand)
    pub name: &'static str,
    /// Route template below `index.php?`
    pub path: &'static str,
    /// Fields always sent
    pub required: &'static [&'static str],
    /// Fields sent only when provided
    pub optional: &'static [&'static str],
    /// Success message template
    pub log: &'static str,
}

impl ActionRoute {
    /// Renders the route template.
    pub fn render_path(&self, params: &[(&str, &str)]) -> String {
        render(self.path, params)
    }

    /// Renders the success message template.
    pub fn render_log(&self, params: &[(&str, &str)]) -> String {
        render(self.log, params)
    }

    /// Returns true if the route sends a field called `field`.
    pub fn accepts_field(&self, field: &str) -> bool {
        self.required.contains(&field) || self.optional.contains(&field)
    }
}

/// Replaces every `{key}` in `template` with its value from `params`.
pub fn render(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_string(), |rendered, (key, value)| {
            rendered.replace(&format!("{{{key}}}"), value)
        })
}

/// React to a post.
pub const REACT: ActionRoute = ActionRoute {
    name: "react",
    path: "posts/{post_id}/react",
    required: &["reaction_id"],
    optional: &[],
    log: "reacted on post: {post_id}",
};

/// Reply to a thread.
pub const REPLY: ActionRoute = ActionRoute {
    name: "reply",
    path: "threads/{thread_id}/add-reply",
    required: &["message"],
    optional: &[],
    log: "commented on thread: {thread_id}",
};

/// Edit a post.
pub const EDIT_POST: ActionRoute = ActionRoute {
    name: "edit-post",
    path: "posts/{post_id}/edit",
    required: &["message"],
    optional: &[],
    log: "post edited: {post_id}",
};

/// Start a thread on a board.
pub const NEW_THREAD: ActionRoute = ActionRoute {
    name: "new-thread",
    path: "forums{board_path}/post-thread",
    required: &["title", "message", "prefix_id"],
    optional: &[],
    log: "new thread on board: {board_path}",
};

/// Edit a thread title, prefix and first post.
pub const EDIT_THREAD: ActionRoute = ActionRoute {
    name: "edit-thread",
    path: "posts/{post_id}/edit",
    required: &["title", "message", "prefix_id"],
    optional: &[],
    log: "thread edited: {post_id}",
};

/// Start a conversation.
pub const PRIVATE_MESSAGE: ActionRoute = ActionRoute {
    name: "private-message",
    path: "conversations/add",
    required: &["title", "message", "recipients"],
    optional: &[],
    log: "private message sent to: {recipients}",
};

/// Reply to a conversation.
pub const REPLY_PRIVATE_MESSAGE: ActionRoute = ActionRoute {
    name: "reply-private-message",
    path: "conversations/{conversation_id}/add-reply",
    required: &["message"],
    optional: &[],
    log: "private message replied: {conversation_id}",
};

/// Leave a conversation.
pub const LEAVE_PRIVATE_MESSAGE: ActionRoute = ActionRoute {
    name: "leave-private-message",
    path: "conversations/{conversation_id}/leave",
    required: &["recipient_state"],
    optional: &[],
    log: "left conversation: {conversation_id}",
};

/// Ignore a member.
pub const IGNORE: ActionRoute = ActionRoute {
    name: "ignore",
    path: "members/{member_id}/ignore",
    required: &[],
    optional: &[],
    log: "ignoring member: {member_id}",
};

/// Follow a member.
pub const FOLLOW: ActionRoute = ActionRoute {
    name: "follow",
    path: "members/{member_id}/follow",
    required: &[],
    optional: &[],
    log: "following member: {member_id}",
};

/// Post on a member's profile.
pub const PROFILE_POST: ActionRoute = ActionRoute {
    name: "profile-post",
    path: "members/{member_id}/post",
    required: &["message"],
    optional: &[],
    log: "posted in profile: {member_id}",
};

/// Edit a profile post.
pub const EDIT_PROFILE_POST: ActionRoute = ActionRoute {
    name: "edit-profile-post",
    path: "profile-posts/{profile_post_id}/edit",
    required: &["message"],
    optional: &[],
    log: "profile post edited: {profile_post_id}",
};

/// Delete a profile post.
pub const DELETE_PROFILE_POST: ActionRoute = ActionRoute {
    name: "delete-profile-post",
    path: "profile-posts/{profile_post_id}/delete",
    required: &[],
    optional: &["reason"],
    log: "profile post deleted: {profile_post_id}",
};

/// Bookmark a post.
pub const BOOKMARK: ActionRoute = ActionRoute {
    name: "bookmark",
    path: "posts/{post_id}/bookmark/",
    required: &[],
    optional: &["message", "labels"],
    log: "bookmarked: {post_id}",
};

/// Replace the account signature.
pub const SIGNATURE: ActionRoute = ActionRoute {
    name: "signature",
    path: "account/signature",
    required: &["signature"],
    optional: &[],
    log: "signature edited",
};

/// Every route, keyed by name.
pub static ROUTES: &[ActionRoute] = &[
    REACT,
    REPLY,
    EDIT_POST,
    NEW_THREAD,
    EDIT_THREAD,
    PRIVATE_MESSAGE,
    REPLY_PRIVATE_MESSAGE,
    LEAVE_PRIVATE_MESSAGE,
    IGNORE,
    FOLLOW,
    PROFILE_POST,
    EDIT_PROFILE_POST,
    DELETE_PROFILE_POST,
    BOOKMARK,
    SIGNATURE,
];

/// Looks up a route by catalog name.
pub fn route(name: &str) -> Option<&'static ActionRoute> {
    ROUTES.iter().find(|route| route.name == name)
}

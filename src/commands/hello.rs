use crate::types::{ColorTag, Reply, UserRef};

/// Greet the invoking user.
pub fn reply(author: &UserRef) -> Reply {
    Reply::new(format!("Hello, {}!", author.mention()), ColorTag::Blue)
}

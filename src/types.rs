//! Common types used throughout the powerscale bot.

use std::fmt;

use poise::serenity_prelude::{Mentionable, User, UserId};
use strum::Display;

/// Colour accent of a reply.
///
/// Values follow Discord's stock embed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ColorTag {
    /// Welcome messages
    Green,
    /// Rebukes and failures
    Red,
    /// Greetings
    Blue,
    /// Usage hints and cooldown notices
    Orange,
    /// Interim acknowledgements
    Purple,
    /// Completion results
    Gold,
}

impl ColorTag {
    /// RGB value of the tag.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        match self {
            ColorTag::Green => 0x002E_CC71,
            ColorTag::Red => 0x00E7_4C3C,
            ColorTag::Blue => 0x0034_98DB,
            ColorTag::Orange => 0x00E6_7E22,
            ColorTag::Purple => 0x009B_59B6,
            ColorTag::Gold => 0x00F1_C40F,
        }
    }
}

/// A destination-agnostic reply, rendered as an embed by the Discord adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub title: Option<String>,
    pub body: String,
    pub color: ColorTag,
}

impl Reply {
    pub fn new(body: impl Into<String>, color: ColorTag) -> Self {
        Self {
            title: None,
            body: body.into(),
            color,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The parts of a Discord user the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
    pub is_bot: bool,
}

impl UserRef {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_bot: false,
        }
    }

    /// A bot account.
    pub fn bot(id: UserId, name: impl Into<String>) -> Self {
        Self {
            is_bot: true,
            ..Self::new(id, name)
        }
    }

    /// `<@id>` mention string for this user.
    #[must_use]
    pub fn mention(&self) -> String {
        self.id.mention().to_string()
    }
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            is_bot: user.bot,
            ..Self::new(user.id, user.name.clone())
        }
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

//! `!scale A vs B`: ask the completion service to power-scale two characters.

use log::{error, info, warn};

use crate::gateway::ReplySink;
use crate::openai::CompletionClient;
use crate::types::{ColorTag, Reply};

/// Embed descriptions are cut to Discord's message length.
pub const MAX_RESULT_CHARS: usize = 2000;

const SEPARATOR: &[u8] = b" vs ";
const TEMPERATURE: f32 = 0.2;
const USAGE: &str = "Usage: `!scale CharacterA vs CharacterB`";

/// Two names parsed from `A vs B`, both trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub name_a: String,
    pub name_b: String,
}

impl ComparisonRequest {
    /// Split `args` at the first ` vs `, ignoring ASCII case.
    ///
    /// Returns `None` when there is no separator or either side is blank.
    #[must_use]
    pub fn parse(args: &str) -> Option<Self> {
        let at = args
            .as_bytes()
            .windows(SEPARATOR.len())
            .position(|window| window.eq_ignore_ascii_case(SEPARATOR))?;

        let name_a = args[..at].trim();
        let name_b = args[at + SEPARATOR.len()..].trim();
        if name_a.is_empty() || name_b.is_empty() {
            return None;
        }

        Some(Self {
            name_a: name_a.to_string(),
            name_b: name_b.to_string(),
        })
    }

    fn prompt(&self) -> String {
        let Self { name_a, name_b } = self;
        format!(
            "You are comparing two fictional characters for a VS-style power scale.
Keep your answer concise and structured.

Character A: {name_a}
Character B: {name_b}

Provide ONLY:
- Strength
- Speed
- Durability
- Abilities
- Battle Intelligence
- Winner

Format like this:

Character A (Example - Luffy):
Strength: ...
Speed: ...
Durability: ...
Abilities: ...
Battle Intelligence: ...

Character B (Example - Goku):
Strength: ...
Speed: ...
Durability: ...
Abilities: ...
Battle Intelligence: ...

Winner: Character X (Example - Luffy)
"
        )
    }
}

/// First `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Run the command, emitting the interim acknowledgement through `sink`.
pub async fn run<C, S>(args: &str, client: &C, sink: &S) -> Reply
where
    C: CompletionClient,
    S: ReplySink,
{
    let Some(request) = ComparisonRequest::parse(args) else {
        return Reply::new(USAGE, ColorTag::Orange);
    };
    let ComparisonRequest { name_a, name_b } = &request;
    info!("Scaling {name_a} vs {name_b}");

    let ack = Reply::new(
        format!("Scaling **{name_a}** vs **{name_b}**..."),
        ColorTag::Purple,
    )
    .with_title("Power Scaling");
    if let Err(e) = sink.emit(ack).await {
        warn!("Failed to send scaling acknowledgement: {e}");
    }

    match client.complete(&request.prompt(), TEMPERATURE).await {
        Ok(text) => Reply::new(
            format!("```\n{}\n```", truncate_chars(&text, MAX_RESULT_CHARS)),
            ColorTag::Gold,
        )
        .with_title(format!("{name_a} vs {name_b} Result")),
        Err(e) => {
            error!("Scaling {name_a} vs {name_b} failed: {e}");
            let cause = e.to_string();
            Reply::new(
                format!(
                    "An error occurred while scaling: {}",
                    truncate_chars(&cause, MAX_RESULT_CHARS)
                ),
                ColorTag::Red,
            )
        }
    }
}

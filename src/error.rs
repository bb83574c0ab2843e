use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Serenity error: {0}")]
    Serenity(Box<poise::serenity_prelude::Error>),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Completion API error ({status}): {message}")]
    CompletionApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Completion response error: {0}")]
    CompletionResponse(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Command `{0}` is registered twice")]
    DuplicateCommand(String),

    #[error("`!{command}` is on cooldown. Try again in {:.1}s.", .remaining.as_secs_f64())]
    Cooldown {
        command: String,
        remaining: Duration,
    },
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Serenity(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_message_names_remaining_wait() {
        let err = BotError::Cooldown {
            command: "scale".to_string(),
            remaining: Duration::from_millis(7_300),
        };
        assert_eq!(err.to_string(), "`!scale` is on cooldown. Try again in 7.3s.");
    }

    #[test]
    fn api_error_carries_status_and_body() {
        let err = BotError::CompletionApi {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            message: "slow down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Completion API error (429 Too Many Requests): slow down"
        );
    }
}

use tower_sessions::Session;

use crate::error::{
    CardNewsError, MISSING_CREDENTIAL_MESSAGE, MISSING_TOPIC_MESSAGE, PARSE_FAILURE_MESSAGE,
    UPSTREAM_FAILURE_MESSAGE,
};

const FLASH_FLAG_KEY: &str = "flash_flag";

pub(crate) const FLASH_GENERATED: u16 = 1;
pub(crate) const FLASH_MISSING_TOPIC: u16 = 2;
pub(crate) const FLASH_MISSING_CREDENTIAL: u16 = 3;
pub(crate) const FLASH_UPSTREAM_FAILED: u16 = 4;
pub(crate) const FLASH_PARSE_FAILED: u16 = 5;
pub(crate) const FLASH_INVALID_SETTINGS: u16 = 6;
pub(crate) const FLASH_RESET: u16 = 7;

#[derive(Clone, Debug)]
pub(crate) struct FlashMessage {
    pub(crate) text: &'static str,
    pub(crate) class: &'static str,
}

pub(crate) async fn set_flash(session: &Session, flag: u16) -> Result<(), CardNewsError> {
    session.insert(FLASH_FLAG_KEY, flag).await?;
    Ok(())
}

pub(crate) async fn take_flash_message(
    session: &Session,
) -> Result<Option<FlashMessage>, CardNewsError> {
    let flag = session
        .get::<u16>(FLASH_FLAG_KEY)
        .await?
        .filter(|flag| *flag != 0);
    if flag.is_some() {
        session.insert(FLASH_FLAG_KEY, 0u16).await?;
    }
    Ok(flag.and_then(message_for))
}

/// Flash shown after a failed generation.
pub(crate) fn flag_for_error(err: &CardNewsError) -> u16 {
    match err {
        CardNewsError::MissingTopic => FLASH_MISSING_TOPIC,
        CardNewsError::MissingCredential => FLASH_MISSING_CREDENTIAL,
        CardNewsError::Parse(_) => FLASH_PARSE_FAILED,
        CardNewsError::BadRequest(_) => FLASH_INVALID_SETTINGS,
        CardNewsError::Upstream(_)
        | CardNewsError::Unauthorized
        | CardNewsError::InternalServerError(_) => FLASH_UPSTREAM_FAILED,
    }
}

fn message_for(flag: u16) -> Option<FlashMessage> {
    match flag {
        FLASH_GENERATED => Some(FlashMessage {
            text: "Your cards are ready. Click a card to select it for download.",
            class: "success",
        }),
        FLASH_MISSING_TOPIC => Some(FlashMessage {
            text: MISSING_TOPIC_MESSAGE,
            class: "warning",
        }),
        FLASH_MISSING_CREDENTIAL => Some(FlashMessage {
            text: MISSING_CREDENTIAL_MESSAGE,
            class: "error",
        }),
        FLASH_UPSTREAM_FAILED => Some(FlashMessage {
            text: UPSTREAM_FAILURE_MESSAGE,
            class: "error",
        }),
        FLASH_PARSE_FAILED => Some(FlashMessage {
            text: PARSE_FAILURE_MESSAGE,
            class: "error",
        }),
        FLASH_INVALID_SETTINGS => Some(FlashMessage {
            text: "Those generation settings aren't supported.",
            class: "warning",
        }),
        FLASH_RESET => Some(FlashMessage {
            text: "Everything has been reset.",
            class: "success",
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_maps_to_a_message() {
        let errors = [
            CardNewsError::MissingTopic,
            CardNewsError::MissingCredential,
            CardNewsError::Parse("x".to_string()),
            CardNewsError::Upstream("x".to_string()),
            CardNewsError::BadRequest("x".to_string()),
        ];
        for err in errors {
            assert!(message_for(flag_for_error(&err)).is_some(), "{err}");
        }
    }

    #[test]
    fn parse_and_upstream_messages_differ() {
        let parse = message_for(FLASH_PARSE_FAILED).expect("parse message");
        let upstream = message_for(FLASH_UPSTREAM_FAILED).expect("upstream message");
        assert_ne!(parse.text, upstream.text);
        assert!(message_for(0).is_none());
    }
}

//! Request field validation.
//!
//! Every field is checked and every problem reported at once. Accepted
//! values come back trimmed.

use super::config::{CreateConfigRequest, GameConfig};
use super::error::{Result, ServiceError};
use super::{ActionRequest, CreateStateRequest};

/// Check a create request: non-blank host, non-empty lists of non-blank
/// players and words.
pub fn validate_create_request(request: CreateStateRequest) -> Result<CreateStateRequest> {
    let mut errors = Vec::new();
    let host = not_blank(&request.host, "host", &mut errors);
    let players = non_empty_list(&request.players, "players", &mut errors);
    let words_to_guess = non_empty_list(&request.words_to_guess, "words_to_guess", &mut errors);

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }
    Ok(CreateStateRequest {
        host,
        players,
        words_to_guess,
    })
}

/// Check an action request: non-blank player id. The payload is shaped
/// later, against the action kind.
pub fn validate_action_request(request: ActionRequest) -> Result<ActionRequest> {
    let mut errors = Vec::new();
    let player_id = not_blank(&request.player_id, "player_id", &mut errors);

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }
    Ok(ActionRequest {
        player_id,
        ..request
    })
}

/// Check a new config addressed by `game_id`: non-blank id, host and
/// language, non-empty list of non-blank word packs.
pub fn validate_create_config_request(
    game_id: &str,
    request: CreateConfigRequest,
) -> Result<GameConfig> {
    validate_game_config(GameConfig {
        game_id: game_id.to_string(),
        host: request.host,
        language_id: request.language_id,
        word_pack_names: request.word_pack_names,
    })
}

/// Check a full config body, as sent on update.
pub fn validate_game_config(config: GameConfig) -> Result<GameConfig> {
    let mut errors = Vec::new();
    let game_id = not_blank(&config.game_id, "game_id", &mut errors);
    let host = not_blank(&config.host, "host", &mut errors);
    let language_id = not_blank(&config.language_id, "language_id", &mut errors);
    let word_pack_names = non_empty_list(&config.word_pack_names, "word_pack_names", &mut errors);

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }
    Ok(GameConfig {
        game_id,
        host,
        language_id,
        word_pack_names,
    })
}

fn not_blank(value: &str, field: &str, errors: &mut Vec<String>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(format!("{field}='{value}' is blank while it should be defined"));
    }
    trimmed.to_string()
}

fn non_empty_list(values: &[String], field: &str, errors: &mut Vec<String>) -> Vec<String> {
    if values.is_empty() {
        errors.push(format!("{field}=[] is an empty-list while it should be non-empty"));
        return Vec::new();
    }
    let mut trimmed = Vec::with_capacity(values.len());
    for value in values {
        let element = value.trim();
        if element.is_empty() {
            errors.push(format!("element='{value}' of {field} is blank while it should be defined"));
        } else {
            trimmed.push(element.to_string());
        }
    }
    trimmed
}

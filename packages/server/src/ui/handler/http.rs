//! HTTP API endpoint handlers.
//!
//! Handlers convert raw request data into domain values, run one usecase,
//! and map the outcome to a status code. Validation failures are reported
//! before any usecase touches the store.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::{MessageLimit, MessageText, MessageType, ParticipantName, Recipient},
    infrastructure::dto::http::{
        DebugStateDto, ListMessagesQuery, MessageDto, ParticipantDto, PostMessageRequest,
        RegisterParticipantRequest,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{
        HeartbeatUseCase, ListMessagesUseCase, ListParticipantsUseCase,
        RegisterParticipantUseCase, SendMessageUseCase,
    },
};

/// Header carrying the acting participant's name
pub const USER_HEADER: &str = "user";

/// Read the `user` header. Values that are not valid UTF-8 count as absent.
fn user_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|value| String::from_utf8(value.as_bytes().to_vec()).ok())
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /participants`
pub async fn register_participant(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterParticipantRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    let name = ParticipantName::try_from(request.name.unwrap_or_default())?;

    let usecase =
        RegisterParticipantUseCase::new(state.participants.clone(), state.messages.clone());
    match usecase.execute(name).await {
        Ok(participant) => {
            tracing::info!("Participant '{}' joined", participant.name);
            Ok(StatusCode::CREATED)
        }
        Err(e) => {
            tracing::warn!("Registration rejected: {}", e);
            Err(e.into())
        }
    }
}

/// `GET /participants`
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ParticipantDto>>, ApiError> {
    let usecase = ListParticipantsUseCase::new(state.participants.clone());
    let participants = usecase.execute().await?;
    Ok(Json(participants.into_iter().map(ParticipantDto::from).collect()))
}

/// `POST /messages`
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<PostMessageRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;

    let to = Recipient::parse(request.to.unwrap_or_default())?;
    let text = MessageText::new(request.text.unwrap_or_default())?;
    let kind = MessageType::parse_user_supplied(request.kind.as_deref().unwrap_or_default())?;

    // An absent or malformed sender can never be a registered participant.
    let from = user_header(&headers)
        .and_then(|user| ParticipantName::try_from(user).ok())
        .ok_or_else(|| {
            ApiError::unprocessable("user header must name a registered participant")
        })?;

    let usecase = SendMessageUseCase::new(state.participants.clone(), state.messages.clone());
    match usecase.execute(from, to, text, kind).await {
        Ok(_) => Ok(StatusCode::CREATED),
        Err(e) => {
            tracing::warn!("Message rejected: {}", e);
            Err(e.into())
        }
    }
}

/// `GET /messages?limit=N`
///
/// Without a usable `user` header only public messages are returned.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<ListMessagesQuery>, QueryRejection>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let Query(query) = query?;
    let limit = query
        .limit
        .as_deref()
        .map(MessageLimit::parse)
        .transpose()?;
    let viewer = user_header(&headers).and_then(|user| ParticipantName::try_from(user).ok());

    let usecase = ListMessagesUseCase::new(state.messages.clone());
    let messages = usecase.execute(viewer, limit).await?;
    Ok(Json(messages.into_iter().map(MessageDto::from).collect()))
}

/// `POST /status`
pub async fn heartbeat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let name = user_header(&headers)
        .and_then(|user| ParticipantName::try_from(user).ok())
        .ok_or_else(|| {
            ApiError::not_found("user header must name a registered participant")
        })?;

    let usecase = HeartbeatUseCase::new(state.participants.clone());
    usecase.execute(&name).await?;
    Ok(StatusCode::OK)
}

/// Debug endpoint to get the unfiltered room state (for testing purposes)
pub async fn debug_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DebugStateDto>, ApiError> {
    let participants = state.participants.find_all().await?;
    let messages = state.messages.find_all().await?;
    Ok(Json(DebugStateDto {
        participants: participants.into_iter().map(ParticipantDto::from).collect(),
        messages: messages.into_iter().map(MessageDto::from).collect(),
    }))
}

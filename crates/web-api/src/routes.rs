use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use application::services::{
    AuthenticateRequest, ChangeRoleRequest, CreateChatRequest, CreateNotificationRequest,
    EditMessageRequest, JoinChatRequest, RegisterUserRequest, RemoveMembershipRequest,
    RenameChatRequest, SendMessageRequest, UpdateMailRequest, UpdateNotificationRequest,
    UpdatePasswordRequest, UpdateUserRequest,
};
use application::{ChatDto, MembershipDto, MessageDto, NotificationDto, UserDto};
use domain::{
    ChatId, ChatRole, MessageId, NotificationId, NotificationKind, NotificationStatus, UserId,
};

use crate::auth::LoginResponse;
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    nickname: String,
    mail_address: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    mail_address: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct UpdateUserPayload {
    nickname: Option<String>,
    is_banned: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct UpdateMailPayload {
    mail_address: String,
    current_password: String,
}

#[derive(Debug, Deserialize)]
struct UpdatePasswordPayload {
    new_password: String,
    current_password: String,
}

#[derive(Debug, Deserialize)]
struct CreateChatPayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RenameChatPayload {
    name: String,
}

#[derive(Debug, Deserialize)]
struct JoinChatPayload {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct ChangeRolePayload {
    role: ChatRole,
}

#[derive(Debug, Deserialize)]
struct SendMessagePayload {
    content: String,
}

#[derive(Debug, Deserialize)]
struct EditMessagePayload {
    content: String,
}

#[derive(Debug, Deserialize)]
struct CreateNotificationPayload {
    user_id: Uuid,
    content: String,
    kind: NotificationKind,
}

#[derive(Debug, Deserialize)]
struct UpdateNotificationPayload {
    content: Option<String>,
    status: Option<NotificationStatus>,
}

#[derive(Debug, Deserialize)]
struct NotificationQuery {
    kind: Option<NotificationKind>,
    status: Option<NotificationStatus>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_user))
        .route("/auth/login", post(login_user))
        .route("/users", get(list_users))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(remove_user),
        )
        .route("/users/{user_id}/mail", post(update_user_mail))
        .route("/users/{user_id}/password", post(update_user_password))
        .route("/users/{user_id}/chats", get(list_chats_of_user))
        .route("/users/{user_id}/messages", get(list_messages_of_user))
        .route(
            "/users/{user_id}/notifications",
            get(list_notifications_of_user),
        )
        .route("/chats", post(create_chat).get(list_chats))
        .route(
            "/chats/{chat_id}",
            get(get_chat).put(rename_chat).delete(remove_chat),
        )
        .route(
            "/chats/{chat_id}/members",
            post(join_chat).get(list_chat_members),
        )
        .route("/chats/{chat_id}/users", get(list_chat_users))
        .route(
            "/chats/{chat_id}/members/{user_id}",
            get(get_membership).delete(remove_chat_member),
        )
        .route(
            "/chats/{chat_id}/members/{user_id}/role",
            post(change_member_role),
        )
        .route(
            "/chats/{chat_id}/messages",
            post(send_message).get(list_chat_messages),
        )
        .route(
            "/messages/{message_id}",
            get(get_message).put(edit_message).delete(remove_message),
        )
        .route("/notifications", post(create_notification))
        .route(
            "/notifications/{notification_id}",
            get(get_notification)
                .put(update_notification)
                .delete(remove_notification),
        )
        .route(
            "/notifications/{notification_id}/read",
            post(mark_notification_read),
        )
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let dto = state
        .user_service
        .register(RegisterUserRequest {
            nickname: payload.nickname,
            mail_address: payload.mail_address,
            password: payload.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(dto)))
}

async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(AuthenticateRequest {
            mail_address: payload.mail_address,
            password: payload.password,
        })
        .await?;
    let token = state.jwt_service.issue(&user)?;

    Ok(Json(LoginResponse { user, token }))
}

async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let users = state.user_service.list_all(requestor).await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let user = state
        .user_service
        .get(requestor, UserId::from(user_id))
        .await?;
    Ok(Json(user))
}

async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<UserDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let user = state
        .user_service
        .update(
            requestor,
            UserId::from(user_id),
            UpdateUserRequest {
                nickname: payload.nickname,
                is_banned: payload.is_banned,
            },
        )
        .await?;
    Ok(Json(user))
}

async fn update_user_mail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateMailPayload>,
) -> Result<Json<UserDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let user = state
        .user_service
        .update_mail(
            requestor,
            UserId::from(user_id),
            UpdateMailRequest {
                mail_address: payload.mail_address,
                current_password: payload.current_password,
            },
        )
        .await?;
    Ok(Json(user))
}

async fn update_user_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdatePasswordPayload>,
) -> Result<Json<UserDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let user = state
        .user_service
        .update_password(
            requestor,
            UserId::from(user_id),
            UpdatePasswordRequest {
                new_password: payload.new_password,
                current_password: payload.current_password,
            },
        )
        .await?;
    Ok(Json(user))
}

async fn remove_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    state
        .user_service
        .remove(requestor, UserId::from(user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_chats_of_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ChatDto>>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let chats = state
        .membership_service
        .list_chats_of_user(requestor, UserId::from(user_id))
        .await?;
    Ok(Json(chats))
}

async fn list_messages_of_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let messages = state
        .message_service
        .list_by_user(requestor, UserId::from(user_id))
        .await?;
    Ok(Json(messages))
}

async fn list_notifications_of_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<Uuid>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<NotificationDto>>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let user_id = UserId::from(user_id);
    let notifications = match (query.kind, query.status) {
        (Some(kind), None) => {
            state
                .notification_service
                .list_by_user_and_kind(requestor, user_id, kind)
                .await?
        }
        (None, Some(status)) => {
            state
                .notification_service
                .list_by_user_and_status(requestor, user_id, status)
                .await?
        }
        (None, None) => {
            state
                .notification_service
                .list_by_user(requestor, user_id)
                .await?
        }
        (Some(_), Some(_)) => {
            return Err(ApiError::bad_request(
                "kind and status filters cannot be combined",
            ))
        }
    };
    Ok(Json(notifications))
}

async fn create_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateChatPayload>,
) -> Result<(StatusCode, Json<ChatDto>), ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let chat = state
        .chat_service
        .create(requestor, CreateChatRequest { name: payload.name })
        .await?;
    Ok((StatusCode::CREATED, Json(chat)))
}

async fn list_chats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ChatDto>>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let chats = state.chat_service.list_all(requestor).await?;
    Ok(Json(chats))
}

async fn get_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<ChatDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let chat = state
        .chat_service
        .get(requestor, ChatId::from(chat_id))
        .await?;
    Ok(Json(chat))
}

async fn rename_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<Uuid>,
    Json(payload): Json<RenameChatPayload>,
) -> Result<Json<ChatDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let chat = state
        .chat_service
        .rename(
            requestor,
            RenameChatRequest {
                chat_id: ChatId::from(chat_id),
                name: payload.name,
            },
        )
        .await?;
    Ok(Json(chat))
}

async fn remove_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    state
        .chat_service
        .remove(requestor, ChatId::from(chat_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn join_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<Uuid>,
    Json(payload): Json<JoinChatPayload>,
) -> Result<(StatusCode, Json<MembershipDto>), ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let membership = state
        .membership_service
        .join(
            requestor,
            JoinChatRequest {
                user_id: UserId::from(payload.user_id),
                chat_id: ChatId::from(chat_id),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

async fn list_chat_members(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<Vec<MembershipDto>>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let members = state
        .membership_service
        .list_members_of_chat(requestor, ChatId::from(chat_id))
        .await?;
    Ok(Json(members))
}

async fn list_chat_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let users = state
        .membership_service
        .list_users_in_chat(requestor, ChatId::from(chat_id))
        .await?;
    Ok(Json(users))
}

async fn get_membership(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((chat_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MembershipDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let membership = state
        .membership_service
        .get(requestor, UserId::from(user_id), ChatId::from(chat_id))
        .await?;
    Ok(Json(membership))
}

async fn remove_chat_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((chat_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    state
        .membership_service
        .remove(
            requestor,
            RemoveMembershipRequest {
                user_id: UserId::from(user_id),
                chat_id: ChatId::from(chat_id),
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn change_member_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((chat_id, user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ChangeRolePayload>,
) -> Result<Json<MembershipDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let membership = state
        .membership_service
        .change_role(
            requestor,
            ChangeRoleRequest {
                user_id: UserId::from(user_id),
                chat_id: ChatId::from(chat_id),
                role: payload.role,
            },
        )
        .await?;
    Ok(Json(membership))
}

async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<Uuid>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<(StatusCode, Json<MessageDto>), ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let message = state
        .message_service
        .send(
            requestor,
            SendMessageRequest {
                chat_id: ChatId::from(chat_id),
                content: payload.content,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}

async fn list_chat_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let messages = state
        .message_service
        .list_by_chat(requestor, ChatId::from(chat_id))
        .await?;
    Ok(Json(messages))
}

async fn get_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<Uuid>,
) -> Result<Json<MessageDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let message = state
        .message_service
        .get(requestor, MessageId::from(message_id))
        .await?;
    Ok(Json(message))
}

async fn edit_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<Uuid>,
    Json(payload): Json<EditMessagePayload>,
) -> Result<Json<MessageDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let message = state
        .message_service
        .update(
            requestor,
            EditMessageRequest {
                message_id: MessageId::from(message_id),
                content: payload.content,
            },
        )
        .await?;
    Ok(Json(message))
}

async fn remove_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    state
        .message_service
        .remove(requestor, MessageId::from(message_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateNotificationPayload>,
) -> Result<(StatusCode, Json<NotificationDto>), ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let notification = state
        .notification_service
        .create(
            requestor,
            CreateNotificationRequest {
                user_id: UserId::from(payload.user_id),
                content: payload.content,
                kind: payload.kind,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

async fn get_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<NotificationDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let notification = state
        .notification_service
        .get(requestor, NotificationId::from(notification_id))
        .await?;
    Ok(Json(notification))
}

async fn update_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<Uuid>,
    Json(payload): Json<UpdateNotificationPayload>,
) -> Result<Json<NotificationDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let notification = state
        .notification_service
        .update(
            requestor,
            UpdateNotificationRequest {
                notification_id: NotificationId::from(notification_id),
                content: payload.content,
                status: payload.status,
            },
        )
        .await?;
    Ok(Json(notification))
}

async fn mark_notification_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<NotificationDto>, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    let notification = state
        .notification_service
        .mark_read(requestor, NotificationId::from(notification_id))
        .await?;
    Ok(Json(notification))
}

async fn remove_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let requestor = state.jwt_service.requestor_from_headers(&headers)?;
    state
        .notification_service
        .remove(requestor, NotificationId::from(notification_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

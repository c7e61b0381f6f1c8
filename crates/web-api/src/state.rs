use std::sync::Arc;

use application::{
    ChatService, MembershipService, MessageService, NotificationService, UserService,
};

use crate::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub chat_service: Arc<ChatService>,
    pub membership_service: Arc<MembershipService>,
    pub message_service: Arc<MessageService>,
    pub notification_service: Arc<NotificationService>,
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        chat_service: Arc<ChatService>,
        membership_service: Arc<MembershipService>,
        message_service: Arc<MessageService>,
        notification_service: Arc<NotificationService>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_service,
            chat_service,
            membership_service,
            message_service,
            notification_service,
            jwt_service,
        }
    }
}

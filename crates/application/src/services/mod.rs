mod chat_service;
mod membership_service;
mod message_service;
mod notification_service;
mod user_service;

pub use chat_service::{
    ChatService, ChatServiceDependencies, CreateChatRequest, RenameChatRequest,
};
pub use membership_service::{
    ChangeRoleRequest, JoinChatRequest, MembershipService, MembershipServiceDependencies,
    RemoveMembershipRequest,
};
pub use message_service::{
    EditMessageRequest, MessageService, MessageServiceDependencies, SendMessageRequest,
};
pub use notification_service::{
    CreateNotificationRequest, NotificationService, NotificationServiceDependencies,
    UpdateNotificationRequest,
};
pub use user_service::{
    AuthenticateRequest, RegisterUserRequest, UpdateMailRequest, UpdatePasswordRequest,
    UpdateUserRequest, UserService, UserServiceDependencies,
};

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod membership_service_tests;
#[cfg(test)]
mod message_service_tests;
#[cfg(test)]
mod notification_service_tests;

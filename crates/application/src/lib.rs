//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务，处理输入校验、授权判定、
//! 以及对外部适配器（例如密码哈希、系统时钟）的抽象。
//! 请求者身份总是以显式参数传入，服务自身无任何可变共享状态。

pub mod clock;
pub mod dto;
pub mod errors;
pub mod password;
pub mod repository;
pub mod services;

pub use clock::{Clock, SystemClock};
pub use dto::{ChatDto, MembershipDto, MessageDto, NotificationDto, UserDto};
pub use errors::{ApplicationError, ApplicationResult};
pub use password::{PasswordHasher, PasswordHasherError};
pub use repository::{
    ChatRepository, MembershipRepository, MessageRepository, NotificationRepository,
    UserRepository,
};
pub use services::{
    ChatService, ChatServiceDependencies, MembershipService, MembershipServiceDependencies,
    MessageService, MessageServiceDependencies, NotificationService,
    NotificationServiceDependencies, UserService, UserServiceDependencies,
};

//! 主应用程序入口
//!
//! 启动 Axum Web API 服务。

use std::sync::Arc;

use application::services::{
    ChatService, ChatServiceDependencies, MembershipService, MembershipServiceDependencies,
    MessageService, MessageServiceDependencies, NotificationService,
    NotificationServiceDependencies, UserService, UserServiceDependencies,
};
use application::{Clock, PasswordHasher, SystemClock};
use config::AppConfig;
use infrastructure::{
    create_pg_pool, BcryptPasswordHasher, PgChatRepository, PgMembershipRepository,
    PgMessageRepository, PgNotificationRepository, PgUserRepository,
};
use tracing_subscriber::EnvFilter;
use web_api::{router, AppState, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env_with_defaults();

    let pg_pool = create_pg_pool(&config.database.url, config.database.max_connections).await?;

    // 运行迁移
    sqlx::migrate!("../../migrations").run(&pg_pool).await?;

    let user_repository = Arc::new(PgUserRepository::new(pg_pool.clone()));
    let chat_repository = Arc::new(PgChatRepository::new(pg_pool.clone()));
    let membership_repository = Arc::new(PgMembershipRepository::new(pg_pool.clone()));
    let message_repository = Arc::new(PgMessageRepository::new(pg_pool.clone()));
    let notification_repository = Arc::new(PgNotificationRepository::new(pg_pool));

    let password_hasher: Arc<dyn PasswordHasher> =
        Arc::new(BcryptPasswordHasher::new(config.server.bcrypt_cost));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let user_service = UserService::new(UserServiceDependencies {
        user_repository: user_repository.clone(),
        password_hasher,
        clock: clock.clone(),
    });

    let chat_service = ChatService::new(ChatServiceDependencies {
        user_repository: user_repository.clone(),
        chat_repository: chat_repository.clone(),
        membership_repository: membership_repository.clone(),
        clock: clock.clone(),
    });

    let membership_service = MembershipService::new(MembershipServiceDependencies {
        user_repository: user_repository.clone(),
        chat_repository: chat_repository.clone(),
        membership_repository: membership_repository.clone(),
        clock: clock.clone(),
    });

    let message_service = MessageService::new(MessageServiceDependencies {
        user_repository: user_repository.clone(),
        chat_repository,
        membership_repository,
        message_repository,
        clock,
    });

    let notification_service = NotificationService::new(NotificationServiceDependencies {
        user_repository,
        notification_repository,
    });

    let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

    let state = AppState::new(
        Arc::new(user_service),
        Arc::new(chat_service),
        Arc::new(membership_service),
        Arc::new(message_service),
        Arc::new(notification_service),
        jwt_service,
    );

    let app = router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("聊天服务器启动在 http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

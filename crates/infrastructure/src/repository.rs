//! PostgreSQL 仓储实现。
//!
//! 枚举列以 TEXT 存储，读取时显式解析；未知取值按存储层
//! 数据损坏处理。删除语句依据受影响行数区分 NotFound。

use application::{
    ChatRepository, MembershipRepository, MessageRepository, NotificationRepository,
    UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    Chat, ChatId, ChatRole, MailAddress, Membership, Message, MessageId, Nickname, Notification,
    NotificationId, NotificationKind, NotificationStatus, PasswordHash, RepositoryError, User,
    UserId, UserRole,
};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use uuid::Uuid;

pub async fn create_pg_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict;
        }
    }
    RepositoryError::storage(err.to_string())
}

fn invalid_data(message: impl Into<String>) -> RepositoryError {
    RepositoryError::storage(message)
}

fn user_role_to_str(role: UserRole) -> &'static str {
    match role {
        UserRole::Regular => "regular",
        UserRole::Administrator => "administrator",
    }
}

fn parse_user_role(value: &str) -> Result<UserRole, RepositoryError> {
    match value {
        "regular" => Ok(UserRole::Regular),
        "administrator" => Ok(UserRole::Administrator),
        other => Err(invalid_data(format!("unknown user role: {other}"))),
    }
}

fn chat_role_to_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::Regular => "regular",
        ChatRole::Moderator => "moderator",
    }
}

fn parse_chat_role(value: &str) -> Result<ChatRole, RepositoryError> {
    match value {
        "regular" => Ok(ChatRole::Regular),
        "moderator" => Ok(ChatRole::Moderator),
        other => Err(invalid_data(format!("unknown chat role: {other}"))),
    }
}

fn notification_kind_to_str(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Message => "message",
        NotificationKind::Invite => "invite",
        NotificationKind::Alert => "alert",
    }
}

fn parse_notification_kind(value: &str) -> Result<NotificationKind, RepositoryError> {
    match value {
        "message" => Ok(NotificationKind::Message),
        "invite" => Ok(NotificationKind::Invite),
        "alert" => Ok(NotificationKind::Alert),
        other => Err(invalid_data(format!("unknown notification kind: {other}"))),
    }
}

fn notification_status_to_str(status: NotificationStatus) -> &'static str {
    match status {
        NotificationStatus::Unread => "unread",
        NotificationStatus::Read => "read",
        NotificationStatus::Archived => "archived",
    }
}

fn parse_notification_status(value: &str) -> Result<NotificationStatus, RepositoryError> {
    match value {
        "unread" => Ok(NotificationStatus::Unread),
        "read" => Ok(NotificationStatus::Read),
        "archived" => Ok(NotificationStatus::Archived),
        other => Err(invalid_data(format!("unknown notification status: {other}"))),
    }
}

#[derive(Debug, FromRow)]
struct UserRecord {
    id: Uuid,
    nickname: String,
    mail_address: String,
    password_hash: String,
    join_date: DateTime<Utc>,
    is_banned: bool,
    role: String,
}

impl TryFrom<UserRecord> for User {
    type Error = RepositoryError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        let nickname =
            Nickname::parse(value.nickname).map_err(|err| invalid_data(err.to_string()))?;
        let mail_address =
            MailAddress::parse(value.mail_address).map_err(|err| invalid_data(err.to_string()))?;
        let password = PasswordHash::new(value.password_hash)
            .map_err(|err| invalid_data(err.to_string()))?;

        Ok(User {
            id: UserId::from(value.id),
            nickname,
            mail_address,
            password,
            join_date: value.join_date,
            is_banned: value.is_banned,
            role: parse_user_role(&value.role)?,
        })
    }
}

#[derive(Debug, FromRow)]
struct ChatRecord {
    id: Uuid,
    name: String,
}

impl TryFrom<ChatRecord> for Chat {
    type Error = RepositoryError;

    fn try_from(value: ChatRecord) -> Result<Self, Self::Error> {
        Chat::new(ChatId::from(value.id), value.name)
            .map_err(|err| invalid_data(err.to_string()))
    }
}

#[derive(Debug, FromRow)]
struct MembershipRecord {
    user_id: Uuid,
    chat_id: Uuid,
    role: String,
    joined_at: DateTime<Utc>,
}

impl TryFrom<MembershipRecord> for Membership {
    type Error = RepositoryError;

    fn try_from(value: MembershipRecord) -> Result<Self, Self::Error> {
        Ok(Membership::new(
            UserId::from(value.user_id),
            ChatId::from(value.chat_id),
            parse_chat_role(&value.role)?,
            value.joined_at,
        ))
    }
}

#[derive(Debug, FromRow)]
struct MessageRecord {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    user_id: Uuid,
    chat_id: Uuid,
}

impl TryFrom<MessageRecord> for Message {
    type Error = RepositoryError;

    fn try_from(value: MessageRecord) -> Result<Self, Self::Error> {
        Message::new(
            MessageId::from(value.id),
            UserId::from(value.user_id),
            ChatId::from(value.chat_id),
            value.content,
            value.created_at,
        )
        .map_err(|err| invalid_data(err.to_string()))
    }
}

#[derive(Debug, FromRow)]
struct NotificationRecord {
    id: Uuid,
    content: String,
    kind: String,
    status: String,
    user_id: Uuid,
}

impl TryFrom<NotificationRecord> for Notification {
    type Error = RepositoryError;

    fn try_from(value: NotificationRecord) -> Result<Self, Self::Error> {
        let mut notification = Notification::new(
            NotificationId::from(value.id),
            UserId::from(value.user_id),
            value.content,
            parse_notification_kind(&value.kind)?,
        );
        notification.status = parse_notification_status(&value.status)?;
        Ok(notification)
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, nickname, mail_address, password_hash, join_date, is_banned, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, nickname, mail_address, password_hash, join_date, is_banned, role
            "#,
        )
        .bind(Uuid::from(user.id))
        .bind(user.nickname.as_str())
        .bind(user.mail_address.as_str())
        .bind(user.password.as_str())
        .bind(user.join_date)
        .bind(user.is_banned)
        .bind(user_role_to_str(user.role))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        User::try_from(record)
    }

    async fn update(&self, user: User) -> Result<User, RepositoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET nickname = $2, mail_address = $3, password_hash = $4, is_banned = $5, role = $6
            WHERE id = $1
            RETURNING id, nickname, mail_address, password_hash, join_date, is_banned, role
            "#,
        )
        .bind(Uuid::from(user.id))
        .bind(user.nickname.as_str())
        .bind(user.mail_address.as_str())
        .bind(user.password.as_str())
        .bind(user.is_banned)
        .bind(user_role_to_str(user.role))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        User::try_from(record)
    }

    async fn get_by_id(&self, id: UserId) -> Result<User, RepositoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, nickname, mail_address, password_hash, join_date, is_banned, role FROM users WHERE id = $1"#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        User::try_from(record)
    }

    async fn find_by_mail(&self, mail: &MailAddress) -> Result<Option<User>, RepositoryError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, nickname, mail_address, password_hash, join_date, is_banned, role FROM users WHERE mail_address = $1"#,
        )
        .bind(mail.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        record.map(User::try_from).transpose()
    }

    async fn exists(&self, id: UserId) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)"#)
                .bind(Uuid::from(id))
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        Ok(exists)
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let records = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, nickname, mail_address, password_hash, join_date, is_banned, role FROM users ORDER BY join_date"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(User::try_from).collect()
    }

    async fn remove(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    async fn create_with_moderator(
        &self,
        chat: Chat,
        moderator: Membership,
    ) -> Result<Chat, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        let record = sqlx::query_as::<_, ChatRecord>(
            r#"INSERT INTO chats (id, name) VALUES ($1, $2) RETURNING id, name"#,
        )
        .bind(Uuid::from(chat.id))
        .bind(&chat.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        sqlx::query(
            r#"INSERT INTO user_chats (user_id, chat_id, role, joined_at) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(Uuid::from(moderator.user_id))
        .bind(Uuid::from(moderator.chat_id))
        .bind(chat_role_to_str(moderator.role))
        .bind(moderator.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;
        Chat::try_from(record)
    }

    async fn update(&self, chat: Chat) -> Result<Chat, RepositoryError> {
        let record = sqlx::query_as::<_, ChatRecord>(
            r#"UPDATE chats SET name = $2 WHERE id = $1 RETURNING id, name"#,
        )
        .bind(Uuid::from(chat.id))
        .bind(&chat.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        Chat::try_from(record)
    }

    async fn get_by_id(&self, id: ChatId) -> Result<Chat, RepositoryError> {
        let record =
            sqlx::query_as::<_, ChatRecord>(r#"SELECT id, name FROM chats WHERE id = $1"#)
                .bind(Uuid::from(id))
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_err)?
                .ok_or(RepositoryError::NotFound)?;

        Chat::try_from(record)
    }

    async fn list(&self) -> Result<Vec<Chat>, RepositoryError> {
        let records =
            sqlx::query_as::<_, ChatRecord>(r#"SELECT id, name FROM chats ORDER BY name"#)
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_err)?;

        records.into_iter().map(Chat::try_from).collect()
    }

    async fn remove(&self, id: ChatId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    async fn add(&self, membership: Membership) -> Result<Membership, RepositoryError> {
        let record = sqlx::query_as::<_, MembershipRecord>(
            r#"
            INSERT INTO user_chats (user_id, chat_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, chat_id, role, joined_at
            "#,
        )
        .bind(Uuid::from(membership.user_id))
        .bind(Uuid::from(membership.chat_id))
        .bind(chat_role_to_str(membership.role))
        .bind(membership.joined_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Membership::try_from(record)
    }

    async fn get(&self, user_id: UserId, chat_id: ChatId) -> Result<Membership, RepositoryError> {
        let record = sqlx::query_as::<_, MembershipRecord>(
            r#"SELECT user_id, chat_id, role, joined_at FROM user_chats WHERE user_id = $1 AND chat_id = $2"#,
        )
        .bind(Uuid::from(user_id))
        .bind(Uuid::from(chat_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        Membership::try_from(record)
    }

    async fn find(
        &self,
        user_id: UserId,
        chat_id: ChatId,
    ) -> Result<Option<Membership>, RepositoryError> {
        let record = sqlx::query_as::<_, MembershipRecord>(
            r#"SELECT user_id, chat_id, role, joined_at FROM user_chats WHERE user_id = $1 AND chat_id = $2"#,
        )
        .bind(Uuid::from(user_id))
        .bind(Uuid::from(chat_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        record.map(Membership::try_from).transpose()
    }

    async fn is_member(&self, user_id: UserId, chat_id: ChatId) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM user_chats WHERE user_id = $1 AND chat_id = $2)"#,
        )
        .bind(Uuid::from(user_id))
        .bind(Uuid::from(chat_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(exists)
    }

    async fn update_role(
        &self,
        user_id: UserId,
        chat_id: ChatId,
        role: ChatRole,
    ) -> Result<Membership, RepositoryError> {
        let record = sqlx::query_as::<_, MembershipRecord>(
            r#"
            UPDATE user_chats SET role = $3
            WHERE user_id = $1 AND chat_id = $2
            RETURNING user_id, chat_id, role, joined_at
            "#,
        )
        .bind(Uuid::from(user_id))
        .bind(Uuid::from(chat_id))
        .bind(chat_role_to_str(role))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        Membership::try_from(record)
    }

    async fn remove(&self, user_id: UserId, chat_id: ChatId) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("DELETE FROM user_chats WHERE user_id = $1 AND chat_id = $2")
                .bind(Uuid::from(user_id))
                .bind(Uuid::from(chat_id))
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_err)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn list_members_of_chat(
        &self,
        chat_id: ChatId,
    ) -> Result<Vec<Membership>, RepositoryError> {
        let records = sqlx::query_as::<_, MembershipRecord>(
            r#"SELECT user_id, chat_id, role, joined_at FROM user_chats WHERE chat_id = $1 ORDER BY joined_at"#,
        )
        .bind(Uuid::from(chat_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(Membership::try_from).collect()
    }

    async fn list_users_in_chat(&self, chat_id: ChatId) -> Result<Vec<User>, RepositoryError> {
        let records = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT u.id, u.nickname, u.mail_address, u.password_hash, u.join_date, u.is_banned, u.role
            FROM users u
            JOIN user_chats uc ON uc.user_id = u.id
            WHERE uc.chat_id = $1
            ORDER BY uc.joined_at
            "#,
        )
        .bind(Uuid::from(chat_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(User::try_from).collect()
    }

    async fn list_chats_of_user(&self, user_id: UserId) -> Result<Vec<Chat>, RepositoryError> {
        let records = sqlx::query_as::<_, ChatRecord>(
            r#"
            SELECT c.id, c.name
            FROM chats c
            JOIN user_chats uc ON uc.chat_id = c.id
            WHERE uc.user_id = $1
            ORDER BY uc.joined_at
            "#,
        )
        .bind(Uuid::from(user_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(Chat::try_from).collect()
    }
}

#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, RepositoryError> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (id, content, created_at, user_id, chat_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, content, created_at, user_id, chat_id
            "#,
        )
        .bind(Uuid::from(message.id))
        .bind(&message.content)
        .bind(message.timestamp)
        .bind(Uuid::from(message.user_id))
        .bind(Uuid::from(message.chat_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Message::try_from(record)
    }

    async fn update(&self, message: Message) -> Result<Message, RepositoryError> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            UPDATE messages SET content = $2
            WHERE id = $1
            RETURNING id, content, created_at, user_id, chat_id
            "#,
        )
        .bind(Uuid::from(message.id))
        .bind(&message.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        Message::try_from(record)
    }

    async fn get_by_id(&self, id: MessageId) -> Result<Message, RepositoryError> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"SELECT id, content, created_at, user_id, chat_id FROM messages WHERE id = $1"#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        Message::try_from(record)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Message>, RepositoryError> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r#"SELECT id, content, created_at, user_id, chat_id FROM messages WHERE user_id = $1 ORDER BY created_at"#,
        )
        .bind(Uuid::from(user_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(Message::try_from).collect()
    }

    async fn list_by_chat(&self, chat_id: ChatId) -> Result<Vec<Message>, RepositoryError> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r#"SELECT id, content, created_at, user_id, chat_id FROM messages WHERE chat_id = $1 ORDER BY created_at"#,
        )
        .bind(Uuid::from(chat_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(Message::try_from).collect()
    }

    async fn remove(&self, id: MessageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        let record = sqlx::query_as::<_, NotificationRecord>(
            r#"
            INSERT INTO notifications (id, content, kind, status, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, content, kind, status, user_id
            "#,
        )
        .bind(Uuid::from(notification.id))
        .bind(&notification.content)
        .bind(notification_kind_to_str(notification.kind))
        .bind(notification_status_to_str(notification.status))
        .bind(Uuid::from(notification.user_id))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Notification::try_from(record)
    }

    async fn update(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        let record = sqlx::query_as::<_, NotificationRecord>(
            r#"
            UPDATE notifications SET content = $2, status = $3
            WHERE id = $1
            RETURNING id, content, kind, status, user_id
            "#,
        )
        .bind(Uuid::from(notification.id))
        .bind(&notification.content)
        .bind(notification_status_to_str(notification.status))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        Notification::try_from(record)
    }

    async fn get_by_id(&self, id: NotificationId) -> Result<Notification, RepositoryError> {
        let record = sqlx::query_as::<_, NotificationRecord>(
            r#"SELECT id, content, kind, status, user_id FROM notifications WHERE id = $1"#,
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or(RepositoryError::NotFound)?;

        Notification::try_from(record)
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError> {
        let records = sqlx::query_as::<_, NotificationRecord>(
            r#"SELECT id, content, kind, status, user_id FROM notifications WHERE user_id = $1"#,
        )
        .bind(Uuid::from(user_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(Notification::try_from).collect()
    }

    async fn list_by_user_and_kind(
        &self,
        user_id: UserId,
        kind: NotificationKind,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let records = sqlx::query_as::<_, NotificationRecord>(
            r#"SELECT id, content, kind, status, user_id FROM notifications WHERE user_id = $1 AND kind = $2"#,
        )
        .bind(Uuid::from(user_id))
        .bind(notification_kind_to_str(kind))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(Notification::try_from).collect()
    }

    async fn list_by_user_and_status(
        &self,
        user_id: UserId,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let records = sqlx::query_as::<_, NotificationRecord>(
            r#"SELECT id, content, kind, status, user_id FROM notifications WHERE user_id = $1 AND status = $2"#,
        )
        .bind(Uuid::from(user_id))
        .bind(notification_status_to_str(status))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        records.into_iter().map(Notification::try_from).collect()
    }

    async fn remove(&self, id: NotificationId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

use crate::cache::{MokaObjectCache, ObjectCache};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::NewUser;
use crate::object_store::{ObjectStore, create_object_store};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::initial_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub object_store: Arc<dyn ObjectStore>,
}

/// 初始化默认管理员账号
/// 如果数据库中没有任何用户，则创建一个 admin 账号；未提供密码时随机生成并打印到日志
pub async fn seed_admin(storage: &Arc<dyn Storage>, password: Option<String>) -> Result<Option<User>> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!("Database already has {} user(s), skipping admin seed", count);
        return Ok(None);
    }
    info!("No users found in database, creating default admin account...");

    let password = password.unwrap_or_else(|| {
        let pwd = initial_password();
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let admin = NewUser {
        username: "admin".to_string(),
        email: "admin@localhost.local".to_string(),
        password_hash: hash_password(&password)?,
        role: UserRole::Admin,
        display_name: Some("Administrator".to_string()),
    };

    let user = storage.create_user(admin).await?;
    info!(
        "Default admin account created successfully (ID: {}, username: {})",
        user.id, user.username
    );
    Ok(Some(user))
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和对象存储
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认管理员账号（如果需要），失败不影响启动
    if let Err(e) = seed_admin(&storage, std::env::var("ADMIN_PASSWORD").ok()).await {
        warn!("Failed to seed admin account: {}", e);
    }

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaObjectCache::new(&config.cache));
    warn!("Cache backend initialized");

    let object_store = create_object_store(&config.upload);
    warn!("Object store initialized at {}", config.upload.dir);

    Ok(StartupContext {
        storage,
        cache,
        object_store,
    })
}

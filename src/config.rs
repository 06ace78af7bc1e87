use dotenvy;

use crate::utils::thread_cache::DEFAULT_THREAD_CACHE_CAPACITY;

#[derive(Debug)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub jwt_secret: String,
    pub is_development: bool,
    pub port: u16,
    pub event_channel_capacity: usize,
    pub thread_cache_capacity: usize,
    pub sentry_project_link: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").unwrap_or("mem://".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").expect("Missing JWT_SECRET in env");

        let is_development = std::env::var("DEVELOPMENT")
            .map(|v| v.eq("true"))
            .unwrap_or(false);

        let port = std::env::var("PORT").map_or(8080, |p| {
            p.parse::<u16>().expect("PORT must be number")
        });

        let event_channel_capacity = std::env::var("EVENT_CHANNEL_CAPACITY").map_or(100, |c| {
            c.parse::<usize>()
                .expect("EVENT_CHANNEL_CAPACITY must be number")
        });

        let thread_cache_capacity = std::env::var("THREAD_CACHE_CAPACITY")
            .map_or(DEFAULT_THREAD_CACHE_CAPACITY, |c| {
                c.parse::<usize>()
                    .expect("THREAD_CACHE_CAPACITY must be number")
            });

        let sentry_project_link = std::env::var("SENTRY_PROJECT_LINK").ok();

        Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            jwt_secret,
            is_development,
            port,
            event_channel_capacity,
            thread_cache_capacity,
            sentry_project_link,
        }
    }
}

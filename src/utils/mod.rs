pub mod jwt;
pub mod thread_cache;

pub mod redis_dedup_cache;

pub mod redis_work_queue;

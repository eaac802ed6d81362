pub mod author;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod random;
pub mod soft_delete;
pub mod storage;
pub mod work_stats;

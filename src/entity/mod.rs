pub mod comment;
pub mod external_account;
pub mod like;
pub mod tag;
pub mod user;
pub mod work;
pub mod work_tag;

pub mod hash_password;
pub mod health;
pub mod init_db;

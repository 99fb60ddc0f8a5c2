pub mod address;
pub mod password_history;

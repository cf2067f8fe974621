pub mod id;
pub mod password;
pub mod time;
pub mod token;

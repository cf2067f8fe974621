pub mod auth;
pub mod fallback;
pub mod health;
pub mod review;
pub mod session;
pub mod university;

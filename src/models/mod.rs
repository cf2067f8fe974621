pub mod auth;
pub mod review;
pub mod university;
pub mod user;

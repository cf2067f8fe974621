pub mod review_store;
pub mod university_store;
pub mod user_store;

pub mod review;
pub mod signup;

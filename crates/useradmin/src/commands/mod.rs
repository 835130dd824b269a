pub mod browse;
pub mod users;

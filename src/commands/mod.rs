pub mod add;
pub mod config;
pub mod day;
pub mod edit;
pub mod export;
pub mod list;
pub mod month;
pub mod remove;
pub mod theme;

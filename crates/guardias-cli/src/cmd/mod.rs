pub mod add;
pub mod list;
pub mod month;
pub mod serve;

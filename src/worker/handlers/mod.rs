pub mod balance;
pub mod details;
pub mod greeting;
pub mod history;
pub mod receive;
pub mod spent;

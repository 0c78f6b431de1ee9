pub mod account;
pub mod contract;
pub mod footprint;
pub mod greeting;
pub mod ledger;
pub mod transaction;

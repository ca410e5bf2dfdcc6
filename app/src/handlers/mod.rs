pub mod catalog;
pub mod clients;
pub mod employees;
pub mod job_cards;
pub mod payment_balls;
pub mod rfqs;
pub mod sub_contracts;
pub mod tasks;
pub mod timesheets;

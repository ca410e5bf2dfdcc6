pub mod client;
pub mod employee;
pub mod job_card;
pub mod payment_ball;
pub mod payment_terms;
pub mod rfq;
pub mod status;
pub mod sub_contract;
pub mod task;
pub mod timesheet;

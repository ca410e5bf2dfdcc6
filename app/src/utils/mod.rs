pub mod crypto;
pub mod response;
pub mod serde_helpers;
pub mod validation;

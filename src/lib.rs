pub mod address;
pub mod allow_list;
pub mod config;
pub mod error;
pub mod form;
pub mod message;
pub mod notify;
pub mod signer;
pub mod submit;
pub mod wallet;

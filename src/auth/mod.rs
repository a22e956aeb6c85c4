pub mod credentials;
pub mod store;
pub mod token;

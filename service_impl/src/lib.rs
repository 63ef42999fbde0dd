pub mod account;
pub mod auto_deposit;
pub mod clock;
pub mod config;
pub mod deposit;
pub mod macros;
pub mod scheduler;
pub mod uuid_service;

#[cfg(test)]
mod test;

#[cfg(test)]
pub mod account;
#[cfg(test)]
pub mod error_test;

pub mod application;
pub mod commands;
pub mod domain;
pub mod infra;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

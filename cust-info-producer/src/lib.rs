//! Lambda function that produces batches of fake customer records for
//! exercising queue retry and dead-letter handling. About one record in ten
//! carries deliberately broken metadata.

pub mod attributes;
pub mod batch;
pub mod clock;
pub mod config;
pub mod error;
pub mod fault;
pub mod handler;
pub mod random;
pub mod record;
pub mod response;

#[cfg(test)]
pub(crate) mod testing;

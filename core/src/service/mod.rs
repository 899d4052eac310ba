pub mod day_service;
pub mod dto;

#[cfg(test)]
mod day_service_test;

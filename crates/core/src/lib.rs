mod assets;
mod provider;
#[cfg(test)]
mod test_utils;

pub mod config;
pub mod controller;
pub mod service;
pub mod transcript;
pub mod view;

pub use crate::assets::{get_config_dir, get_data_dir};
pub use crate::provider::get_answer_service;
pub use crate::provider::http::HttpAnswerService;

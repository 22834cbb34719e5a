pub mod enums;
pub mod entity;
pub mod events;
pub mod evidence;
pub mod transcript;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid {field} value: '{value}'")]
    InvalidEnum { field: String, value: String },
}

pub mod mappers;
pub mod usecases;
pub mod validators;

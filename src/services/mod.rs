pub mod normalization_service;
pub mod validation_service;

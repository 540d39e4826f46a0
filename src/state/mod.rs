/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The session state machine driving the user journey (controller.rs)

pub mod controller;
pub mod data;

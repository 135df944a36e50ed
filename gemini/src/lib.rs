//! Gemini generation client: fixed prompt, response schema and the
//! `generateContent` call that turns a topic into a [`deck_common::Presentation`].

pub mod client;
pub mod prompt;
pub mod schema;

pub use client::GeminiClient;
pub use schema::response_schema;

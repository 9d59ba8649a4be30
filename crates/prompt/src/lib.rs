//! Prompt construction for the tafsir assistant.

pub mod template;

pub use template::build_answer_prompt;

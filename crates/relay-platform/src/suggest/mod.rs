pub mod openai;

pub use openai::OpenAiSuggestionService;

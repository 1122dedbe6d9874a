pub mod haiku;

pub use haiku::build_haiku_prompt;

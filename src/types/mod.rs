pub mod haiku;

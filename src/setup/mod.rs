pub mod content_setup;

pub mod mirror;
pub mod paragraph;
pub mod website;

pub use mirror::MirrorSource;
pub use paragraph::ParagraphSource;
pub use website::WebsiteSource;

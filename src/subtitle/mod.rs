/*!
 * Subtitle file handling: timestamp codec, tag-template extraction, and the
 * SRT parser.
 */

pub mod parser;
pub mod template;
pub mod time;

pub use parser::SubtitleEntry;
pub use template::LineTemplate;

/// Formatter adapters for license output documents
mod plist_formatter;

pub use plist_formatter::PlistFormatter;

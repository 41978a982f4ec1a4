use owo_colors::{OwoColorize, Stream::Stderr};

pub fn error(message: &str) -> String {
	message.if_supports_color(Stderr, |v| v.red()).to_string()
}

pub fn warning(message: &str) -> String {
	message.if_supports_color(Stderr, |v| v.yellow()).to_string()
}

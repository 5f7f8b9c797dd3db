/// Errors that may occur while building a mount filter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid regular expression `{pattern}` for `--{option}`: {source}")]
    InvalidRegex {
        option: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

use std::error;
use std::fmt;

use minielf::{Class, Data};

/// Accepted class tokens and the class each one selects.
pub const CLASS_TOKENS: &[(&str, Class)] = &[("32", Class::Elf32), ("64", Class::Elf64)];

/// Accepted endianness tokens and the encoding each one selects.
pub const DATA_TOKENS: &[(&str, Data)] = &[("little", Data::Little), ("big", Data::Big)];

/// Optional overrides applied to the identification bytes of the header.
///
/// A `None` field preserves whatever the input declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub class: Option<Class>,
    pub data: Option<Data>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BadClass(String),
    BadData(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadClass(got) => {
                write!(f, "bad class, expected one of ")?;
                write_tokens(f, CLASS_TOKENS)?;
                write!(f, ", got {got}")
            }
            Self::BadData(got) => {
                write!(f, "bad endianness, expected one of ")?;
                write_tokens(f, DATA_TOKENS)?;
                write!(f, ", got {got}")
            }
        }
    }
}

impl error::Error for ConfigError {}

pub fn parse_class(token: &str) -> Result<Class, ConfigError> {
    lookup(CLASS_TOKENS, token).ok_or_else(|| ConfigError::BadClass(token.to_owned()))
}

pub fn parse_data(token: &str) -> Result<Data, ConfigError> {
    lookup(DATA_TOKENS, token).ok_or_else(|| ConfigError::BadData(token.to_owned()))
}

fn lookup<T: Copy>(table: &[(&str, T)], token: &str) -> Option<T> {
    table
        .iter()
        .find(|&&(name, _)| name == token)
        .map(|&(_, val)| val)
}

fn write_tokens<T>(f: &mut fmt::Formatter<'_>, table: &[(&str, T)]) -> fmt::Result {
    f.write_str("{")?;
    for (i, (name, _)) in table.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(name)?;
    }
    f.write_str("}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tokens() {
        assert_eq!(parse_class("32"), Ok(Class::Elf32));
        assert_eq!(parse_class("64"), Ok(Class::Elf64));
        assert_eq!(parse_data("little"), Ok(Data::Little));
        assert_eq!(parse_data("big"), Ok(Data::Big));
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert_eq!(parse_class("16"), Err(ConfigError::BadClass("16".into())));
        assert_eq!(parse_class("none"), Err(ConfigError::BadClass("none".into())));
        assert_eq!(parse_data("Big"), Err(ConfigError::BadData("Big".into())));
        assert_eq!(parse_data(""), Err(ConfigError::BadData("".into())));
    }

    #[test]
    fn error_messages_list_tokens() {
        assert_eq!(
            parse_class("128").unwrap_err().to_string(),
            "bad class, expected one of {32, 64}, got 128"
        );
        assert_eq!(
            parse_data("middle").unwrap_err().to_string(),
            "bad endianness, expected one of {little, big}, got middle"
        );
    }

    #[test]
    fn default_preserves_everything() {
        let config = Config::default();
        assert_eq!(config.class, None);
        assert_eq!(config.data, None);
    }
}

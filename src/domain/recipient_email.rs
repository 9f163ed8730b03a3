use std::sync::LazyLock;

use regex::Regex;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

#[derive(Debug)]
pub struct RecipientEmail(String);

impl RecipientEmail {
    /// Only checks the `text@text.text` shape, deliverability is not our concern.
    pub fn parse(s: &str) -> Result<RecipientEmail, String> {
        if EMAIL_SHAPE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(format!("{} is not a valid recipient email.", s))
        }
    }
}

impl AsRef<str> for RecipientEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct RecipientName(String);

impl RecipientName {
    /// Accepts any name that is not blank. Surrounding whitespace is dropped.
    pub fn parse(s: &str) -> Result<RecipientName, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(format!("{:?} is not a valid recipient name.", s));
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

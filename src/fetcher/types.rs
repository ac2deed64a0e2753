use encoding_rs::Encoding;
use url::Url;

/// The character encoding a body was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset(&'static Encoding);

impl Charset {
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    /// `iso-8859-1` and `latin1` resolve here too, per the WHATWG mapping.
    pub fn windows_1252() -> Self {
        Self(encoding_rs::WINDOWS_1252)
    }

    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self)
    }

    pub fn encoding(self) -> &'static Encoding {
        self.0
    }
}

impl From<&'static Encoding> for Charset {
    fn from(encoding: &'static Encoding) -> Self {
        Self(encoding)
    }
}

/// A successful 2xx response, decoded to UTF-8.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// URL after redirects.
    pub url_final: Url,
    pub body: String,
}

/// Which user-agent family an attempt presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentProfile {
    Desktop,
    Mobile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_to_whatwg_encodings() {
        assert_eq!(Charset::for_label("UTF-8"), Some(Charset::utf8()));
        assert_eq!(Charset::for_label("iso-8859-1"), Some(Charset::windows_1252()));
        assert_eq!(Charset::for_label("shift_jis").map(|c| c.encoding().name()), Some("Shift_JIS"));
        assert_eq!(Charset::for_label("not-a-charset"), None);
    }
}

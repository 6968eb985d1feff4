//! File-picker `accept` filter

/// Parsed `accept` attribute (`".png, image/*, application/pdf"`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptFilter {
    rules: Vec<AcceptRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AcceptRule {
    /// `.png`
    Extension(String),
    /// `image/*`, stored as `image/`
    MimePrefix(String),
    /// `application/pdf`
    Mime(String),
}

impl AcceptFilter {
    pub fn parse(accept: &str) -> Self {
        let rules = accept
            .split(',')
            .map(|token| token.trim().to_ascii_lowercase())
            .filter(|token| !token.is_empty() && token != "*/*" && token != "*")
            .map(|token| {
                if token.starts_with('.') {
                    AcceptRule::Extension(token)
                } else if let Some(major) = token.strip_suffix("/*") {
                    AcceptRule::MimePrefix(format!("{major}/"))
                } else {
                    AcceptRule::Mime(token)
                }
            })
            .collect();

        Self { rules }
    }

    /// An empty filter accepts everything
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn accepts(&self, name: &str, mime_type: &str) -> bool {
        if self.rules.is_empty() {
            return true;
        }

        let name = name.to_ascii_lowercase();
        let mime_type = mime_type.to_ascii_lowercase();
        self.rules.iter().any(|rule| match rule {
            AcceptRule::Extension(ext) => name.ends_with(ext.as_str()),
            AcceptRule::MimePrefix(prefix) => mime_type.starts_with(prefix.as_str()),
            AcceptRule::Mime(mime) => mime_type == *mime,
        })
    }
}

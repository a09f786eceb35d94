// src/profile_url.rs
use crate::error::UrlError;

/// A validated author profile reference. Only the `user=` id survives
/// parsing; every fetch rebuilds the URL against whichever mirror is tried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileUrl {
    user_id: String,
}

impl ProfileUrl {
    /// Accepts anything that mentions one of `mirrors` and carries `user=`.
    pub fn parse<S: AsRef<str>>(input: &str, mirrors: &[S]) -> Result<Self, UrlError> {
        let input = input.trim();
        if !mirrors.iter().any(|m| input.contains(m.as_ref())) {
            return Err(UrlError::NotScholarUrl(s!(input)));
        }
        let user_id = extract_user_id(input).ok_or_else(|| UrlError::MissingUserId(s!(input)))?;
        Ok(Self { user_id: s!(user_id) })
    }

    pub fn from_user_id(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Stable link for display and for the stored snapshot.
    pub fn canonical(&self, host: &str) -> String {
        format!("https://{host}/citations?user={}&hl=en", self.user_id)
    }

    /// One page of the profile's paper list on `host`.
    pub fn page(&self, host: &str, cstart: u32, pagesize: u32) -> String {
        format!(
            "https://{host}/citations?user={}&hl=en&cstart={cstart}&pagesize={pagesize}",
            self.user_id
        )
    }
}

/// Text after the first `user=` up to `&` or `#`.
pub fn extract_user_id(url: &str) -> Option<&str> {
    let start = url.find("user=")? + "user=".len();
    let rest = &url[start..];
    let end = rest.find(['&', '#']).unwrap_or(rest.len());
    let id = rest[..end].trim();
    if id.is_empty() { None } else { Some(id) }
}

/// `https://host/path` → `https://host`. Used to absolutize paper links.
pub fn origin_of(url: &str) -> Option<&str> {
    let after_scheme = url.find("://")? + 3;
    let end = url[after_scheme..].find('/').map_or(url.len(), |i| after_scheme + i);
    Some(&url[..end])
}

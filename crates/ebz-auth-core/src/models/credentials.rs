use std::fmt;

/// Username/password pair for a single authentication attempt.
///
/// Not serializable, and `Debug` redacts the password, so it cannot end up
/// in a log line or on disk by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True if the username is blank or the password is empty.
    pub fn is_blank(&self) -> bool {
        self.username.trim().is_empty() || self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("alice", "hunter2");
        let out = format!("{:?}", creds);
        assert!(out.contains("alice"));
        assert!(!out.contains("hunter2"));
        assert!(out.contains("<redacted>"));
    }

    #[test]
    fn test_is_blank() {
        assert!(Credentials::new("", "pw").is_blank());
        assert!(Credentials::new("   ", "pw").is_blank());
        assert!(Credentials::new("alice", "").is_blank());
        assert!(!Credentials::new("alice", "pw").is_blank());
    }
}

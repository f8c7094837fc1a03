//! Subscription member record.

use serde::{Deserialize, Serialize};

use super::{Email, MemberId};

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub is_active: bool,
    /// Join date, `YYYY-MM-DD`.
    pub joined_at: String,
}

impl Member {
    /// Case-insensitive substring match against name and email.
    ///
    /// An empty needle matches every member.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.email.as_str().to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member {
            id: MemberId::new("m1"),
            name: "田中 太郎".to_string(),
            email: Email::parse("tanaka@example.com").unwrap(),
            phone: None,
            is_active: true,
            joined_at: "2023-01-15".to_string(),
        }
    }

    #[test]
    fn test_matches_search_on_name_and_email() {
        let m = member();
        assert!(m.matches_search(""));
        assert!(m.matches_search("田中"));
        assert!(m.matches_search("TANAKA"));
        assert!(!m.matches_search("sato"));
    }
}

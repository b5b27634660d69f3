use std::fmt;

/// Logical directory a node resolves its modules against.
///
/// Always absolute and normalised: `/`, `/users`, `/users/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Resolves `module` relative to this path, lexically.
    ///
    /// `.` and empty segments are dropped, `..` pops (never above the root)
    /// and a leading `/` restarts from the root. No I/O.
    pub fn resolve(&self, module: &str) -> BasePath {
        let mut segments: Vec<&str> = if module.starts_with('/') {
            Vec::new()
        } else {
            self.segments().collect()
        };

        for segment in module.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }

        BasePath(format!("/{}", segments.join("/")))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_the_current_path() {
        let users: BasePath = BasePath::root().resolve("users");
        assert_eq!(users.as_str(), "/users");
        assert_eq!(users.resolve("profile").as_str(), "/users/profile");
        assert_eq!(users.resolve("./profile/").as_str(), "/users/profile");
    }

    #[test]
    fn parent_segments_pop_but_stop_at_the_root() {
        let profile: BasePath = BasePath::root().resolve("users/profile");
        assert_eq!(profile.resolve("../auth").as_str(), "/users/auth");
        assert_eq!(profile.resolve("../../../../auth").as_str(), "/auth");
        assert!(profile.resolve("../..").is_root());
    }

    #[test]
    fn absolute_modules_restart_from_the_root() {
        let profile: BasePath = BasePath::root().resolve("users/profile");
        assert_eq!(profile.resolve("/health").as_str(), "/health");
    }

    #[test]
    fn resolution_is_pure() {
        let base: BasePath = BasePath::root().resolve("a");
        assert_eq!(base.resolve("b"), base.resolve("b"));
        assert_eq!(base.as_str(), "/a");
    }
}

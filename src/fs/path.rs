//! Remote paths and breadcrumbs.

use std::fmt;

/// A normalised remote path.
///
/// Always starts with `/`, never empty, and only the root ends with `/`.
/// Empty components (`//`) are dropped when the path is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath(String);

/// One breadcrumb segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Text to show (`Root` for `/`)
    pub label: String,
    /// Path to navigate to
    pub path: String,
    /// The last segment is the current directory and is not navigable
    pub active: bool,
}

impl RemotePath {
    /// The root path `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Normalise `path`: leading `/` added, empty components and trailing
    /// `/` removed.
    pub fn new(path: &str) -> Self {
        let joined = path
            .split('/')
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(format!("/{}", joined))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Non-empty components, in order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|c| !c.is_empty())
    }

    /// Path of a direct child: `"/" + name` at the root, `path + "/" + name`
    /// elsewhere. `name` is used as given.
    pub fn child(&self, name: &str) -> String {
        if self.is_root() {
            format!("/{}", name)
        } else {
            format!("{}/{}", self.0, name)
        }
    }

    /// Parent directory; the root is its own parent.
    pub fn parent(&self) -> RemotePath {
        match self.0.rfind('/') {
            Some(0) | None => Self::root(),
            Some(idx) => Self(self.0[..idx].to_string()),
        }
    }

    /// Breadcrumbs from the root down to this path.
    ///
    /// The first segment is always `("Root", "/")`; each later one carries
    /// the cumulative prefix up to and including its component. The last
    /// segment is marked active.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut crumbs = vec![Breadcrumb {
            label: "Root".to_string(),
            path: "/".to_string(),
            active: false,
        }];

        let mut prefix = String::new();
        for component in self.components() {
            prefix.push('/');
            prefix.push_str(component);
            crumbs.push(Breadcrumb {
                label: component.to_string(),
                path: prefix.clone(),
                active: false,
            });
        }

        if let Some(last) = crumbs.last_mut() {
            last.active = true;
        }
        crumbs
    }
}

impl Default for RemotePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemotePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RemotePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl PartialEq<str> for RemotePath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RemotePath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(RemotePath::new("/"), "/");
        assert_eq!(RemotePath::new(""), "/");
        assert_eq!(RemotePath::new("/foo"), "/foo");
        assert_eq!(RemotePath::new("/foo/"), "/foo");
        assert_eq!(RemotePath::new("/foo//bar"), "/foo/bar");
        assert_eq!(RemotePath::new("foo"), "/foo");
        assert_eq!(RemotePath::new("///a///b///"), "/a/b");
    }

    #[test]
    fn test_child_has_no_double_slash_at_root() {
        assert_eq!(RemotePath::root().child("notes.txt"), "/notes.txt");
        assert_eq!(RemotePath::new("/docs").child("a.txt"), "/docs/a.txt");
    }

    #[test]
    fn test_parent() {
        assert_eq!(RemotePath::root().parent(), RemotePath::root());
        assert_eq!(RemotePath::new("/docs").parent(), RemotePath::root());
        assert_eq!(RemotePath::new("/docs/2024/q1").parent(), "/docs/2024");
    }

    #[test]
    fn test_root_breadcrumbs() {
        let crumbs = RemotePath::root().breadcrumbs();
        assert_eq!(
            crumbs,
            vec![Breadcrumb {
                label: "Root".into(),
                path: "/".into(),
                active: true
            }]
        );
    }

    #[test]
    fn test_nested_breadcrumbs() {
        let crumbs = RemotePath::new("/docs/2024/q1").breadcrumbs();
        let pairs: Vec<(&str, &str, bool)> = crumbs
            .iter()
            .map(|c| (c.label.as_str(), c.path.as_str(), c.active))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Root", "/", false),
                ("docs", "/docs", false),
                ("2024", "/docs/2024", false),
                ("q1", "/docs/2024/q1", true),
            ]
        );
    }

    #[test]
    fn test_breadcrumb_properties() {
        for raw in ["/", "/a", "/a/b", "/a/b/c/d", "x//y/", "/very/deep/tree/of/dirs/here"] {
            let path = RemotePath::new(raw);
            let crumbs = path.breadcrumbs();
            let components: Vec<&str> = path.components().collect();

            assert_eq!(crumbs.len(), 1 + components.len());
            assert_eq!((crumbs[0].label.as_str(), crumbs[0].path.as_str()), ("Root", "/"));
            assert_eq!(crumbs.iter().filter(|c| c.active).count(), 1);
            assert!(crumbs.last().unwrap().active);
            assert_eq!(crumbs.last().unwrap().path, path.as_str());

            for (i, crumb) in crumbs.iter().enumerate().skip(1) {
                let expected = format!("/{}", components[..i].join("/"));
                assert_eq!(crumb.path, expected);
                assert_eq!(crumb.label, components[i - 1]);
            }
        }
    }
}

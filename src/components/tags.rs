use smallvec::SmallVec;

/// Tag every entity starts with.
pub const DEFAULT_TAG: &str = "Entity";

/// Labels attached to an entity, used by queries and `bounce`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tags(pub SmallVec<[String; 2]>);

impl Default for Tags {
    fn default() -> Self {
        let mut tags = SmallVec::new();
        tags.push(DEFAULT_TAG.to_string());
        Tags(tags)
    }
}

impl Tags {
    /// Empty tag list, without the default tag.
    pub fn empty() -> Self {
        Tags(SmallVec::new())
    }

    pub fn has(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn push(&mut self, tag: impl Into<String>) {
        self.0.push(tag.into());
    }

    pub fn remove(&mut self, tag: &str) {
        self.0.retain(|t| t != tag);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Tags(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_entity_tag() {
        let tags = Tags::default();
        assert!(tags.has("Entity"));
        assert_eq!(tags.iter().count(), 1);
    }

    #[test]
    fn test_push_and_remove() {
        let mut tags = Tags::empty();
        tags.push("solid");
        tags.push("ground");
        assert!(tags.has("solid"));
        tags.remove("solid");
        assert!(!tags.has("solid"));
        assert!(tags.has("ground"));
    }

    #[test]
    fn test_collect_from_strs() {
        let tags: Tags = ["player", "Entity"].into_iter().collect();
        assert!(tags.has("player"));
        assert!(!tags.has("enemy"));
    }
}

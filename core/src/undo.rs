use crate::*;

/// Decides what a single-cell content change actually stores.
///
/// With undo enabled, asking for the content a cell already holds stores the restore content instead, so
/// repeating the same change toggles between the two.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UndoPolicy {
    enabled: bool,
    restore: Content,
}

impl UndoPolicy {
    pub const fn new(enabled: bool, restore: Content) -> Self {
        Self { enabled, restore }
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn restore_content(&self) -> &Content {
        &self.restore
    }

    pub fn resolve(&self, current: &Content, requested: Content) -> Content {
        if self.enabled && *current == requested {
            self.restore.clone()
        } else {
            requested
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_change_toggles_with_restore_content() {
        let policy = UndoPolicy::new(true, Content::parse("imagenes/texturegrass.png"));
        let flag = Content::parse("imagenes/flag.png");

        let first = policy.resolve(&flag, flag.clone());
        assert_eq!(first, *policy.restore_content());

        let second = policy.resolve(&first, flag.clone());
        assert_eq!(second, flag);
    }

    #[test]
    fn different_content_passes_through() {
        let policy = UndoPolicy::new(true, Content::Empty);
        assert_eq!(
            policy.resolve(&Content::parse("O"), Content::parse("X")),
            Content::parse("X")
        );
    }

    #[test]
    fn disabled_policy_never_substitutes() {
        let policy = UndoPolicy::default();
        let x = Content::parse("X");
        assert!(!policy.is_enabled());
        assert_eq!(policy.resolve(&x, x.clone()), x);
    }
}

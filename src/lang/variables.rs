use std::collections::BTreeMap;

use crate::lang::ast::Identifier;

/// Flat name to value store
///
/// Lives as long as its owner. Bindings are created or overwritten, never removed.
pub struct Variables<T> {
    inner: BTreeMap<Identifier, T>,
}

impl<T> Variables<T> {
    pub fn new() -> Self {
        Variables {
            inner: BTreeMap::default(),
        }
    }

    pub fn get(&self, ident: &Identifier) -> Option<&T> {
        self.inner.get(ident)
    }

    pub fn insert(&mut self, ident: Identifier, val: T) {
        self.inner.insert(ident, val);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T> Default for Variables<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_insert_overwrites() {
    let mut vars = Variables::new();
    assert!(vars.is_empty());

    vars.insert(Identifier("x".to_string()), 1);
    vars.insert(Identifier("y".to_string()), 2);
    vars.insert(Identifier("x".to_string()), 3);

    assert_eq!(vars.len(), 2);
    assert_eq!(vars.get(&Identifier("x".to_string())), Some(&3));
    assert_eq!(vars.get(&Identifier("z".to_string())), None);
}

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

/// A mapping from symbol names to the values they are evaluated with.
pub trait Substitutions {
    /// Returns the value of the symbol with the given name, or [`None`] if it has no value.
    fn value_of(&self, name: &str) -> Option<f64>;
}

impl<K, S> Substitutions for HashMap<K, f64, S>
where
    K: Borrow<str> + Eq + Hash,
    S: BuildHasher,
{
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<K> Substitutions for BTreeMap<K, f64>
where
    K: Borrow<str> + Ord,
{
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<T: Substitutions + ?Sized> Substitutions for &T {
    fn value_of(&self, name: &str) -> Option<f64> {
        (**self).value_of(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashMap;
    use super::*;

    #[test]
    fn maps() {
        let hash = HashMap::from([("x", 2.0)]);
        assert_eq!(hash.value_of("x"), Some(2.0));
        assert_eq!(hash.value_of("y"), None);

        let btree = BTreeMap::from([(String::from("x"), 3.0)]);
        assert_eq!(btree.value_of("x"), Some(3.0));

        let mut fx = FxHashMap::default();
        fx.insert(String::from("theta"), 0.5);
        assert_eq!((&fx).value_of("theta"), Some(0.5));
    }
}

//! Analysis result at a single program point.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use crate::property::Property;
use crate::types::Var;

/// Mapping from variables to their [`Property`].
///
/// A variable missing from the map is undefined at this point (bottom). This
/// is different from [`Property::Unknown`], which means "defined, but nothing
/// is known about it".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct State {
    props: BTreeMap<Var, Property>,
}

impl State {
    /// The empty mapping (bottom).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: Var) -> Option<&Property> {
        self.props.get(&var)
    }

    pub fn contains(&self, var: Var) -> bool {
        self.props.contains_key(&var)
    }

    pub fn set(&mut self, var: Var, prop: Property) {
        self.props.insert(var, prop);
    }

    /// Removes the key entirely (not the same as setting it to `Unknown`).
    pub fn remove(&mut self, var: Var) -> Option<Property> {
        self.props.remove(&var)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Var, Property> {
        self.props.iter()
    }

    /// Key-wise join: keys present on one side pass through unchanged,
    /// keys present on both sides are joined with [`Property::join`].
    pub fn join(&self, other: &State) -> State {
        let mut result = self.clone();
        for (&var, prop) in other.iter() {
            let joined = match self.props.get(&var) {
                Some(mine) => mine.join(prop),
                None => prop.clone(),
            };
            result.props.insert(var, joined);
        }
        result
    }

    /// Left fold of [`join`][State::join] starting from the empty mapping.
    pub fn join_all<'a, I>(states: I) -> State
    where
        I: IntoIterator<Item = &'a State>,
    {
        states.into_iter().fold(State::new(), |acc, s| acc.join(s))
    }
}

impl FromIterator<(Var, Property)> for State {
    fn from_iter<T: IntoIterator<Item = (Var, Property)>>(iter: T) -> Self {
        Self {
            props: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a State {
    type Item = (&'a Var, &'a Property);
    type IntoIter = btree_map::Iter<'a, Var, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.props.iter()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, prop)) in self.props.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", var, prop)?;
        }
        write!(f, "}}")
    }
}

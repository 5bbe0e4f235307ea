use crate::error::{Error, Result};

/// A naming context: a stack of binder names on top of a table of free names.
///
/// The bindings are stored outermost first. Free names live below every binder, so the
/// de Bruijn index of a free name seen under `depth` binders is `depth + slot`, where `slot`
/// is the order in which the free name was first registered. Registering a new free name
/// never changes the slot of an existing one.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Context {
    bindings: Vec<String>,
    free: usize,
}

impl Context {
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
            free: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of binders currently in scope.
    pub fn depth(&self) -> usize {
        self.bindings.len() - self.free
    }

    /// Free names in slot order.
    pub fn free_names(&self) -> impl Iterator<Item = &str> {
        self.bindings[..self.free].iter().rev().map(String::as_str)
    }

    pub fn add_name(&mut self, name: impl Into<String>) {
        self.bindings.push(name.into());
    }

    pub fn drop_name(&mut self) {
        if self.depth() > 0 {
            self.bindings.pop();
        }
    }

    pub fn with_name<U>(&mut self, name: impl Into<String>, f: impl FnOnce(&mut Self) -> U) -> U {
        self.add_name(name);
        let result = f(self);
        self.drop_name();
        result
    }

    /// Registers a free name and returns its index at the current depth.
    ///
    /// Registering a name that is already free returns the existing index.
    pub fn add_free(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(i) = self.free_index(&name) {
            return i;
        }
        self.bindings.insert(0, name);
        self.free += 1;
        self.len() - 1
    }

    pub fn is_name_bound(&self, name: &str) -> bool {
        self.bindings.iter().any(|n| n == name)
    }

    pub fn pick_fresh_name(&self, name: &str) -> String {
        let mut name = name.to_string();
        while self.is_name_bound(&name) {
            name.push('\'');
        }
        name
    }

    pub fn index_to_name(&self, i: usize) -> Result<&str> {
        self.bindings
            .iter()
            .rev()
            .nth(i)
            .map(String::as_str)
            .ok_or_else(|| Error::VariableLookupFailure(i, self.len()))
    }

    /// Distance to the nearest enclosing binder called `name`, ignoring free names.
    pub fn bound_index(&self, name: &str) -> Option<usize> {
        self.bindings[self.free..]
            .iter()
            .rev()
            .position(|n| n == name)
    }

    /// Index of an already registered free name at the current depth.
    pub fn free_index(&self, name: &str) -> Option<usize> {
        self.free_names()
            .position(|n| n == name)
            .map(|slot| self.depth() + slot)
    }
}

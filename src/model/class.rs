use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::program::Program;
use super::types::{MethodAccessFlags, MethodDescriptor, MethodReference};

/// A method as loaded from the class model.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodHolder {
    pub owner: String,
    pub descriptor: MethodDescriptor,
    pub access_flags: MethodAccessFlags,
    /// Absent for native and abstract methods.
    pub program: Option<Program>,
}

impl MethodHolder {
    pub fn new(
        owner: impl Into<String>,
        descriptor: MethodDescriptor,
        access_flags: MethodAccessFlags,
        program: Option<Program>,
    ) -> Self {
        Self {
            owner: owner.into(),
            descriptor,
            access_flags,
            program,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn reference(&self) -> MethodReference {
        MethodReference::new(self.owner.clone(), self.descriptor.clone())
    }

    pub fn is_static(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::STATIC)
    }

    pub fn is_native(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::NATIVE)
    }

    pub fn is_abstract(&self) -> bool {
        self.access_flags.contains(MethodAccessFlags::ABSTRACT)
    }
}

/// A class and its methods, keyed by descriptor.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ClassHolder {
    pub name: String,
    pub methods: BTreeMap<MethodDescriptor, MethodHolder>,
}

impl ClassHolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    /// Add a method, replacing any existing method with the same descriptor.
    pub fn add_method(
        &mut self,
        descriptor: MethodDescriptor,
        access_flags: MethodAccessFlags,
        program: Option<Program>,
    ) -> &mut MethodHolder {
        let method = MethodHolder::new(self.name.clone(), descriptor.clone(), access_flags, program);
        match self.methods.entry(descriptor) {
            Entry::Occupied(mut entry) => {
                entry.insert(method);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(method),
        }
    }

    pub fn method(&self, descriptor: &MethodDescriptor) -> Option<&MethodHolder> {
        self.methods.get(descriptor)
    }

    /// Find the first method with the given name, in descriptor order.
    pub fn find_method(&self, name: &str) -> Option<&MethodHolder> {
        self.methods.values().find(|m| m.name() == name)
    }
}

/// Read-only access to loaded classes.
pub trait ClassSource: Sync {
    fn get(&self, name: &str) -> Option<&ClassHolder>;
}

/// An in-memory [`ClassSource`].
#[derive(Clone, Debug, Default)]
pub struct ClassPool {
    classes: BTreeMap<String, ClassHolder>,
}

impl ClassPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, class: ClassHolder) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassSource for ClassPool {
    fn get(&self, name: &str) -> Option<&ClassHolder> {
        self.classes.get(name)
    }
}

impl FromIterator<ClassHolder> for ClassPool {
    fn from_iter<I: IntoIterator<Item = ClassHolder>>(iter: I) -> Self {
        let mut pool = ClassPool::new();
        for class in iter {
            pool.add(class);
        }
        pool
    }
}

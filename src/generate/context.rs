use std::collections::HashMap;

use crate::model::{ClassPool, ClassSource, MethodDescriptor, MethodReference};
use crate::wasm::ImportLinkage;

/// Answers whether a class has a static initializer.
pub trait ClassInitializerInfo: Sync {
    fn has_static_initializer(&self, class_name: &str) -> bool;
}

impl ClassInitializerInfo for ClassPool {
    fn has_static_initializer(&self, class_name: &str) -> bool {
        let clinit = MethodDescriptor::new(crate::model::CLASS_INITIALIZER_NAME, Vec::new(), None);
        self.get(class_name)
            .map_or(false, |class| class.method(&clinit).is_some())
    }
}

/// Module-wide state shared by every method compilation.
///
/// Filled during the scanning phase, then only read.
#[derive(Clone, Debug, Default)]
pub struct WasmGenerationContext {
    imported_methods: HashMap<MethodReference, ImportLinkage>,
}

impl WasmGenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the host import backing a native method, replacing any earlier one.
    pub fn register_import(
        &mut self,
        method: MethodReference,
        module: impl Into<String>,
        name: impl Into<String>,
    ) {
        self.imported_methods
            .insert(method, ImportLinkage::new(module, name));
    }

    pub fn imported_method(&self, method: &MethodReference) -> Option<&ImportLinkage> {
        self.imported_methods.get(method)
    }

    pub fn import_count(&self) -> usize {
        self.imported_methods.len()
    }
}

use crate::ast::{RegularMethodNode, Statement};
use crate::error::{GenerateError, Result};
use crate::lowlevel::{ClassInitializerEliminator, ClassInitializerTransformer, ProgramTransform};
use crate::model::{ClassSource, Instruction, MethodHolder, MethodReference, Program};
use crate::wasm::{ImportLinkage, WasmExpression, WasmFunction, WasmLocal, WasmType};

use super::context::{ClassInitializerInfo, WasmGenerationContext};
use super::mangling::mangle_method;
use super::util::map_type;

/// Turns a normalized control flow graph into a structured tree.
pub trait Decompiler: Sync {
    /// The returned variable list covers at least every parameter slot
    /// (plus the receiver at index 0 for instance methods).
    fn decompile_regular(&self, method: &MethodHolder, program: &Program) -> RegularMethodNode;
}

/// Translates a structured tree into the function's instruction tree.
pub trait BodyEmitter: Sync {
    /// Variable `i` of the tree lives in local `i - first_variable`.
    fn emit(
        &self,
        body: &Statement,
        function: &WasmFunction,
        method: &MethodReference,
        first_variable: usize,
    ) -> WasmExpression;
}

/// Options controlling method compilation.
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    /// Insert an `InitClass` at the entry of methods that must trigger class initialization.
    pub inject_class_init: bool,
    /// Run [`ClassInitializerEliminator`] before decompilation.
    pub eliminate_redundant_init: bool,
    /// Run [`ClassInitializerTransformer`] before decompilation.
    pub lower_class_init: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            inject_class_init: true,
            eliminate_redundant_init: true,
            lower_class_init: true,
        }
    }
}

/// Whether entering `method` must first make sure its class is initialized.
pub fn needs_class_init_call(method: &MethodHolder) -> bool {
    if method.descriptor.is_class_initializer() {
        return false;
    }
    if method.descriptor.is_constructor() {
        return true;
    }
    method.is_static()
}

/// Compiles methods of the class model into WebAssembly functions.
///
/// Every collaborator is borrowed read-only, so one compiler can be shared
/// across threads compiling different methods.
pub struct MethodCompiler<'a> {
    decompiler: &'a dyn Decompiler,
    emitter: &'a dyn BodyEmitter,
    class_source: &'a dyn ClassSource,
    context: &'a WasmGenerationContext,
    class_info: &'a dyn ClassInitializerInfo,
    options: GeneratorOptions,
    passes: Vec<Box<dyn ProgramTransform + 'a>>,
}

impl<'a> MethodCompiler<'a> {
    pub fn new(
        decompiler: &'a dyn Decompiler,
        emitter: &'a dyn BodyEmitter,
        class_source: &'a dyn ClassSource,
        context: &'a WasmGenerationContext,
        class_info: &'a dyn ClassInitializerInfo,
    ) -> Self {
        Self::with_options(
            decompiler,
            emitter,
            class_source,
            context,
            class_info,
            GeneratorOptions::default(),
        )
    }

    pub fn with_options(
        decompiler: &'a dyn Decompiler,
        emitter: &'a dyn BodyEmitter,
        class_source: &'a dyn ClassSource,
        context: &'a WasmGenerationContext,
        class_info: &'a dyn ClassInitializerInfo,
        options: GeneratorOptions,
    ) -> Self {
        let mut passes: Vec<Box<dyn ProgramTransform + 'a>> = Vec::new();
        if options.eliminate_redundant_init {
            passes.push(Box::new(ClassInitializerEliminator::new(class_info)));
        }
        if options.lower_class_init {
            passes.push(Box::new(ClassInitializerTransformer::new()));
        }
        Self {
            decompiler,
            emitter,
            class_source,
            context,
            class_info,
            options,
            passes,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn lookup(&self, method_ref: &MethodReference) -> Result<&'a MethodHolder> {
        let class = self
            .class_source
            .get(&method_ref.class_name)
            .ok_or_else(|| GenerateError::class_not_found(&method_ref.class_name))?;
        class
            .method(&method_ref.descriptor)
            .ok_or_else(|| GenerateError::MethodNotFound {
                method: method_ref.clone(),
            })
    }

    /// Compile a method that has a body.
    pub fn compile(&self, method_ref: &MethodReference) -> Result<WasmFunction> {
        let method = self.lookup(method_ref)?;
        let mut program = method
            .program
            .clone()
            .ok_or_else(|| GenerateError::MissingProgram {
                method: method_ref.clone(),
            })?;
        log::debug!("compiling {}", method_ref);

        if self.options.inject_class_init {
            self.inject_class_init(method, &mut program);
        }
        for pass in &self.passes {
            pass.apply(&mut program);
        }

        let method_ast = self.decompiler.decompile_regular(method, &program);
        let first_variable = if method.is_static() { 0 } else { 1 };

        let mut function = WasmFunction::new(mangle_method(method_ref));
        for variable in method_ast.variables.iter().skip(first_variable) {
            let ty = variable.ty.as_ref().map_or(WasmType::Int32, map_type);
            function.add_local(WasmLocal::new(ty, variable.name.clone()));
        }
        function.parameters = function
            .locals
            .iter()
            .take(method_ref.parameter_count())
            .map(|local| local.ty)
            .collect();
        function.result = method_ref.return_type().map(map_type);

        let body = self
            .emitter
            .emit(&method_ast.body, &function, method_ref, first_variable);
        function.body = Some(body);

        log::debug!(
            "compiled {} as {} ({} params, {} locals)",
            method_ref,
            function.name,
            function.parameters.len(),
            function.locals.len()
        );
        Ok(function)
    }

    /// Insert the class-initialization check a method needs on entry, if any.
    pub fn inject_class_init(&self, method: &MethodHolder, program: &mut Program) {
        if !needs_class_init_call(method) || !self.class_info.has_static_initializer(&method.owner) {
            return;
        }
        if let Some(entry) = program.entry_block_mut() {
            log::trace!("{}: injecting init of {}", method.reference(), method.owner);
            entry.instructions.insert(
                0,
                Instruction::InitClass {
                    class_name: method.owner.clone(),
                },
            );
        }
    }

    /// Build the import stub for a native method.
    pub fn compile_native(&self, method_ref: &MethodReference) -> WasmFunction {
        let mut function = WasmFunction::new(mangle_method(method_ref));
        function.parameters = method_ref
            .descriptor
            .parameter_types
            .iter()
            .map(map_type)
            .collect();

        let import = match self.context.imported_method(method_ref) {
            Some(import) => import.clone(),
            None => {
                log::warn!("no import registered for native method {}", method_ref);
                ImportLinkage::unresolved()
            }
        };
        function.import = Some(import);
        function
    }

    /// Compile every concrete method of a class, in descriptor order.
    pub fn compile_class(&self, class_name: &str) -> Result<Vec<WasmFunction>> {
        let class = self
            .class_source
            .get(class_name)
            .ok_or_else(|| GenerateError::class_not_found(class_name))?;

        let mut functions = Vec::new();
        for method in class.methods.values() {
            if method.is_abstract() {
                continue;
            }
            let method_ref = method.reference();
            if method.is_native() {
                functions.push(self.compile_native(&method_ref));
            } else {
                functions.push(self.compile(&method_ref)?);
            }
        }
        Ok(functions)
    }
}

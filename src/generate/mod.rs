//! Per-method WebAssembly generation.

pub mod context;
pub mod generator;
pub mod mangling;
pub mod util;

pub use context::{ClassInitializerInfo, WasmGenerationContext};
pub use generator::{needs_class_init_call, BodyEmitter, Decompiler, GeneratorOptions, MethodCompiler};
pub use mangling::mangle_method;
pub use util::map_type;

//! Method-level WebAssembly code generator for a JVM-style class model.
//!
//! A method travels through the following steps:
//!
//! ```text
//! MethodReference -> class lookup -> InitClass injection -> eliminator -> transformer
//!                 -> Decompiler -> locals/signature -> BodyEmitter -> WasmFunction
//! ```
//!
//! Native methods skip the body pipeline and become import stubs.
//!
//! ```rust
//! use classfile_wasmgen::generate::mangle_method;
//! use classfile_wasmgen::model::MethodReference;
//!
//! let add = MethodReference::parse("app/Math", "add(II)I").unwrap();
//! assert_eq!(mangle_method(&add), "meth_app_sMath_Madd_D_oII_cI");
//! ```

#[macro_use]
extern crate bitflags;

pub mod ast;
pub mod error;
pub mod generate;
pub mod lowlevel;
pub mod model;
pub mod wasm;

pub use error::{GenerateError, Result};
pub use generate::{BodyEmitter, Decompiler, GeneratorOptions, MethodCompiler, WasmGenerationContext};

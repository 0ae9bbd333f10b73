//! Target-side model: WebAssembly value types, functions and instruction trees.

pub mod expression;
pub mod types;

pub use expression::{
    WasmExpression, WasmFloatBinaryOperation, WasmFloatType, WasmIntBinaryOperation, WasmIntType,
};
pub use types::{ImportLinkage, WasmFunction, WasmFunctionType, WasmLocal, WasmType};

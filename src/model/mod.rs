//! Source-side program model: classes, methods, descriptors and control-flow graphs.

pub mod class;
pub mod descriptor;
pub mod program;
pub mod types;

pub use class::{ClassHolder, ClassPool, ClassSource, MethodHolder};
pub use program::{
    BasicBlock, BinaryOperation, BlockId, Constant, FieldReference, Instruction, NumericOperandType,
    Program, Terminator, Variable, VariableInfo,
};
pub use types::{
    MethodAccessFlags, MethodDescriptor, MethodReference, ValueType, CLASS_INITIALIZER_NAME,
    CONSTRUCTOR_NAME,
};

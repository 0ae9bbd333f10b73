//! Structured statement/expression tree produced by decompilation.

use crate::model::{BinaryOperation, Constant, FieldReference, MethodReference, NumericOperandType, ValueType};

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Ge,
    Gt,
    Le,
}

/// Expression tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Constant(Constant),
    /// Load of a decompiled variable by index.
    Variable(usize),
    Binary {
        operation: BinaryOperation,
        operand_type: NumericOperandType,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        operand_type: NumericOperandType,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Negate {
        operand_type: NumericOperandType,
        operand: Box<Expr>,
    },
    Invoke {
        method: MethodReference,
        instance: Option<Box<Expr>>,
        arguments: Vec<Expr>,
    },
    GetField {
        instance: Option<Box<Expr>>,
        field: FieldReference,
        field_type: ValueType,
    },
    /// Whether the named class already ran its static initializer.
    IsClassInitialized(String),
}

/// Structured statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Sequence(Vec<Statement>),
    Assign { index: usize, value: Expr },
    Expression(Expr),
    PutField {
        instance: Option<Expr>,
        field: FieldReference,
        field_type: ValueType,
        value: Expr,
    },
    If {
        condition: Expr,
        consequent: Box<Statement>,
        alternative: Option<Box<Statement>>,
    },
    /// Loop; `condition` of `None` means loop forever.
    While {
        label: Option<String>,
        condition: Option<Expr>,
        body: Box<Statement>,
    },
    Break { label: Option<String> },
    Continue { label: Option<String> },
    Return(Option<Expr>),
    InitClass(String),
}

/// A decompiled variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableNode {
    pub index: usize,
    /// `None` when the decompiler could not infer a type.
    pub ty: Option<ValueType>,
    pub name: Option<String>,
}

impl VariableNode {
    pub fn new(index: usize, ty: Option<ValueType>, name: Option<String>) -> Self {
        Self { index, ty, name }
    }
}

/// A decompiled method body together with its variable list.
#[derive(Clone, Debug, PartialEq)]
pub struct RegularMethodNode {
    pub method: MethodReference,
    pub variables: Vec<VariableNode>,
    pub body: Statement,
}

impl RegularMethodNode {
    pub fn new(method: MethodReference, variables: Vec<VariableNode>, body: Statement) -> Self {
        Self {
            method,
            variables,
            body,
        }
    }
}

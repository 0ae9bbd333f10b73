use super::types::WasmType;

/// Integer width of a numeric instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WasmIntType {
    Int32,
    Int64,
}

/// Float width of a numeric instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WasmFloatType {
    Float32,
    Float64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WasmIntBinaryOperation {
    Add,
    Sub,
    Mul,
    DivSigned,
    RemSigned,
    And,
    Or,
    Xor,
    Shl,
    ShrSigned,
    ShrUnsigned,
    Eq,
    Ne,
    LtSigned,
    LeSigned,
    GtSigned,
    GeSigned,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WasmFloatBinaryOperation {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A node of an emitted instruction tree.
#[derive(Clone, Debug, PartialEq)]
pub enum WasmExpression {
    /// `block`; `result` is the block's value type.
    Block {
        label: Option<String>,
        result: Option<WasmType>,
        body: Vec<WasmExpression>,
    },
    Loop {
        label: Option<String>,
        body: Vec<WasmExpression>,
    },
    Branch {
        label: String,
        condition: Option<Box<WasmExpression>>,
    },
    Conditional {
        condition: Box<WasmExpression>,
        then_branch: Vec<WasmExpression>,
        else_branch: Vec<WasmExpression>,
    },
    Return(Option<Box<WasmExpression>>),
    Drop(Box<WasmExpression>),
    GetLocal(usize),
    SetLocal {
        index: usize,
        value: Box<WasmExpression>,
    },
    Int32Constant(i32),
    Int64Constant(i64),
    Float32Constant(f32),
    Float64Constant(f64),
    IntBinary {
        ty: WasmIntType,
        operation: WasmIntBinaryOperation,
        first: Box<WasmExpression>,
        second: Box<WasmExpression>,
    },
    FloatBinary {
        ty: WasmFloatType,
        operation: WasmFloatBinaryOperation,
        first: Box<WasmExpression>,
        second: Box<WasmExpression>,
    },
    /// Call of a function by linkage name.
    Call {
        function: String,
        arguments: Vec<WasmExpression>,
    },
    Unreachable,
}

impl WasmExpression {
    pub fn block(body: Vec<WasmExpression>) -> Self {
        WasmExpression::Block {
            label: None,
            result: None,
            body,
        }
    }

    pub fn int_binary(
        ty: WasmIntType,
        operation: WasmIntBinaryOperation,
        first: WasmExpression,
        second: WasmExpression,
    ) -> Self {
        WasmExpression::IntBinary {
            ty,
            operation,
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    pub fn float_binary(
        ty: WasmFloatType,
        operation: WasmFloatBinaryOperation,
        first: WasmExpression,
        second: WasmExpression,
    ) -> Self {
        WasmExpression::FloatBinary {
            ty,
            operation,
            first: Box::new(first),
            second: Box::new(second),
        }
    }
}

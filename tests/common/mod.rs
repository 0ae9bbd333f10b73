#![allow(dead_code)]

use std::sync::Mutex;

use classfile_wasmgen::ast::{Expr, RegularMethodNode, Statement, VariableNode};
use classfile_wasmgen::generate::{mangle_method, BodyEmitter, Decompiler};
use classfile_wasmgen::model::{
    BasicBlock, BinaryOperation, ClassHolder, Constant, Instruction, MethodAccessFlags, MethodDescriptor,
    MethodHolder, MethodReference, NumericOperandType, Program, Terminator, ValueType, Variable,
};
use classfile_wasmgen::wasm::{
    WasmExpression, WasmFloatBinaryOperation, WasmFloatType, WasmFunction, WasmIntBinaryOperation, WasmIntType,
};

// ---------------------------------------------------------------------------
// Decompiler stub
// ---------------------------------------------------------------------------

/// Decompiles each reachable block as straight-line code and ignores the
/// branch structure. Enough for checking signatures and simple bodies.
#[derive(Default)]
pub struct StraightLineDecompiler {
    seen: Mutex<Vec<Program>>,
}

impl StraightLineDecompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Programs handed to the decompiler, in call order.
    pub fn seen_programs(&self) -> Vec<Program> {
        self.seen.lock().unwrap().clone()
    }
}

impl Decompiler for StraightLineDecompiler {
    fn decompile_regular(&self, method: &MethodHolder, program: &Program) -> RegularMethodNode {
        self.seen.lock().unwrap().push(program.clone());

        let variables = program
            .variables
            .iter()
            .enumerate()
            .map(|(index, info)| VariableNode::new(index, info.ty.clone(), info.debug_name.clone()))
            .collect();

        let mut statements = Vec::new();
        for block_id in program.reverse_postorder() {
            let block = program.block(block_id);
            statements.extend(block.instructions.iter().map(decompile_instruction));
            if let Terminator::Exit { value } = &block.terminator {
                statements.push(Statement::Return(value.map(|v| Expr::Variable(v.index()))));
            }
        }

        let body = if statements.len() == 1 {
            statements.remove(0)
        } else {
            Statement::Sequence(statements)
        };
        RegularMethodNode::new(method.reference(), variables, body)
    }
}

fn var(v: &Variable) -> Box<Expr> {
    Box::new(Expr::Variable(v.index()))
}

fn decompile_instruction(instruction: &Instruction) -> Statement {
    match instruction {
        Instruction::Constant { receiver, value } => Statement::Assign {
            index: receiver.index(),
            value: Expr::Constant(value.clone()),
        },
        Instruction::Assign { receiver, assignee } => Statement::Assign {
            index: receiver.index(),
            value: Expr::Variable(assignee.index()),
        },
        Instruction::Binary {
            receiver,
            operation,
            operand_type,
            first,
            second,
        } => Statement::Assign {
            index: receiver.index(),
            value: Expr::Binary {
                operation: *operation,
                operand_type: *operand_type,
                left: var(first),
                right: var(second),
            },
        },
        Instruction::Negate {
            receiver,
            operand_type,
            operand,
        } => Statement::Assign {
            index: receiver.index(),
            value: Expr::Negate {
                operand_type: *operand_type,
                operand: var(operand),
            },
        },
        Instruction::Invoke {
            receiver,
            instance,
            method,
            arguments,
        } => {
            let call = Expr::Invoke {
                method: method.clone(),
                instance: instance.as_ref().map(var),
                arguments: arguments.iter().map(|a| Expr::Variable(a.index())).collect(),
            };
            match receiver {
                Some(receiver) => Statement::Assign {
                    index: receiver.index(),
                    value: call,
                },
                None => Statement::Expression(call),
            }
        }
        Instruction::GetField {
            receiver,
            instance,
            field,
            field_type,
        } => Statement::Assign {
            index: receiver.index(),
            value: Expr::GetField {
                instance: instance.as_ref().map(var),
                field: field.clone(),
                field_type: field_type.clone(),
            },
        },
        Instruction::PutField {
            instance,
            field,
            field_type,
            value,
        } => Statement::PutField {
            instance: instance.map(|i| Expr::Variable(i.index())),
            field: field.clone(),
            field_type: field_type.clone(),
            value: Expr::Variable(value.index()),
        },
        Instruction::InitClass { class_name } => Statement::InitClass(class_name.clone()),
        Instruction::IsClassInitialized { receiver, class_name } => Statement::Assign {
            index: receiver.index(),
            value: Expr::IsClassInitialized(class_name.clone()),
        },
    }
}

// ---------------------------------------------------------------------------
// Emitter stub
// ---------------------------------------------------------------------------

/// Emits the subset of the tree the tests produce; anything else becomes `unreachable`.
pub struct SimpleEmitter;

impl BodyEmitter for SimpleEmitter {
    fn emit(
        &self,
        body: &Statement,
        _function: &WasmFunction,
        _method: &MethodReference,
        first_variable: usize,
    ) -> WasmExpression {
        emit_statement(body, first_variable)
    }
}

fn emit_statement(statement: &Statement, first_variable: usize) -> WasmExpression {
    match statement {
        Statement::Sequence(parts) => {
            WasmExpression::block(parts.iter().map(|s| emit_statement(s, first_variable)).collect())
        }
        Statement::Assign { index, value } => match index.checked_sub(first_variable) {
            Some(local) => WasmExpression::SetLocal {
                index: local,
                value: Box::new(emit_expr(value, first_variable)),
            },
            None => WasmExpression::Unreachable,
        },
        Statement::Expression(expr) => emit_expr(expr, first_variable),
        Statement::Return(value) => {
            WasmExpression::Return(value.as_ref().map(|v| Box::new(emit_expr(v, first_variable))))
        }
        Statement::InitClass(class_name) => WasmExpression::Call {
            function: mangle_method(&MethodReference::class_initializer(class_name.clone())),
            arguments: Vec::new(),
        },
        _ => WasmExpression::Unreachable,
    }
}

fn emit_expr(expr: &Expr, first_variable: usize) -> WasmExpression {
    match expr {
        Expr::Constant(Constant::Int(v)) => WasmExpression::Int32Constant(*v),
        Expr::Constant(Constant::Long(v)) => WasmExpression::Int64Constant(*v),
        Expr::Constant(Constant::Float(v)) => WasmExpression::Float32Constant(*v),
        Expr::Constant(Constant::Double(v)) => WasmExpression::Float64Constant(*v),
        Expr::Variable(index) => match index.checked_sub(first_variable) {
            Some(local) => WasmExpression::GetLocal(local),
            None => WasmExpression::Unreachable,
        },
        Expr::Binary {
            operation,
            operand_type,
            left,
            right,
        } => {
            let first = emit_expr(left, first_variable);
            let second = emit_expr(right, first_variable);
            match operand_type {
                NumericOperandType::Int => {
                    WasmExpression::int_binary(WasmIntType::Int32, int_op(*operation), first, second)
                }
                NumericOperandType::Long => {
                    WasmExpression::int_binary(WasmIntType::Int64, int_op(*operation), first, second)
                }
                NumericOperandType::Float => float_binary(WasmFloatType::Float32, *operation, first, second),
                NumericOperandType::Double => float_binary(WasmFloatType::Float64, *operation, first, second),
            }
        }
        Expr::Invoke {
            method,
            instance,
            arguments,
        } => {
            let mut args: Vec<WasmExpression> = instance
                .iter()
                .map(|i| emit_expr(i, first_variable))
                .collect();
            args.extend(arguments.iter().map(|a| emit_expr(a, first_variable)));
            WasmExpression::Call {
                function: mangle_method(method),
                arguments: args,
            }
        }
        _ => WasmExpression::Unreachable,
    }
}

fn int_op(operation: BinaryOperation) -> WasmIntBinaryOperation {
    match operation {
        BinaryOperation::Add => WasmIntBinaryOperation::Add,
        BinaryOperation::Subtract => WasmIntBinaryOperation::Sub,
        BinaryOperation::Multiply => WasmIntBinaryOperation::Mul,
        BinaryOperation::Divide => WasmIntBinaryOperation::DivSigned,
        BinaryOperation::Modulo => WasmIntBinaryOperation::RemSigned,
        BinaryOperation::And => WasmIntBinaryOperation::And,
        BinaryOperation::Or => WasmIntBinaryOperation::Or,
        BinaryOperation::Xor => WasmIntBinaryOperation::Xor,
        BinaryOperation::ShiftLeft => WasmIntBinaryOperation::Shl,
        BinaryOperation::ShiftRight => WasmIntBinaryOperation::ShrSigned,
        BinaryOperation::ShiftRightUnsigned => WasmIntBinaryOperation::ShrUnsigned,
    }
}

/// Float operators with a single-instruction form; the rest need runtime helpers.
pub fn float_op(operation: BinaryOperation) -> Option<WasmFloatBinaryOperation> {
    match operation {
        BinaryOperation::Add => Some(WasmFloatBinaryOperation::Add),
        BinaryOperation::Subtract => Some(WasmFloatBinaryOperation::Sub),
        BinaryOperation::Multiply => Some(WasmFloatBinaryOperation::Mul),
        BinaryOperation::Divide => Some(WasmFloatBinaryOperation::Div),
        BinaryOperation::Modulo
        | BinaryOperation::And
        | BinaryOperation::Or
        | BinaryOperation::Xor
        | BinaryOperation::ShiftLeft
        | BinaryOperation::ShiftRight
        | BinaryOperation::ShiftRightUnsigned => None,
    }
}

fn float_binary(
    ty: WasmFloatType,
    operation: BinaryOperation,
    first: WasmExpression,
    second: WasmExpression,
) -> WasmExpression {
    match float_op(operation) {
        Some(op) => WasmExpression::float_binary(ty, op, first, second),
        None => WasmExpression::Unreachable,
    }
}

// ---------------------------------------------------------------------------
// Model builders
// ---------------------------------------------------------------------------

pub fn descriptor(desc: &str) -> MethodDescriptor {
    MethodDescriptor::parse(desc).unwrap()
}

pub fn method_ref(class_name: &str, desc: &str) -> MethodReference {
    MethodReference::parse(class_name, desc).unwrap()
}

/// `static int add(int a, int b) { a = a + b; return a; }`
pub fn add_program() -> Program {
    let mut program = Program::new();
    let a = program.create_variable(Some(ValueType::Int), Some("a".into()));
    let b = program.create_variable(Some(ValueType::Int), Some("b".into()));
    program.add_block(BasicBlock::new(
        vec![Instruction::Binary {
            receiver: a,
            operation: BinaryOperation::Add,
            operand_type: NumericOperandType::Int,
            first: a,
            second: b,
        }],
        Terminator::Exit { value: Some(a) },
    ));
    program
}

/// A program whose slots are `this` followed by `params`, ending in a bare return.
pub fn instance_program(params: &[ValueType]) -> Program {
    let mut program = Program::new();
    program.create_variable(None, Some("this".into()));
    for (i, param) in params.iter().enumerate() {
        program.create_variable(Some(param.clone()), Some(format!("p{}", i)));
    }
    program.add_block(BasicBlock::new(vec![], Terminator::Exit { value: None }));
    program
}

/// A program with no variables that just returns.
pub fn empty_program() -> Program {
    let mut program = Program::new();
    program.add_block(BasicBlock::new(vec![], Terminator::Exit { value: None }));
    program
}

/// Give `class` an empty static initializer.
pub fn add_clinit(class: &mut ClassHolder) {
    class.add_method(descriptor("<clinit>()V"), MethodAccessFlags::STATIC, Some(empty_program()));
}

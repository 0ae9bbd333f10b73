use super::types::{MethodReference, ValueType};

/// Index of a basic block inside a [`Program`]. Block 0 is the entry.
pub type BlockId = usize;

/// A variable slot of a program. Slot numbering is shared with the
/// decompiled variable list, so slot 0 of an instance method is the receiver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub usize);

impl Variable {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Declared information about a variable slot.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct VariableInfo {
    pub ty: Option<ValueType>,
    pub debug_name: Option<String>,
}

/// Literal values.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Null,
}

/// Arithmetic operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
}

/// Operand kind of a numeric instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericOperandType {
    Int,
    Long,
    Float,
    Double,
}

/// A field owned by some class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldReference {
    pub class_name: String,
    pub field_name: String,
}

impl FieldReference {
    pub fn new(class_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            field_name: field_name.into(),
        }
    }
}

/// A non-terminating instruction of a basic block.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Constant {
        receiver: Variable,
        value: Constant,
    },
    Assign {
        receiver: Variable,
        assignee: Variable,
    },
    Binary {
        receiver: Variable,
        operation: BinaryOperation,
        operand_type: NumericOperandType,
        first: Variable,
        second: Variable,
    },
    Negate {
        receiver: Variable,
        operand_type: NumericOperandType,
        operand: Variable,
    },
    /// A resolved call. `instance` is `None` for static calls.
    Invoke {
        receiver: Option<Variable>,
        instance: Option<Variable>,
        method: MethodReference,
        arguments: Vec<Variable>,
    },
    GetField {
        receiver: Variable,
        instance: Option<Variable>,
        field: FieldReference,
        field_type: ValueType,
    },
    PutField {
        instance: Option<Variable>,
        field: FieldReference,
        field_type: ValueType,
        value: Variable,
    },
    /// Ensures `class_name` has run its static initializer.
    InitClass { class_name: String },
    /// Lowered form of [`Instruction::InitClass`]: stores whether the class is
    /// already initialized into `receiver`.
    IsClassInitialized {
        receiver: Variable,
        class_name: String,
    },
}

impl Instruction {
    /// Class whose initialization this instruction checks, if any.
    pub fn initialized_class(&self) -> Option<&str> {
        match self {
            Instruction::InitClass { class_name }
            | Instruction::IsClassInitialized { class_name, .. } => Some(class_name),
            _ => None,
        }
    }
}

/// How a basic block ends.
#[derive(Clone, Debug, PartialEq)]
pub enum Terminator {
    Jump {
        target: BlockId,
    },
    Branch {
        condition: Variable,
        consequent: BlockId,
        alternative: BlockId,
    },
    Exit {
        value: Option<Variable>,
    },
}

impl Terminator {
    /// Blocks control can move to, without duplicates.
    pub fn targets(&self) -> Vec<BlockId> {
        match *self {
            Terminator::Jump { target } => vec![target],
            Terminator::Branch {
                consequent,
                alternative,
                ..
            } if consequent == alternative => vec![consequent],
            Terminator::Branch {
                consequent,
                alternative,
                ..
            } => vec![consequent, alternative],
            Terminator::Exit { .. } => Vec::new(),
        }
    }
}

/// A basic block in the program.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicBlock {
    pub instructions: Vec<Instruction>,
    pub terminator: Terminator,
}

impl BasicBlock {
    pub fn new(instructions: Vec<Instruction>, terminator: Terminator) -> Self {
        Self {
            instructions,
            terminator,
        }
    }
}

/// The control flow graph of a single method body.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub blocks: Vec<BasicBlock>,
    pub variables: Vec<VariableInfo>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_block(&mut self, block: BasicBlock) -> BlockId {
        self.blocks.push(block);
        self.blocks.len() - 1
    }

    pub fn create_variable(&mut self, ty: Option<ValueType>, debug_name: Option<String>) -> Variable {
        self.variables.push(VariableInfo { ty, debug_name });
        Variable(self.variables.len() - 1)
    }

    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id]
    }

    pub fn entry_block_mut(&mut self) -> Option<&mut BasicBlock> {
        self.blocks.first_mut()
    }

    pub fn successors(&self, block_id: BlockId) -> Vec<BlockId> {
        self.blocks[block_id].terminator.targets()
    }

    /// Incoming edges of every block, indexed by block.
    pub fn predecessor_lists(&self) -> Vec<Vec<BlockId>> {
        let mut lists = vec![Vec::new(); self.blocks.len()];
        for (source, block) in self.blocks.iter().enumerate() {
            for target in block.terminator.targets() {
                lists[target].push(source);
            }
        }
        lists
    }

    /// Blocks reachable from the entry, each one placed before its successors
    /// except along back edges.
    pub fn reverse_postorder(&self) -> Vec<BlockId> {
        let mut order = Vec::with_capacity(self.blocks.len());
        if self.blocks.is_empty() {
            return order;
        }

        let mut visited = vec![false; self.blocks.len()];
        visited[0] = true;
        // (block, index of the next successor to explore)
        let mut stack = vec![(0, 0)];
        while let Some(top) = stack.last_mut() {
            let (block, next) = *top;
            match self.successors(block).get(next) {
                Some(&target) => {
                    top.1 += 1;
                    if !visited[target] {
                        visited[target] = true;
                        stack.push((target, 0));
                    }
                }
                None => {
                    stack.pop();
                    order.push(block);
                }
            }
        }
        order.reverse();
        order
    }

    /// Immediate dominator of every block, indexed by block. The entry is its
    /// own dominator and unreachable blocks have none.
    pub fn immediate_dominators(&self) -> Vec<Option<BlockId>> {
        let mut dominators = vec![None; self.blocks.len()];
        let order = self.reverse_postorder();
        if order.is_empty() {
            return dominators;
        }

        let mut position = vec![None; self.blocks.len()];
        for (i, &block) in order.iter().enumerate() {
            position[block] = Some(i);
        }
        let predecessors = self.predecessor_lists();

        // Works on reverse postorder positions, so a dominator always has a smaller position.
        let mut idom: Vec<Option<usize>> = vec![None; order.len()];
        idom[0] = Some(0);
        let mut changed = true;
        while changed {
            changed = false;
            for i in 1..order.len() {
                let processed = predecessors[order[i]]
                    .iter()
                    .filter_map(|&p| position[p])
                    .filter(|&p| idom[p].is_some());
                let candidate = processed.fold(None, |found, p| match found {
                    None => Some(p),
                    Some(current) => Some(nearest_common_dominator(&idom, current, p)),
                });
                if candidate.is_some() && idom[i] != candidate {
                    idom[i] = candidate;
                    changed = true;
                }
            }
        }

        for (i, dominator) in idom.into_iter().enumerate() {
            dominators[order[i]] = dominator.map(|d| order[d]);
        }
        dominators
    }
}

fn nearest_common_dominator(idom: &[Option<usize>], mut a: usize, mut b: usize) -> usize {
    while a != b {
        while a > b {
            a = idom[a].unwrap_or(0);
        }
        while b > a {
            b = idom[b].unwrap_or(0);
        }
    }
    a
}

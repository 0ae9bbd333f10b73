use crate::model::{BasicBlock, Instruction, MethodReference, Program, Terminator, ValueType};

use super::ProgramTransform;

/// Lowers each remaining `InitClass` into a test of the class's
/// initialization flag and a conditional call of its `<clinit>`.
///
/// The block holding the check is split in three: the head keeps the
/// instructions before the check and ends in a branch on the flag, the init
/// block calls the initializer, and the continuation holds the rest of the
/// original block along with its terminator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassInitializerTransformer;

impl ClassInitializerTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl ProgramTransform for ClassInitializerTransformer {
    fn apply(&self, program: &mut Program) {
        // Continuations are appended to the end, so they get visited by this same loop.
        let mut block_id = 0;
        while block_id < program.blocks.len() {
            let found = program.blocks[block_id]
                .instructions
                .iter()
                .enumerate()
                .find_map(|(i, instruction)| match instruction {
                    Instruction::InitClass { class_name } => Some((i, class_name.clone())),
                    _ => None,
                });
            let Some((position, class_name)) = found else {
                block_id += 1;
                continue;
            };

            let head = &mut program.blocks[block_id];
            let rest = head.instructions.split_off(position + 1);
            head.instructions.truncate(position);
            let terminator = std::mem::replace(&mut head.terminator, Terminator::Exit { value: None });

            log::trace!("B{}: lowering init of {}", block_id, class_name);

            let flag = program.create_variable(Some(ValueType::Boolean), None);
            let continuation = program.add_block(BasicBlock::new(rest, terminator));
            let init = program.add_block(BasicBlock::new(
                vec![Instruction::Invoke {
                    receiver: None,
                    instance: None,
                    method: MethodReference::class_initializer(class_name.clone()),
                    arguments: Vec::new(),
                }],
                Terminator::Jump { target: continuation },
            ));

            let head = &mut program.blocks[block_id];
            head.instructions.push(Instruction::IsClassInitialized {
                receiver: flag,
                class_name,
            });
            head.terminator = Terminator::Branch {
                condition: flag,
                consequent: continuation,
                alternative: init,
            };
            block_id += 1;
        }
    }
}

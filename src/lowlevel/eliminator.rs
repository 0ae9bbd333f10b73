use std::collections::{HashMap, HashSet};

use crate::generate::ClassInitializerInfo;
use crate::model::{BlockId, Instruction, Program};

use super::ProgramTransform;

/// Removes `InitClass` checks that can never trigger an initializer.
///
/// A check is dropped when the class has no static initializer, or when the
/// same class was already checked earlier in the block or in a dominating
/// block.
pub struct ClassInitializerEliminator<'a> {
    class_info: &'a dyn ClassInitializerInfo,
}

impl<'a> ClassInitializerEliminator<'a> {
    pub fn new(class_info: &'a dyn ClassInitializerInfo) -> Self {
        Self { class_info }
    }
}

impl ProgramTransform for ClassInitializerEliminator<'_> {
    fn apply(&self, program: &mut Program) {
        let dominators = program.immediate_dominators();
        let mut initialized_at_exit: HashMap<BlockId, HashSet<String>> = HashMap::new();

        // Reverse postorder visits every immediate dominator before the blocks it dominates.
        for block_id in program.reverse_postorder() {
            let mut initialized = match dominators[block_id] {
                Some(idom) if idom != block_id => initialized_at_exit.get(&idom).cloned().unwrap_or_default(),
                _ => HashSet::new(),
            };

            program.blocks[block_id].instructions.retain(|instruction| match instruction {
                Instruction::InitClass { class_name } => {
                    if !self.class_info.has_static_initializer(class_name) {
                        log::trace!("B{}: dropping init of {} (no initializer)", block_id, class_name);
                        false
                    } else if !initialized.insert(class_name.clone()) {
                        log::trace!("B{}: dropping redundant init of {}", block_id, class_name);
                        false
                    } else {
                        true
                    }
                }
                Instruction::IsClassInitialized { class_name, .. } => {
                    initialized.insert(class_name.clone());
                    true
                }
                _ => true,
            });

            initialized_at_exit.insert(block_id, initialized);
        }
    }
}

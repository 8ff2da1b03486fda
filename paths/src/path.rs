use crate::instruction::*;

use std::fmt;

///
/// Identifier of a path within a collection
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(pub u64);

///
/// An ordered list of instructions that is drawn as a single shape
///
/// The order of the instructions is the order they are replayed in when the path is rendered.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    id:             PathId,
    instructions:   Vec<Instruction>,
    deleted:        bool
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Path {
    ///
    /// Creates an empty path
    ///
    pub fn new(id: PathId) -> Path {
        Path {
            id:             id,
            instructions:   vec![],
            deleted:        false
        }
    }

    ///
    /// Creates a path from a list of instructions
    ///
    pub fn with_instructions<TIter: IntoIterator<Item=Instruction>>(id: PathId, instructions: TIter) -> Path {
        Path {
            id:             id,
            instructions:   instructions.into_iter().collect(),
            deleted:        false
        }
    }

    #[inline] pub fn id(&self) -> PathId { self.id }
    #[inline] pub fn instructions(&self) -> &[Instruction] { &self.instructions }
    #[inline] pub fn len(&self) -> usize { self.instructions.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.instructions.is_empty() }

    ///
    /// Retrieves the instruction at an index so its arguments can be edited
    ///
    #[inline]
    pub fn instruction_mut(&mut self, index: usize) -> Option<&mut Instruction> {
        self.instructions.get_mut(index)
    }

    ///
    /// Adds an instruction to the end of this path
    ///
    pub fn append(&mut self, instruction: Instruction) -> &mut Path {
        self.instructions.push(instruction);
        self
    }

    ///
    /// Inserts an instruction before the instruction at the specified index (or at the end if the index is past the end)
    ///
    pub fn insert_at(&mut self, index: usize, instruction: Instruction) -> &mut Path {
        let index = index.min(self.instructions.len());
        self.instructions.insert(index, instruction);
        self
    }

    ///
    /// Removes the instruction at the specified index, returning it
    ///
    pub fn remove_at(&mut self, index: usize) -> Option<Instruction> {
        if index < self.instructions.len() {
            Some(self.instructions.remove(index))
        } else {
            None
        }
    }

    ///
    /// Swaps the instruction at an index with the one before it, returning false if there is no earlier instruction
    ///
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.instructions.len() {
            return false;
        }

        self.instructions.swap(index - 1, index);
        true
    }

    ///
    /// Swaps the instruction at an index with the one after it, returning false if there is no later instruction
    ///
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.instructions.len() {
            return false;
        }

        self.instructions.swap(index, index + 1);
        true
    }

    ///
    /// Flags this path for removal: it will be swept out of its collection on the next render or export pass
    ///
    #[inline] pub fn mark_deleted(&mut self) { self.deleted = true; }

    /// True if this path is waiting to be removed from its collection
    #[inline] pub fn is_deleted(&self) -> bool { self.deleted }
}

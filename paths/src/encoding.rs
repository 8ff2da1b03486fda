use crate::arg::*;
use crate::path::*;
use crate::instruction::*;

///
/// Trait implemented by objects that can be written to the flat encoding used for persistence
///
/// The flat encoding of an instruction is its identifier followed by its argument values. Instructions
/// are concatenated with no separators, so a decoder needs the catalog to know where each one ends.
///
pub trait FlatEncoding {
    ///
    /// Encodes this item by appending it to the specified buffer
    ///
    fn encode_flat(&self, append_to: &mut Vec<ArgValue>);
}

impl FlatEncoding for Instruction {
    fn encode_flat(&self, append_to: &mut Vec<ArgValue>) {
        append_to.push(ArgValue::Number(self.id().0 as f64));
        append_to.extend(self.values().iter().cloned());
    }
}

impl FlatEncoding for Path {
    fn encode_flat(&self, append_to: &mut Vec<ArgValue>) {
        for instruction in self.instructions() {
            instruction.encode_flat(append_to);
        }
    }
}

impl<A: FlatEncoding> FlatEncoding for [A] {
    fn encode_flat(&self, append_to: &mut Vec<ArgValue>) {
        for item in self.iter() {
            item.encode_flat(append_to);
        }
    }
}

impl Path {
    ///
    /// Returns the flat encoding of this path
    ///
    pub fn encode(&self) -> Vec<ArgValue> {
        let mut encoded = vec![];
        self.encode_flat(&mut encoded);
        encoded
    }
}

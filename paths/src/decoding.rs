use crate::arg::*;
use crate::path::*;
use crate::catalog::*;
use crate::instruction::*;

use thiserror::Error;

///
/// Possible error from the decoder
///
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum DecoderError {
    /// A value where an instruction identifier was expected was not a non-negative whole number
    #[error("expected an instruction identifier")]
    InvalidInstructionId,

    /// The identifier does not belong to any instruction in the catalog
    #[error("unknown instruction identifier {0}")]
    UnknownInstruction(InstructionId),

    /// An argument value was not valid for its argument (only reported by strict decoders)
    #[error("invalid value for argument {index} of instruction {instruction}")]
    InvalidArgument { instruction: InstructionId, index: usize },

    /// The data ended before all of the arguments of an instruction were read (only reported by strict decoders)
    #[error("missing value for argument {index} of instruction {instruction}")]
    MissingArgument { instruction: InstructionId, index: usize }
}

///
/// How a decoder deals with argument values that are missing or invalid
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeMode {
    /// Replace bad argument values with the argument's default
    Repair,

    /// Fail the whole path if any argument value is bad
    Strict
}

///
/// Decodes paths from their flat encoding using the definitions in a catalog
///
/// Only the instruction identifiers need to be intact: an identifier that can't be found in the catalog
/// makes it impossible to know how many values belong to the instruction, so it stops decoding. Bad
/// argument values are replaced by defaults unless the decoder is strict.
///
pub struct PathDecoder<'a> {
    catalog:    &'a InstructionCatalog,
    mode:       DecodeMode
}

impl Default for DecodeMode {
    fn default() -> DecodeMode {
        DecodeMode::Repair
    }
}

///
/// Reads an instruction identifier from a value
///
fn decode_instruction_id(value: &ArgValue) -> Result<InstructionId, DecoderError> {
    match value {
        ArgValue::Number(num) if num.fract() == 0.0 && *num >= 0.0 && *num <= u32::MAX as f64 => Ok(InstructionId(*num as u32)),
        _                                                                                   => Err(DecoderError::InvalidInstructionId)
    }
}

impl<'a> PathDecoder<'a> {
    ///
    /// Creates a decoder that repairs bad argument values
    ///
    pub fn new(catalog: &'a InstructionCatalog) -> PathDecoder<'a> {
        Self::with_mode(catalog, DecodeMode::Repair)
    }

    ///
    /// Creates a decoder that fails on any bad argument value
    ///
    pub fn strict(catalog: &'a InstructionCatalog) -> PathDecoder<'a> {
        Self::with_mode(catalog, DecodeMode::Strict)
    }

    ///
    /// Creates a decoder with the specified handling for bad argument values
    ///
    pub fn with_mode(catalog: &'a InstructionCatalog, mode: DecodeMode) -> PathDecoder<'a> {
        PathDecoder {
            catalog:    catalog,
            mode:       mode
        }
    }

    ///
    /// Decodes the next instruction from a stream of values, returning `None` once the stream is exhausted
    ///
    /// If the identifier is bad, nothing beyond it is read from the stream.
    ///
    pub fn decode_instruction<'b, TIter>(&self, data: &mut TIter) -> Result<Option<Instruction>, DecoderError>
    where
        TIter: Iterator<Item=&'b ArgValue>,
    {
        let id = match data.next() {
            Some(value) => decode_instruction_id(value)?,
            None        => return Ok(None)
        };

        let def = self.catalog.get_by_id(id)
            .ok_or(DecoderError::UnknownInstruction(id))?;

        let mut instruction = Instruction::new(def.clone());

        for (index, arg) in def.args().iter().enumerate() {
            match (data.next(), self.mode) {
                (Some(value), _) if arg.validate(value) => {
                    instruction.set_at(index, value.clone());
                }

                (Some(value), DecodeMode::Repair)       => {
                    warn!("Replacing invalid value {} for argument '{}' of {} with its default", value, arg.name(), def.name());
                }

                (None, DecodeMode::Repair)              => {
                    warn!("Data ended before argument '{}' of {}: using its default", arg.name(), def.name());
                }

                (Some(_), DecodeMode::Strict)           => return Err(DecoderError::InvalidArgument { instruction: id, index: index }),
                (None, DecodeMode::Strict)              => return Err(DecoderError::MissingArgument { instruction: id, index: index })
            }
        }

        Ok(Some(instruction))
    }

    ///
    /// Decodes a whole path from its flat encoding
    ///
    pub fn decode_path(&self, id: PathId, data: &[ArgValue]) -> Result<Path, DecoderError> {
        let mut path    = Path::new(id);
        let mut values  = data.iter();

        while let Some(instruction) = self.decode_instruction(&mut values)? {
            path.append(instruction);
        }

        Ok(path)
    }
}

impl Path {
    ///
    /// Decodes a path from its flat encoding, replacing bad argument values with their defaults
    ///
    pub fn decode(id: PathId, catalog: &InstructionCatalog, data: &[ArgValue]) -> Result<Path, DecoderError> {
        PathDecoder::new(catalog).decode_path(id, data)
    }
}

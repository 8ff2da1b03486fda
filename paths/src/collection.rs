use crate::arg::*;
use crate::path::*;
use crate::context::*;
use crate::catalog::*;
use crate::decoding::*;

use thiserror::Error;

use std::sync::*;

///
/// The working set of paths being edited
///
/// Paths are deleted in two steps: `mark_deleted()` flags a path and the next render pass (or an
/// explicit `sweep_deleted()`) removes every flagged path in a single retain pass, so the list is never
/// modified while it's being drawn.
///
#[derive(Clone, Debug)]
pub struct PathCollection {
    catalog:    Arc<InstructionCatalog>,
    paths:      Vec<Path>,
    next_id:    u64
}

///
/// Error from decoding a collection of paths
///
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error("could not decode path {path_index}: {error}")]
pub struct CollectionDecodeError {
    /// Index of the path that could not be decoded
    pub path_index: usize,

    /// Why the path could not be decoded
    #[source]
    pub error: DecoderError
}

impl PathCollection {
    ///
    /// Creates a collection with no paths in it
    ///
    pub fn new(catalog: Arc<InstructionCatalog>) -> PathCollection {
        PathCollection {
            catalog:    catalog,
            paths:      vec![],
            next_id:    0
        }
    }

    ///
    /// Creates a collection containing a single empty path (the initial state of the editor)
    ///
    pub fn with_empty_path(catalog: Arc<InstructionCatalog>) -> PathCollection {
        let mut collection = Self::new(catalog);
        collection.add_path();
        collection
    }

    /// The catalog used for the instructions in this collection
    #[inline] pub fn catalog(&self) -> &Arc<InstructionCatalog> { &self.catalog }

    /// The number of paths in this collection, including any that are waiting to be swept
    #[inline] pub fn len(&self) -> usize { self.paths.len() }

    /// True if there are no paths in this collection
    #[inline] pub fn is_empty(&self) -> bool { self.paths.is_empty() }

    fn allocate_id(&mut self) -> PathId {
        let id = PathId(self.next_id);
        self.next_id += 1;
        id
    }

    ///
    /// Adds a new empty path to the end of the collection
    ///
    pub fn add_path(&mut self) -> PathId {
        let id = self.allocate_id();
        self.paths.push(Path::new(id));
        id
    }

    #[inline]
    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.iter().find(|path| path.id() == id)
    }

    #[inline]
    pub fn path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.iter_mut().find(|path| path.id() == id)
    }

    ///
    /// Flags a path for deletion, returning false if there's no such path
    ///
    pub fn mark_deleted(&mut self, id: PathId) -> bool {
        match self.path_mut(id) {
            Some(path)  => { path.mark_deleted(); true }
            None        => false
        }
    }

    ///
    /// Removes every path that has been flagged for deletion, returning how many were removed
    ///
    pub fn sweep_deleted(&mut self) -> usize {
        let before = self.paths.len();
        self.paths.retain(|path| !path.is_deleted());

        let removed = before - self.paths.len();
        if removed > 0 {
            debug!("Swept {} deleted paths", removed);
        }

        removed
    }

    ///
    /// Iterates over the paths that are not flagged for deletion
    ///
    pub fn active_paths(&self) -> impl Iterator<Item=&Path> {
        self.paths.iter().filter(|path| !path.is_deleted())
    }

    ///
    /// Sweeps away deleted paths then replays the remaining paths against a surface, in order
    ///
    pub fn replay<TSurface>(&mut self, surface: &mut TSurface)
    where
        TSurface: DrawingSurface + ?Sized,
    {
        self.sweep_deleted();

        for path in self.paths.iter() {
            replay(path, surface);
        }
    }

    ///
    /// Encodes every path that is not flagged for deletion
    ///
    pub fn encode(&self) -> Vec<Vec<ArgValue>> {
        self.active_paths()
            .map(|path| path.encode())
            .collect()
    }

    ///
    /// Decodes a collection from the encodings of its paths
    ///
    /// Decoding stops at the first path that can't be decoded: there's no partial result, so the caller
    /// can decide whether to start again with an empty collection or to report the problem.
    ///
    pub fn decode(catalog: Arc<InstructionCatalog>, data: &[Vec<ArgValue>], mode: DecodeMode) -> Result<PathCollection, CollectionDecodeError> {
        let mut collection = PathCollection::new(Arc::clone(&catalog));

        {
            let decoder = PathDecoder::with_mode(&catalog, mode);

            for (path_index, path_data) in data.iter().enumerate() {
                let id      = collection.allocate_id();
                let path    = decoder.decode_path(id, path_data)
                    .map_err(|error| CollectionDecodeError { path_index, error })?;

                collection.paths.push(path);
            }
        }

        Ok(collection)
    }

    ///
    /// Serializes this collection as a JSON array of flat path encodings
    ///
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.encode())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::draw::*;

    use std::error::Error;

    fn catalog() -> Arc<InstructionCatalog> {
        Arc::new(InstructionCatalog::standard())
    }

    #[test]
    fn initial_collection_has_one_empty_path() {
        let collection = PathCollection::with_empty_path(catalog());

        assert!(collection.len() == 1);
        assert!(collection.active_paths().all(|path| path.is_empty()));
    }

    #[test]
    fn path_ids_are_unique() {
        let mut collection  = PathCollection::new(catalog());
        let first           = collection.add_path();
        let second          = collection.add_path();

        collection.mark_deleted(first);
        collection.sweep_deleted();
        let third           = collection.add_path();

        assert!(first != second);
        assert!(third != first && third != second);
    }

    #[test]
    fn deletion_is_deferred_until_sweep() {
        let mut collection  = PathCollection::new(catalog());
        let first           = collection.add_path();
        let second          = collection.add_path();

        assert!(collection.mark_deleted(first));
        assert!(collection.len() == 2);
        assert!(collection.active_paths().map(|path| path.id()).collect::<Vec<_>>() == vec![second]);

        assert!(collection.sweep_deleted() == 1);
        assert!(collection.len() == 1);
        assert!(collection.path(first).is_none());
        assert!(!collection.mark_deleted(first));
    }

    #[test]
    fn replay_sweeps_and_draws_remaining_paths() {
        let catalog         = catalog();
        let mut collection  = PathCollection::new(Arc::clone(&catalog));
        let first           = collection.add_path();
        let second          = collection.add_path();

        collection.path_mut(first).unwrap().append(catalog.create_instruction("closePath").unwrap());
        collection.path_mut(second).unwrap().append(catalog.create_instruction("moveTo").unwrap());
        collection.mark_deleted(first);

        let mut drawing = Vec::<Draw>::new();
        collection.replay(&mut drawing);

        assert!(collection.len() == 1);
        assert!(drawing == vec![Draw::PushState, Draw::NewPath, Draw::Path(PathOp::MoveTo(0.0, 0.0)), Draw::PopState]);
    }

    #[test]
    fn encode_skips_deleted_paths() {
        let catalog         = catalog();
        let mut collection  = PathCollection::new(Arc::clone(&catalog));
        let first           = collection.add_path();
        let second          = collection.add_path();

        collection.path_mut(first).unwrap().append(catalog.create_instruction("closePath").unwrap());
        collection.path_mut(second).unwrap().append(catalog.create_instruction("fill").unwrap());
        collection.mark_deleted(first);

        assert!(collection.to_json().unwrap() == "[[9,\"#000000\"]]");
    }

    #[test]
    fn decode_reports_failing_path() {
        let data = vec![vec![ArgValue::Number(8.0)], vec![ArgValue::Number(12.0)]];

        assert!(PathCollection::decode(catalog(), &data, DecodeMode::Repair).err() == Some(CollectionDecodeError { path_index: 1, error: DecoderError::UnknownInstruction(InstructionId(12)) }));
    }

    #[test]
    fn decode_error_names_failing_path() {
        let values: Vec<Vec<ArgValue>>  = serde_json::from_str("[[8], [\"moveTo\"]]").unwrap();
        let err                         = PathCollection::decode(catalog(), &values, DecodeMode::Repair).unwrap_err();

        assert!(err == CollectionDecodeError { path_index: 1, error: DecoderError::InvalidInstructionId });
        assert!(err.to_string() == "could not decode path 1: expected an instruction identifier");
        assert!(err.source().and_then(|cause| cause.downcast_ref::<DecoderError>()) == Some(&DecoderError::InvalidInstructionId));
    }
}

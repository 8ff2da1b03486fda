use flot_paths::*;

use std::fs;
use std::sync::*;
use std::path::{PathBuf};

fn catalog() -> Arc<InstructionCatalog> {
    Arc::new(InstructionCatalog::standard())
}

///
/// A directory for a single test that is removed when the test finishes
///
struct TempDirectory(PathBuf);

impl TempDirectory {
    fn new(name: &str) -> TempDirectory {
        let path = std::env::temp_dir().join(format!("flot_{}_{}", name, std::process::id()));
        fs::remove_dir_all(&path).ok();

        TempDirectory(path)
    }
}

impl Drop for TempDirectory {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.0).ok();
    }
}

fn triangle(catalog: &InstructionCatalog) -> Vec<Instruction> {
    let mut move_to = catalog.create_instruction("moveTo").unwrap();
    move_to.set("x", (-10).into());

    let mut line_1  = catalog.create_instruction("lineTo").unwrap();
    line_1.set("x", 10.into());

    let mut line_2  = catalog.create_instruction("lineTo").unwrap();
    line_2.set("y", 15.into());

    let mut fill    = catalog.create_instruction("fill").unwrap();
    fill.set("color", "#4080c0".into());

    vec![move_to, line_1, line_2, catalog.create_instruction("closePath").unwrap(), fill]
}

fn save_and_load<TStore: KeyValueStore>(store: &mut TStore) {
    let catalog         = catalog();
    let config          = EditorConfig::default();
    let mut collection  = PathCollection::with_empty_path(Arc::clone(&catalog));
    let first           = collection.active_paths().next().unwrap().id();
    let second          = collection.add_path();

    for instruction in triangle(&catalog) {
        collection.path_mut(first).unwrap().append(instruction);
    }
    collection.path_mut(second).unwrap().append(catalog.create_instruction("arc").unwrap());

    save_paths(store, &config.storage_key, &collection).unwrap();
    let loaded = load_paths(store, &config.storage_key, Arc::clone(&catalog)).unwrap();

    assert!(loaded.len() == 2);
    assert!(loaded.encode() == collection.encode());
}

#[test]
fn memory_store_round_trip() {
    save_and_load(&mut MemoryStore::new());
}

#[test]
fn file_store_round_trip() {
    let directory = TempDirectory::new("file_store_round_trip");

    save_and_load(&mut FileStore::new(&directory.0));

    assert!(directory.0.join("flotPathData.json").exists());
}

#[test]
fn missing_file_loads_one_empty_path() {
    let directory   = TempDirectory::new("missing_file");
    let store       = FileStore::new(&directory.0);
    let loaded      = load_paths(&store, "flotPathData", catalog()).unwrap();

    assert!(loaded.len() == 1);
    assert!(loaded.active_paths().all(|path| path.is_empty()));
}

#[test]
fn stored_format_is_array_of_flat_paths() {
    let catalog         = catalog();
    let mut store       = MemoryStore::new();
    let mut collection  = PathCollection::with_empty_path(Arc::clone(&catalog));
    let first           = collection.active_paths().next().unwrap().id();

    let mut move_to     = catalog.create_instruction("moveTo").unwrap();
    move_to.set("x", 10.into());
    move_to.set("y", 20.into());

    let mut fill        = catalog.create_instruction("fill").unwrap();
    fill.set("color", "#ff0000".into());

    collection.path_mut(first).unwrap().append(move_to).append(fill);
    save_paths(&mut store, "flotPathData", &collection).unwrap();

    assert!(store.read("flotPathData").unwrap() == Some("[[0,10,20,9,\"#ff0000\"]]".to_string()));
}

#[test]
fn deleted_paths_are_not_saved() {
    let catalog         = catalog();
    let mut store       = MemoryStore::new();
    let mut collection  = PathCollection::new(Arc::clone(&catalog));
    let first           = collection.add_path();
    let second          = collection.add_path();

    collection.path_mut(second).unwrap().append(catalog.create_instruction("closePath").unwrap());
    collection.mark_deleted(first);

    save_paths(&mut store, "flotPathData", &collection).unwrap();

    assert!(store.read("flotPathData").unwrap() == Some("[[8]]".to_string()));
    assert!(load_paths(&store, "flotPathData", catalog).unwrap().len() == 1);
}

#[test]
fn stored_empty_list_loads_no_paths() {
    let mut store = MemoryStore::new();
    store.write("flotPathData", "[]").unwrap();

    assert!(load_paths(&store, "flotPathData", catalog()).unwrap().is_empty());
}

#[test]
fn config_names_storage_key() {
    let config = EditorConfig::from_json("{ \"storage_key\": \"otherPaths\" }").unwrap();

    assert!(config.storage_key == "otherPaths");
    assert!(config.export == ExportSettings::default());
}

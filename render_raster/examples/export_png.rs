use flot_paths::*;
use flot_render_raster::*;

use std::env;
use std::sync::*;

///
/// Loads the stored paths from a directory (drawing a sample shape if there aren't any) and exports them as a PNG file
///
/// Usage: `cargo run --example export_png [directory]`
///
pub fn main() {
    let directory       = env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let config          = EditorConfig::default();
    let catalog         = Arc::new(InstructionCatalog::standard());
    let mut store       = FileStore::new(&directory);

    let mut collection  = load_paths(&store, &config.storage_key, Arc::clone(&catalog))
        .expect("Stored paths could not be loaded");

    // Draw a rounded shape into the first path if nothing has been drawn yet
    if collection.active_paths().all(|path| path.is_empty()) {
        let first_path  = collection.active_paths().next().map(|path| path.id());
        let path_id     = match first_path {
            Some(path_id)   => path_id,
            None            => collection.add_path()
        };
        let path        = collection.path_mut(path_id).unwrap();

        let mut move_to = catalog.create_instruction("moveTo").unwrap();
        move_to.set("x", (-30).into());
        move_to.set("y", (-30).into());

        let mut corner_1 = catalog.create_instruction("arcTo").unwrap();
        for (name, value) in vec![("x1", 30), ("y1", -30), ("x2", 30), ("y2", 30), ("radius", 10)] {
            corner_1.set(name, value.into());
        }

        let mut corner_2 = catalog.create_instruction("arcTo").unwrap();
        for (name, value) in vec![("x1", 30), ("y1", 30), ("x2", -30), ("y2", 30), ("radius", 10)] {
            corner_2.set(name, value.into());
        }

        let mut fill = catalog.create_instruction("fill").unwrap();
        fill.set("color", "#3366cc".into());

        let mut stroke = catalog.create_instruction("stroke").unwrap();
        stroke.set("color", "#000000".into());
        stroke.set("lineWidth", 2.into());

        path.append(move_to)
            .append(corner_1)
            .append(corner_2)
            .append(catalog.create_instruction("closePath").unwrap())
            .append(fill)
            .append(stroke);

        save_paths(&mut store, &config.storage_key, &collection).expect("Paths could not be saved");
    }

    let file = export_png_file(&collection, &config.export, &directory).expect("Export failed");
    println!("Exported {}", file.display());
}

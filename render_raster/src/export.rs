use crate::error::*;
use crate::surface::*;

use flot_paths::*;

use tiny_skia::{Pixmap};

///
/// Renders the paths in a collection that are not flagged for deletion
///
pub fn render_paths(collection: &PathCollection, width: u32, height: u32, transform: ViewTransform) -> Result<Pixmap, ExportError> {
    let mut surface = PixmapSurface::new(width, height, transform)?;

    for path in collection.active_paths() {
        replay(path, &mut surface);
    }

    Ok(surface.into_pixmap())
}

///
/// Renders the editor view of a collection: the outline of the frame is drawn first, then deleted paths
/// are swept away and the remaining paths are drawn over it
///
pub fn render_preview(collection: &mut PathCollection, width: u32, height: u32, settings: &ViewportSettings) -> Result<Pixmap, ExportError> {
    let transform   = ViewTransform::for_viewport(width as f32, height as f32, settings);
    let mut surface = PixmapSurface::new(width, height, transform)?;

    // The frame is drawn in frame units, one frame unit wide
    let half_frame = settings.frame_size / 2.0 / settings.authoring_scale;

    surface.push_state();
    surface.new_path();
    surface.rect(-half_frame, -half_frame, half_frame * 2.0, half_frame * 2.0);
    surface.stroke(Color::default(), 1.0 / settings.authoring_scale);
    surface.new_path();
    surface.pop_state();

    collection.replay(&mut surface);

    Ok(surface.into_pixmap())
}

#[cfg(feature="render_png")]
mod render_png {
    use super::*;

    use std::fs;
    use std::path::{Path, PathBuf};

    ///
    /// Renders a collection at the export size and encodes it as a PNG file
    ///
    pub fn export_png(collection: &PathCollection, settings: &ExportSettings) -> Result<Vec<u8>, ExportError> {
        let size    = settings.image_size;
        let pixmap  = render_paths(collection, size, size, ViewTransform::for_export(settings))?;

        info!("Exporting {} paths as a {}x{} PNG", collection.active_paths().count(), size, size);

        pixmap.encode_png()
            .map_err(|err| ExportError::Encode(err.to_string()))
    }

    ///
    /// Exports a collection as a PNG file called `settings.file_name` in a directory, returning where it was written
    ///
    pub fn export_png_file<TPath: AsRef<Path>>(collection: &PathCollection, settings: &ExportSettings, directory: TPath) -> Result<PathBuf, ExportError> {
        let png_data    = export_png(collection, settings)?;
        let file        = directory.as_ref().join(&settings.file_name);

        fs::create_dir_all(directory.as_ref())?;
        fs::write(&file, png_data)?;

        Ok(file)
    }
}

#[cfg(feature="render_png")]
pub use render_png::*;

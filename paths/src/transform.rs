use crate::config::*;

///
/// Maps authoring coordinates onto pixels: a uniform scale followed by an offset
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale:  f32,
    pub offset: (f32, f32)
}

impl ViewTransform {
    ///
    /// The identity transform
    ///
    pub fn identity() -> ViewTransform {
        ViewTransform {
            scale:  1.0,
            offset: (0.0, 0.0)
        }
    }

    ///
    /// The transform used when exporting: the origin is at the centre of the image and `units_across`
    /// authoring units span its width
    ///
    pub fn for_export(settings: &ExportSettings) -> ViewTransform {
        let size = settings.image_size as f32;

        ViewTransform {
            scale:  size / settings.units_across,
            offset: (size / 2.0, size / 2.0)
        }
    }

    ///
    /// The transform used to show the paths in a window of the specified size (in pixels)
    ///
    pub fn for_viewport(width: f32, height: f32, settings: &ViewportSettings) -> ViewTransform {
        // Scale the window so that the reference size fills it
        let window_scale = if height > width {
            height / settings.reference_height
        } else {
            width / settings.reference_width
        };

        // Fit the frame (minus its margin) into the shorter side of the window
        let frame_scale = (width.min(height) * window_scale - settings.frame_margin) / settings.frame_size;

        ViewTransform {
            scale:  window_scale * frame_scale * settings.authoring_scale,
            offset: (width / 2.0, height / 2.0)
        }
    }

    ///
    /// Maps a point in authoring coordinates to pixels
    ///
    #[inline]
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.offset.0, y * self.scale + self.offset.1)
    }
}

impl Default for ViewTransform {
    fn default() -> ViewTransform {
        ViewTransform::identity()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn export_origin_is_centre() {
        let transform = ViewTransform::for_export(&ExportSettings::default());

        assert!(transform.transform_point(0.0, 0.0) == (1024.0, 1024.0));

        let (x, y) = transform.transform_point(50.0, -50.0);
        assert!((x - 2048.0).abs() < 1e-3);
        assert!(y.abs() < 1e-3);
    }

    #[test]
    fn viewport_at_reference_size() {
        let settings    = ViewportSettings::default();
        let transform   = ViewTransform::for_viewport(1920.0, 1080.0, &settings);

        // 1080 pixels tall with a 10 pixel margin, fitted from a 2048 frame, then 10.24 frame units per authoring unit
        let expected    = (1080.0 - 10.0) / 2048.0 * 10.24;

        assert!((transform.scale - expected).abs() < 1e-5);
        assert!(transform.offset == (960.0, 540.0));
    }

    #[test]
    fn viewport_in_portrait() {
        let settings    = ViewportSettings::default();
        let transform   = ViewTransform::for_viewport(1080.0, 2160.0, &settings);
        let expected    = 2.0 * (1080.0 * 2.0 - 10.0) / 2048.0 * 10.24;

        assert!((transform.scale - expected).abs() < 1e-4);
    }
}

//! JSON hand-off of render requests to an external map tool.

use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use salesman_core::{PathRenderer, RenderRequest};
use serde::Serialize;

use crate::{DataError, fs};

/// The JSON document written for a map tool: the request plus the point
/// the map should be centred on.
#[derive(Debug, Serialize)]
pub struct MapDocument<'a> {
    /// Centre of the padded bounds, `x = longitude`.
    pub center: Coord<f64>,
    /// The request being drawn.
    #[serde(flatten)]
    pub request: &'a RenderRequest,
}

impl<'a> MapDocument<'a> {
    /// Wrap `request`, centring on its bounds.
    #[must_use]
    pub fn new(request: &'a RenderRequest) -> Self {
        Self {
            center: request.bounds.center(),
            request,
        }
    }
}

/// Writes each request as pretty-printed JSON to a fixed path.
///
/// # Examples
/// ```no_run
/// use salesman_core::test_support::square_tour;
/// use salesman_core::{PathRenderer, RenderRequest};
/// use salesman_data::JsonRenderer;
///
/// let renderer = JsonRenderer::new("out/tsp_map.json");
/// let written = renderer.render(&RenderRequest::from_tour(&square_tour()))?;
/// assert_eq!(written, "out/tsp_map.json");
/// # Ok::<(), salesman_data::DataError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    path: Utf8PathBuf,
}

impl JsonRenderer {
    /// Render to `path`, creating parent directories as needed.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl PathRenderer for JsonRenderer {
    type Output = Utf8PathBuf;
    type Error = DataError;

    fn render(&self, request: &RenderRequest) -> Result<Self::Output, Self::Error> {
        let open_error = |source| DataError::Open {
            path: self.path.clone(),
            source,
        };
        let file = fs::create_utf8_file(&self.path).map_err(open_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &MapDocument::new(request)).map_err(
            |source| DataError::Json {
                path: self.path.clone(),
                source,
            },
        )?;
        writer.flush().map_err(open_error)?;
        log::info!(
            "wrote map of {} stops to {}",
            request.markers.len(),
            self.path
        );
        Ok(self.path.clone())
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "fixtures should fail fast during setup")]
mod tests {
    use super::*;
    use rstest::rstest;
    use salesman_core::test_support::square_tour;

    #[rstest]
    fn documents_are_centred_on_the_bounds() {
        let request = RenderRequest::from_tour(&square_tour());
        let document = MapDocument::new(&request);
        let value = serde_json::to_value(&document).expect("json");
        let center = &value["center"];
        assert!((center["x"].as_f64().expect("x") - 0.05).abs() < 1e-9);
        assert!((center["y"].as_f64().expect("y") - 0.05).abs() < 1e-9);
        assert_eq!(value["segments"].as_array().expect("segments").len(), 4);
        assert!(value["total_km"].is_f64());
    }

    #[rstest]
    fn renders_into_nested_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8");
        let renderer = JsonRenderer::new(root.join("maps/tsp_map.json"));
        let written = renderer
            .render(&RenderRequest::from_tour(&square_tour()))
            .expect("rendered");
        let text = std::fs::read_to_string(&written).expect("read back");
        assert!(text.contains("\"label\""));
        assert!(text.contains(" K.M.\""));
    }
}

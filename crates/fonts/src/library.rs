use crate::builtin::BuiltinFace;
use crate::truetype::TrueTypeFace;
use petty_traits::{FontError, FontHandle, FontProvider};
use petty_types::FontStyle;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// A registered face of either kind.
#[derive(Debug, Clone)]
pub enum FontFace {
    Builtin(BuiltinFace),
    TrueType(TrueTypeFace),
}

impl FontFace {
    pub fn postscript_name(&self) -> &str {
        match self {
            FontFace::Builtin(face) => face.postscript_name(),
            FontFace::TrueType(face) => face.postscript_name(),
        }
    }

    pub fn family(&self) -> &str {
        match self {
            FontFace::Builtin(face) => face.family(),
            FontFace::TrueType(face) => face.family(),
        }
    }

    pub fn style(&self) -> FontStyle {
        match self {
            FontFace::Builtin(face) => face.style(),
            FontFace::TrueType(face) => face.style(),
        }
    }
}

/// Thread-safe registry of font faces, addressed by [`FontHandle`].
///
/// Handles are indices into the registry and stay valid for the lifetime of
/// the library; registering a face for a (family, style) pair that is already
/// taken shadows the earlier face for new lookups.
#[derive(Debug, Clone, Default)]
pub struct FontLibrary {
    faces: Arc<RwLock<Vec<FontFace>>>,
}

impl FontLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a library holding the built-in Helvetica and Courier faces.
    pub fn with_standard_fonts() -> Self {
        let library = Self::new();
        for face in BuiltinFace::standard_faces() {
            library.register(FontFace::Builtin(face));
        }
        library
    }

    pub fn register(&self, face: FontFace) -> FontHandle {
        let mut faces = match self.faces.write() {
            Ok(faces) => faces,
            Err(poisoned) => poisoned.into_inner(),
        };
        log::debug!(
            "Registering font '{}' as {} {}",
            face.postscript_name(),
            face.family(),
            face.style()
        );
        faces.push(face);
        FontHandle((faces.len() - 1) as u32)
    }

    /// Parses and registers the first face in `data`.
    pub fn add_font_data(&self, data: Vec<u8>) -> Result<FontHandle, FontError> {
        let face = TrueTypeFace::parse(Arc::new(data), 0)?;
        Ok(self.register(FontFace::TrueType(face)))
    }

    pub fn add_font_file<P: AsRef<Path>>(&self, path: P) -> Result<FontHandle, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| FontError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.add_font_data(data)
    }

    /// Registers every `.ttf` and `.otf` file directly inside `dir`.
    ///
    /// Files that fail to parse are skipped with a warning. Returns the number
    /// of faces registered.
    pub fn add_font_dir<P: AsRef<Path>>(&self, dir: P) -> Result<usize, FontError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| FontError::LoadFailed {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"));
            if !is_font {
                continue;
            }
            match self.add_font_file(&path) {
                Ok(_) => loaded += 1,
                Err(e) => log::warn!("Skipping font {}: {}", path.display(), e),
            }
        }
        log::debug!("Loaded {} fonts from {}", loaded, dir.display());
        Ok(loaded)
    }

    /// Registers the fonts installed on this system.
    ///
    /// Only available with the `system-fonts` feature enabled.
    #[cfg(feature = "system-fonts")]
    pub fn load_system_fonts(&self) -> usize {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let ids: Vec<fontdb::ID> = db.faces().map(|face| face.id).collect();
        let mut loaded = 0;
        for id in ids {
            let parsed = db.with_face_data(id, |data, index| {
                TrueTypeFace::parse(Arc::new(data.to_vec()), index)
            });
            match parsed {
                Some(Ok(face)) => {
                    self.register(FontFace::TrueType(face));
                    loaded += 1;
                }
                Some(Err(e)) => log::debug!("Skipping system font {:?}: {}", id, e),
                None => log::debug!("System font {:?} has no readable data", id),
            }
        }
        log::debug!("Loaded {} system fonts", loaded);
        loaded
    }

    pub fn len(&self) -> usize {
        self.read().map(|faces| faces.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<FontFace>>, FontError> {
        self.faces.read().map_err(|_| FontError::LoadFailed {
            path: "font registry".to_string(),
            message: "lock poisoned".to_string(),
        })
    }

    fn with_face<T>(
        &self,
        handle: FontHandle,
        f: impl FnOnce(&FontFace) -> Result<T, FontError>,
    ) -> Result<T, FontError> {
        let faces = self.read()?;
        let face = faces
            .get(handle.0 as usize)
            .ok_or(FontError::InvalidHandle(handle))?;
        f(face)
    }
}

impl FontProvider for FontLibrary {
    fn resolve_font_handle(&self, family: &str, style: FontStyle) -> Result<FontHandle, FontError> {
        let faces = self.read()?;
        faces
            .iter()
            .rposition(|face| face.style() == style && face.family().eq_ignore_ascii_case(family))
            .map(|index| FontHandle(index as u32))
            .ok_or_else(|| FontError::NotFound {
                family: family.to_string(),
                style,
            })
    }

    fn font_name(&self, handle: FontHandle) -> Result<String, FontError> {
        self.with_face(handle, |face| Ok(face.postscript_name().to_string()))
    }

    fn advance_width(&self, handle: FontHandle, text: &str, size: f32) -> Result<f32, FontError> {
        self.with_face(handle, |face| match face {
            FontFace::Builtin(face) => Ok(face.advance_width(text, size)),
            FontFace::TrueType(face) => face.advance_width(text, size),
        })
    }

    fn line_height(&self, handle: FontHandle, size: f32) -> Result<f32, FontError> {
        self.with_face(handle, |face| {
            Ok(match face {
                FontFace::Builtin(face) => face.line_height(size),
                FontFace::TrueType(face) => face.line_height(size),
            })
        })
    }

    fn ascent(&self, handle: FontHandle, size: f32) -> Result<f32, FontError> {
        self.with_face(handle, |face| {
            Ok(match face {
                FontFace::Builtin(face) => face.ascent(size),
                FontFace::TrueType(face) => face.ascent(size),
            })
        })
    }

    fn families(&self) -> Vec<String> {
        let Ok(faces) = self.read() else {
            return Vec::new();
        };
        let mut families: Vec<String> = Vec::new();
        for face in faces.iter() {
            if !families.iter().any(|f| f == face.family()) {
                families.push(face.family().to_string());
            }
        }
        families
    }
}

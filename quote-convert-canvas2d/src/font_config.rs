//! Font configuration.
//!
//! The quote renderer draws with named families ("Poppins", "Playfair
//! Display", ...) that a browser would fetch from a web-font service. In a
//! headless render the families must already be present in the font
//! database: system fonts, extra font directories, or font files registered
//! explicitly. A family that cannot be resolved falls back to the generic
//! sans-serif mapping at draw time, never an error.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Describes the fonts available to a canvas, using only standard library
/// types. Converted into a concrete `fontdb::Database` via
/// [`font_config_to_fontdb`], or resolved once and shared via
/// [`FontConfig::resolve`].
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Custom font data to register (font file bytes).
    pub custom_fonts: Vec<CustomFont>,
    /// Mappings from generic CSS family names to concrete font family names.
    pub generic_families: GenericFamilyMap,
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

impl FontConfig {
    /// Resolve this configuration into a concrete font database.
    ///
    /// This performs the expensive work (system font scanning, directory
    /// loading, custom font registration) once. The resulting
    /// [`ResolvedFontConfig`] can be cloned cheaply to create multiple canvas
    /// contexts without repeating the filesystem scan — the preview-size and
    /// export-size renders of the same settings share one resolved config.
    pub fn resolve(&self) -> ResolvedFontConfig {
        ResolvedFontConfig::new(self)
    }
}

/// A custom font to register: raw TTF/OTF file bytes, Arc-wrapped for cheap cloning.
#[derive(Clone, Debug)]
pub struct CustomFont {
    /// Raw font file data.
    pub data: Arc<Vec<u8>>,
}

/// Mappings from generic CSS family names to concrete font family names, in priority order.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    /// Concrete fonts for CSS "serif" (priority order).
    pub serif: Vec<String>,
    /// Concrete fonts for CSS "sans-serif" (priority order).
    pub sans_serif: Vec<String>,
    /// Concrete fonts for CSS "monospace" (priority order).
    pub monospace: Vec<String>,
}

impl GenericFamilyMap {
    /// Returns the default generic family mappings matching browser behavior.
    pub fn defaults() -> Self {
        Self {
            sans_serif: vec!["Arial".into(), "Helvetica".into(), "Liberation Sans".into()],
            serif: vec![
                "Times New Roman".into(),
                "Times".into(),
                "Liberation Serif".into(),
                "DejaVu Serif".into(),
            ],
            monospace: vec![
                "Courier New".into(),
                "Courier".into(),
                "Liberation Mono".into(),
                "DejaVu Sans Mono".into(),
            ],
        }
    }
}

/// A [`FontConfig`] that has been resolved into a concrete font database.
///
/// Opaque wrapper so the fontdb backend does not leak through the public
/// API. Cloning clones the in-memory database (no filesystem scan).
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
}

impl ResolvedFontConfig {
    /// Resolve a [`FontConfig`] into a concrete font database.
    pub fn new(config: &FontConfig) -> Self {
        Self {
            fontdb: font_config_to_fontdb(config),
        }
    }

    /// Number of font faces available.
    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }
}

impl Clone for ResolvedFontConfig {
    fn clone(&self) -> Self {
        Self {
            fontdb: self.fontdb.clone(),
        }
    }
}

/// Convert a [`FontConfig`] into a [`fontdb::Database`].
pub fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    // Load system fonts if requested
    if config.load_system_fonts {
        db.load_system_fonts();
    }

    // Scan additional font directories
    for dir in &config.font_dirs {
        db.load_fonts_dir(dir);
    }

    // Load custom font data
    for font in &config.custom_fonts {
        db.load_font_data(Vec::from(font.data.as_slice()));
    }

    // Apply generic family mappings
    apply_generic_families(&mut db, &config.generic_families);

    db
}

/// Apply generic family mappings to a fontdb database, choosing the first
/// available family from each priority list.
fn apply_generic_families(db: &mut fontdb::Database, families: &GenericFamilyMap) {
    // Collect all available font family names
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| {
            face.families
                .iter()
                .map(|(fam, _lang)| fam.clone())
                .collect::<Vec<_>>()
        })
        .collect();

    for family in &families.sans_serif {
        if available.contains(family) {
            db.set_sans_serif_family(family);
            break;
        }
    }

    for family in &families.serif {
        if available.contains(family) {
            db.set_serif_family(family);
            break;
        }
    }

    for family in &families.monospace {
        if available.contains(family) {
            db.set_monospace_family(family);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_config() {
        let config = FontConfig::default();
        assert!(config.custom_fonts.is_empty());
        assert!(config.load_system_fonts);
        assert!(config.font_dirs.is_empty());
        assert_eq!(config.generic_families.sans_serif[0], "Arial");
    }

    #[test]
    fn test_font_config_to_fontdb_no_system_fonts() {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        let db = font_config_to_fontdb(&config);
        // With no system fonts and no custom fonts, database should have no faces
        assert_eq!(db.faces().count(), 0);
    }

    #[test]
    fn test_custom_font_clone_is_cheap() {
        let data = Arc::new(vec![0u8; 1000]);
        let config = FontConfig {
            custom_fonts: vec![CustomFont { data: data.clone() }],
            ..FontConfig::default()
        };
        let cloned = config.clone();
        // Arc should share the same allocation
        assert!(Arc::ptr_eq(
            &config.custom_fonts[0].data,
            &cloned.custom_fonts[0].data
        ));
    }
}

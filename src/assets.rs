//! Read-only assets bundled into the executable.
//!
//! Assets are looked up by logical name once at worker startup and handed out
//! as immutable byte slices; decoders own everything derived from them.

use crate::error::AssetError;

/// Embedded asset table: (logical name, bytes)
const EMBEDDED: &[(&str, &[u8])] = &[
    ("sound.wav", include_bytes!("../assets/sound.wav") as &[u8]),
    ("DejaVuSans.ttf", include_bytes!("../assets/DejaVuSans.ttf") as &[u8]),
];

/// Asset loader over a fixed name → bytes table
#[derive(Clone, Copy)]
pub struct Assets {
    entries: &'static [(&'static str, &'static [u8])],
}

impl Assets {
    /// Loader over the assets compiled into this binary
    pub fn embedded() -> Self {
        Self { entries: EMBEDDED }
    }

    /// Loader over an arbitrary static table
    pub fn from_table(entries: &'static [(&'static str, &'static [u8])]) -> Self {
        Self { entries }
    }

    /// Look up an asset by logical name
    pub fn load(&self, name: &str) -> Result<&'static [u8], AssetError> {
        let bytes = self
            .entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, bytes)| *bytes)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;

        if bytes.is_empty() {
            return Err(AssetError::Empty(name.to_string()));
        }
        Ok(bytes)
    }
}

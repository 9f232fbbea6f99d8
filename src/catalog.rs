//! Static tables describing every icon the service produces: output filename,
//! target side length, and encoding. Loaded once, never mutated.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    Png,
    Ico,
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub size: u32,
    pub format: IconFormat,
}

const fn png(name: &'static str, size: u32) -> CatalogEntry {
    CatalogEntry {
        name,
        size,
        format: IconFormat::Png,
    }
}

const fn ico(name: &'static str, size: u32) -> CatalogEntry {
    CatalogEntry {
        name,
        size,
        format: IconFormat::Ico,
    }
}

pub const FULL_SET: &[CatalogEntry] = &[
    // Web favicons
    png("favicon-16x16.png", 16),
    png("favicon-32x32.png", 32),
    png("favicon-96x96.png", 96),
    // Android
    png("android-icon-36x36.png", 36),
    png("android-icon-48x48.png", 48),
    png("android-icon-72x72.png", 72),
    png("android-icon-96x96.png", 96),
    png("android-icon-144x144.png", 144),
    png("android-icon-192x192.png", 192),
    // Apple touch
    png("apple-icon-40x40.png", 40),
    png("apple-icon-58x58.png", 58),
    png("apple-icon-60x60.png", 60),
    png("apple-icon-76x76.png", 76),
    png("apple-icon-80x80.png", 80),
    png("apple-icon-87x87.png", 87),
    png("apple-icon-114x114.png", 114),
    png("apple-icon-120x120.png", 120),
    png("apple-icon-128x128.png", 128),
    png("apple-icon-136x136.png", 136),
    png("apple-icon-144x144.png", 144),
    png("apple-icon-152x152.png", 152),
    png("apple-icon-167x167.png", 167),
    png("apple-icon-180x180.png", 180),
    png("apple-icon-192x192.png", 192),
    png("apple-icon-1024x1024.png", 1024),
    // Microsoft tiles
    png("ms-icon-70x70.png", 70),
    png("ms-icon-144x144.png", 144),
    png("ms-icon-150x150.png", 150),
    png("ms-icon-310x310.png", 310),
    ico("favicon.ico", 16),
];

pub const FAVICON_ONLY: &[CatalogEntry] = &[ico("favicon.ico", 16)];

/// Secondary tree of plain-named Apple icons, written under this directory
/// inside the working directory as `{size}x{size}.png`.
pub const APPLE_FOLDER_DIR: &str = "icons";

pub const APPLE_FOLDER_SIZES: &[u32] = &[
    40, 58, 60, 76, 80, 87, 114, 120, 128, 136, 144, 152, 167, 180, 192, 1024,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    FullSet,
    FaviconOnly,
}

impl GenerationMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full_set" => Some(Self::FullSet),
            "favicon_only" => Some(Self::FaviconOnly),
            _ => None,
        }
    }

    pub fn entries(self) -> &'static [CatalogEntry] {
        match self {
            Self::FullSet => FULL_SET,
            Self::FaviconOnly => FAVICON_ONLY,
        }
    }
}

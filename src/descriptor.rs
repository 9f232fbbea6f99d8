//! The two descriptor documents shipped alongside the icons: a web app
//! manifest referencing the Android icons, and a Microsoft browserconfig
//! referencing the tile icons. Field values are fixed constants plus config,
//! never derived from the rendered bytes.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const MANIFEST_NAME: &str = "manifest.json";
pub const BROWSERCONFIG_NAME: &str = "browserconfig.xml";

/// Android icon sizes and their declared density ratios.
const ANDROID_DENSITIES: &[(u32, &str)] = &[
    (36, "0.75"),
    (48, "1.0"),
    (72, "1.5"),
    (96, "2.0"),
    (144, "3.0"),
    (192, "4.0"),
];

/// Tile sizes referenced from browserconfig.xml.
const MS_TILE_SIZES: &[u32] = &[70, 150, 310];

#[derive(Debug, Deserialize, Serialize)]
pub struct Manifest {
    pub name: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub density: String,
}

pub fn manifest(app_name: &str) -> Manifest {
    Manifest {
        name: app_name.to_string(),
        icons: ANDROID_DENSITIES
            .iter()
            .map(|&(size, density)| ManifestIcon {
                src: format!("/android-icon-{size}x{size}.png"),
                sizes: format!("{size}x{size}"),
                content_type: "image/png".to_string(),
                density: density.to_string(),
            })
            .collect(),
    }
}

pub fn write_manifest(dir: &Path, app_name: &str) -> Result<PathBuf, Error> {
    let path = dir.join(MANIFEST_NAME);
    let content = serde_json::to_string_pretty(&manifest(app_name))
        .map_err(|e| Error::Descriptor(e.to_string()))?;
    fs::write(&path, content)?;
    Ok(path)
}

fn xml_err(e: impl std::fmt::Display) -> Error {
    Error::Descriptor(e.to_string())
}

pub fn browserconfig(tile_color: &str) -> Result<String, Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("browserconfig")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("msapplication")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("tile")))
        .map_err(xml_err)?;

    for &size in MS_TILE_SIZES {
        let mut logo = BytesStart::new(format!("square{size}x{size}logo"));
        logo.push_attribute(("src", format!("/ms-icon-{size}x{size}.png").as_str()));
        writer.write_event(Event::Empty(logo)).map_err(xml_err)?;
    }

    writer
        .write_event(Event::Start(BytesStart::new("TileColor")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(tile_color)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("TileColor")))
        .map_err(xml_err)?;

    writer
        .write_event(Event::End(BytesEnd::new("tile")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("msapplication")))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("browserconfig")))
        .map_err(xml_err)?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Descriptor(e.to_string()))
}

pub fn write_browserconfig(dir: &Path, tile_color: &str) -> Result<PathBuf, Error> {
    let path = dir.join(BROWSERCONFIG_NAME);
    fs::write(&path, browserconfig(tile_color)?)?;
    Ok(path)
}

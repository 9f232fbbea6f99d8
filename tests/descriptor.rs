use iconsmith::descriptor;

#[test]
fn manifest_lists_android_icons_with_densities() {
    let dir = tempfile::tempdir().unwrap();
    let path = descriptor::write_manifest(dir.path(), "Generated App").unwrap();
    assert_eq!(path.file_name().unwrap(), "manifest.json");

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(value["name"], "Generated App");
    let icons = value["icons"].as_array().unwrap();
    assert_eq!(icons.len(), 6);

    let expected = [
        (36, "0.75"),
        (48, "1.0"),
        (72, "1.5"),
        (96, "2.0"),
        (144, "3.0"),
        (192, "4.0"),
    ];
    for (icon, (size, density)) in icons.iter().zip(expected) {
        assert_eq!(icon["src"], format!("/android-icon-{size}x{size}.png"));
        assert_eq!(icon["sizes"], format!("{size}x{size}"));
        assert_eq!(icon["type"], "image/png");
        assert_eq!(icon["density"], density);
    }
}

#[test]
fn manifest_name_comes_from_config() {
    let manifest = descriptor::manifest("My App");
    assert_eq!(manifest.name, "My App");
}

#[test]
fn browserconfig_references_tile_icons() {
    let xml = descriptor::browserconfig("#ffffff").unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(xml.contains("<browserconfig>"));
    assert!(xml.contains("<msapplication>"));
    assert!(xml.contains("<square70x70logo src=\"/ms-icon-70x70.png\"/>"));
    assert!(xml.contains("<square150x150logo src=\"/ms-icon-150x150.png\"/>"));
    assert!(xml.contains("<square310x310logo src=\"/ms-icon-310x310.png\"/>"));
    assert!(xml.contains("<TileColor>#ffffff</TileColor>"));
}

#[test]
fn browserconfig_tile_color_comes_from_config() {
    let xml = descriptor::browserconfig("#123abc").unwrap();
    assert!(xml.contains("<TileColor>#123abc</TileColor>"));
}

#[test]
fn write_browserconfig_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = descriptor::write_browserconfig(dir.path(), "#ffffff").unwrap();
    assert_eq!(path.file_name().unwrap(), "browserconfig.xml");
    assert!(path.exists());
}

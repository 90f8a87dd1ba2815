use std::{fs, path::PathBuf};

use deskpaper::{
    backend::memory::{MemoryBackend, Operation, Write},
    screen_with_identifier, Desktop, Error, Rect, Style, Wallpaper,
};

fn two_monitors() -> MemoryBackend {
    MemoryBackend::new()
        .with_style("10", "0")
        .with_monitor("", Rect::new(0, 0, 1920, 1080))
        .with_monitor("DISPLAY2", Rect::new(1920, 0, 3840, 1080))
}

fn image_in(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, b"not really an image").unwrap();
    path
}

#[test]
fn screens_are_identified_by_name_or_index() {
    let desktop = Desktop::new(two_monitors());
    let screens = desktop.screens().unwrap();

    let ids: Vec<String> = screens.iter().map(|s| s.identifier()).collect();
    assert_eq!(ids, ["0", "DISPLAY2"]);
    assert!(screens[0].monitor().primary);
    assert_eq!(screens[1].monitor().rect.width(), 1920);
}

#[test]
fn enumeration_happens_once() {
    let desktop = Desktop::new(two_monitors());
    let first = desktop.screens().unwrap().len();
    let second = desktop.screens().unwrap().len();
    assert_eq!(first, second);
    assert!(std::ptr::eq(
        desktop.monitors().unwrap().as_ptr(),
        desktop.monitors().unwrap().as_ptr()
    ));
}

#[test]
fn lookup_trims_and_matches_first() {
    let backend = MemoryBackend::new()
        .with_monitor("Monitor1", Rect::default())
        .with_monitor("Monitor1", Rect::new(10, 10, 20, 20));
    let desktop = Desktop::new(backend);
    let screens = desktop.screens().unwrap();

    let found = screen_with_identifier(&screens, "  Monitor1  ").unwrap();
    assert_eq!(found.index(), 0);
    assert!(screen_with_identifier(&screens, "Monitor2").is_none());
}

#[test]
fn target_without_identifier_is_the_whole_desktop() {
    let desktop = Desktop::new(two_monitors());
    let target = desktop.target(None).unwrap();
    assert!(target.is_whole_desktop());
    assert_eq!(target.identifier(), "desktop");
}

#[test]
fn target_requires_identifier_without_whole_desktop() {
    let desktop = Desktop::new(two_monitors().without_whole_desktop());
    assert!(desktop.as_screen().is_none());
    assert!(matches!(desktop.target(None), Err(Error::ScreenRequired)));
    assert!(!desktop.target(Some("DISPLAY2")).unwrap().is_whole_desktop());
}

#[test]
fn unknown_identifier_is_not_found() {
    let desktop = Desktop::new(two_monitors());
    match desktop.target(Some(" DISPLAY7 ")) {
        Err(Error::NotFound(id)) => assert_eq!(id, "DISPLAY7"),
        other => panic!("unexpected: {:?}", other.map(|t| t.identifier())),
    }
}

#[test]
fn enumeration_failure_is_reported_as_such() {
    let desktop = Desktop::new(two_monitors().failing(Operation::EnumerateMonitors));
    assert!(matches!(desktop.screens(), Err(Error::Enumeration(_))));
    assert!(matches!(
        desktop.target(Some("0")),
        Err(Error::Enumeration(_))
    ));
}

#[test]
fn whole_desktop_reads_path_and_style() {
    let desktop = Desktop::new(two_monitors().with_wallpaper(r"C:\Windows\Web\img0.jpg"));
    let wallpaper = desktop.target(None).unwrap().wallpaper().unwrap();
    assert_eq!(
        wallpaper,
        Wallpaper::new(r"C:\Windows\Web\img0.jpg", Style::Fill)
    );
}

#[test]
fn backend_read_errors_propagate() {
    let desktop = Desktop::new(two_monitors().failing(Operation::Style));
    match desktop.wallpaper() {
        Err(Error::Backend(err)) => assert_eq!(err.operation(), "read wallpaper style"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn empty_cache_slot_falls_back_to_slot_zero() {
    let backend = MemoryBackend::new()
        .with_monitor("A", Rect::default())
        .with_monitor("B", Rect::default())
        .with_monitor("C", Rect::default())
        .with_cached(0, r"C:\wall.jpg");
    let desktop = Desktop::new(backend);

    assert_eq!(desktop.current_wallpaper(2).unwrap(), PathBuf::from(r"C:\wall.jpg"));
    let screens = desktop.screens().unwrap();
    assert_eq!(
        screens[2].wallpaper().unwrap().path,
        PathBuf::from(r"C:\wall.jpg")
    );
}

#[test]
fn empty_slot_zero_stays_empty() {
    let desktop = Desktop::new(MemoryBackend::new().with_monitor("A", Rect::default()));
    assert_eq!(desktop.current_wallpaper(0).unwrap(), PathBuf::new());
}

#[test]
fn cached_wallpapers_stop_at_the_first_gap() {
    let backend = two_monitors()
        .with_monitor("DISPLAY3", Rect::default())
        .with_cached(0, r"C:\a.jpg")
        .with_cached(2, r"C:\c.jpg");
    let desktop = Desktop::new(backend);
    assert_eq!(
        desktop.cached_wallpapers().unwrap(),
        vec![PathBuf::from(r"C:\a.jpg")]
    );
}

#[test]
fn set_style_writes_style_then_current_image() {
    let dir = tempfile::tempdir().unwrap();
    let image = image_in(&dir, "wall.png");
    let desktop = Desktop::new(two_monitors().with_wallpaper(image.to_string_lossy()));

    desktop.set_style(&Style::Tile).unwrap();

    assert_eq!(
        desktop.backend().writes(),
        vec![
            Write::Style {
                code: "0".into(),
                tile: "1".into()
            },
            Write::WallpaperPath(image),
        ]
    );
    assert_eq!(desktop.style().unwrap(), Style::Tile);
}

#[test]
fn set_style_current_touches_nothing() {
    let desktop = Desktop::new(two_monitors().with_wallpaper(r"C:\missing.jpg"));
    desktop.set_style(&Style::Current).unwrap();
    assert!(desktop.backend().writes().is_empty());
}

#[test]
fn set_style_without_an_image_fails() {
    let desktop = Desktop::new(two_monitors());
    assert!(matches!(
        desktop.set_style(&Style::Fit),
        Err(Error::WallpaperPath { .. })
    ));
    assert!(desktop.backend().writes().is_empty());
}

#[test]
fn set_with_current_style_only_writes_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let image = image_in(&dir, "wall.jpg");
    let desktop = Desktop::new(two_monitors());

    desktop
        .target(None)
        .unwrap()
        .set_wallpaper(&Wallpaper::new(&image, Style::Current))
        .unwrap();

    assert_eq!(desktop.backend().writes(), vec![Write::WallpaperPath(image)]);
    assert_eq!(desktop.style().unwrap(), Style::Fill);
}

#[test]
fn invalid_style_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let image = image_in(&dir, "wall.jpg");
    let desktop = Desktop::new(two_monitors());

    let result = desktop.set_wallpaper_with_style(&image, &Style::parse("Zoom"));
    match result {
        Err(Error::InvalidStyle(raw)) => assert_eq!(raw, "zoom"),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(
        desktop.set_style(&Style::parse("mosaic")),
        Err(Error::InvalidStyle(_))
    ));
    assert!(desktop.backend().writes().is_empty());
}

#[test]
fn missing_image_is_rejected_before_the_style_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let desktop = Desktop::new(two_monitors());

    let result = desktop.set_wallpaper_with_style(&dir.path().join("gone.png"), &Style::Stretch);
    assert!(matches!(result, Err(Error::WallpaperPath { .. })));
    assert!(desktop.backend().writes().is_empty());
    assert_eq!(desktop.style().unwrap(), Style::Fill);
}

#[test]
fn failed_path_write_leaves_the_style_written() {
    let dir = tempfile::tempdir().unwrap();
    let image = image_in(&dir, "wall.jpg");
    let desktop = Desktop::new(two_monitors().failing(Operation::SetWallpaperPath));

    let result = desktop.set_wallpaper_with_style(&image, &Style::Center);
    assert!(matches!(result, Err(Error::Backend(_))));
    assert_eq!(
        desktop.backend().writes(),
        vec![Write::Style {
            code: "0".into(),
            tile: "0".into()
        }]
    );
}

#[test]
fn single_monitor_writes_are_not_supported() {
    let dir = tempfile::tempdir().unwrap();
    let image = image_in(&dir, "wall.jpg");
    let desktop = Desktop::new(two_monitors());

    let target = desktop.target(Some("DISPLAY2")).unwrap();
    let result = target.set_wallpaper(&Wallpaper::new(&image, Style::Fit));
    assert!(matches!(result, Err(Error::NotSupported(_))));
    assert!(desktop.backend().writes().is_empty());
}

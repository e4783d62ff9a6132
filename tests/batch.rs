use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use whiteout::{
    FolderReport, ProcessingParams, RunSummary, Silent, Tolerance, process_assets_root,
    process_directory,
};

fn sprite(path: &Path) -> RgbaImage {
    let img = RgbaImage::from_fn(8, 8, |x, y| match (x + y) % 4 {
        0 => Rgba([255, 255, 255, 255]),
        1 => Rgba([230, 230, 230, 255]),
        2 => Rgba([200, 200, 200, 255]),
        _ => Rgba([255, 0, 0, 128]),
    });
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    img.save(path).unwrap();
    img
}

fn expected(mut img: RgbaImage, tolerance: u8) -> RgbaImage {
    let t = 255 - tolerance;
    for px in img.pixels_mut() {
        if px[0] >= t && px[1] >= t && px[2] >= t {
            px[3] = 0;
        }
    }
    img
}

#[test]
fn assets_root_with_missing_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let a = sprite(&root.join("character/hero.png"));
    sprite(&root.join("character/hero/walk_1.png"));
    sprite(&root.join("monster/slime.png"));
    fs::write(root.join("monster/readme.txt"), "not an image").unwrap();

    let run = process_assets_root(root, &ProcessingParams::default(), &mut Silent).unwrap();

    assert_eq!(run.totals, RunSummary { succeeded: 3, failed: 0 });
    assert_eq!(run.missing_folders().collect::<Vec<_>>(), vec!["weapon", "gem"]);
    let names: Vec<_> = run.folders.iter().map(FolderReport::name).collect();
    assert_eq!(names, vec!["character", "monster", "weapon", "gem"]);

    let back = image::open(root.join("character/hero.png")).unwrap().into_rgba8();
    assert_eq!(back, expected(a, 30));
    assert_eq!(fs::read_to_string(root.join("monster/readme.txt")).unwrap(), "not an image");
}

#[test]
fn one_corrupt_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("weapon");
    for i in 0..4 {
        sprite(&folder.join(format!("sword_{i}.png")));
    }
    fs::write(folder.join("sword_2.png"), b"\x89PNG truncated").unwrap();

    let report = process_directory(&folder, &ProcessingParams::default(), &mut Silent).unwrap();

    assert_eq!(report.found, 4);
    assert_eq!(report.summary.attempted(), 4);
    assert_eq!(report.summary, RunSummary { succeeded: 3, failed: 1 });
    assert!(report.failures[0].path.ends_with("sword_2.png"));
}

#[test]
fn second_run_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gem/emerald.png");
    let original = sprite(&path);
    let params = ProcessingParams {
        tolerance: Tolerance(60),
        subdirs: vec!["gem".into()],
        ..Default::default()
    };

    process_assets_root(dir.path(), &params, &mut Silent).unwrap();
    let once = image::open(&path).unwrap().into_rgba8();
    process_assets_root(dir.path(), &params, &mut Silent).unwrap();
    let twice = image::open(&path).unwrap().into_rgba8();

    assert_eq!(once, expected(original, 60));
    assert_eq!(once, twice);
}

#[test]
fn rgb_png_gains_an_alpha_channel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.png");
    image::RgbImage::from_fn(2, 1, |x, _| {
        if x == 0 {
            image::Rgb([255, 255, 255])
        } else {
            image::Rgb([0, 0, 0])
        }
    })
    .save(&path)
    .unwrap();

    whiteout::process_file_in_place(&path, Tolerance::DEFAULT).unwrap();

    let back = image::open(&path).unwrap();
    assert!(back.color().has_alpha());
    let back = back.into_rgba8();
    assert_eq!(*back.get_pixel(0, 0), Rgba([255, 255, 255, 0]));
    assert_eq!(*back.get_pixel(1, 0), Rgba([0, 0, 0, 255]));
}

#[cfg(unix)]
#[test]
fn locked_subdirectory_does_not_stop_other_folders() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    sprite(&root.join("character/a.png"));
    sprite(&root.join("character/locked/b.png"));
    sprite(&root.join("monster/a.png"));
    let locked = root.join("character/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // permission bits do not apply to privileged users
    let enforced = fs::read_dir(&locked).is_err();

    let result = process_assets_root(root, &ProcessingParams::default(), &mut Silent);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let run = result.unwrap();

    let monster = run
        .folders
        .iter()
        .find(|f| f.name() == "monster")
        .unwrap();
    assert!(matches!(monster, FolderReport::Processed { report, .. } if report.summary.succeeded == 1));

    if enforced {
        assert_eq!(run.totals, RunSummary { succeeded: 2, failed: 1 });
        let failed: Vec<_> = run.failures().map(|f| f.path.clone()).collect();
        assert_eq!(failed, vec![locked]);
    } else {
        assert_eq!(run.totals, RunSummary { succeeded: 3, failed: 0 });
    }
}

#[cfg(unix)]
#[test]
fn symlinked_png_is_processed_through_the_link() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let target = root.join("shared/ruby.png");
    let original = sprite(&target);
    fs::create_dir(root.join("gem")).unwrap();
    let link = root.join("gem/ruby.png");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let params = ProcessingParams {
        subdirs: vec!["gem".into()],
        ..Default::default()
    };
    let run = process_assets_root(root, &params, &mut Silent).unwrap();

    assert_eq!(run.totals, RunSummary { succeeded: 1, failed: 0 });
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    let back = image::open(&target).unwrap().into_rgba8();
    assert_eq!(back, expected(original, 30));
}

mod common;

use common::write_image;
use common::write_jpeg_with_exif;
use pictures::Error;
use pictures::index::FailurePolicy;
use pictures::index::IndexBuilder;
use pictures::key::derive_key;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn existing_thumbs_are_not_indexed() -> eyre::Result<()> {
    let td = tempdir()?;
    let root = td.path();
    write_image(&root.join("a.jpg"), 400, 300);
    write_image(&root.join("a").join("thumbs").join("a_thumb.jpg"), 200, 150);

    let index = IndexBuilder::new(root).build()?;
    assert_eq!(index.len(), 1);
    let record = &index.records()[0];
    assert_eq!(record.filepath, root.join("a.jpg").to_string_lossy());
    assert_eq!(
        record.thumbpath,
        root.join("thumbs").join("a_thumb.jpg").to_string_lossy()
    );
    assert!(root.join("thumbs").join("a_thumb.jpg").is_file());
    Ok(())
}

#[test]
fn synthesized_thumbnails_are_200_wide() -> eyre::Result<()> {
    let td = tempdir()?;
    let root = td.path();
    write_image(&root.join("one.png"), 400, 300);
    write_image(&root.join("two.JPG"), 400, 300);
    write_image(&root.join("nested").join("three.tif"), 400, 300);

    let index = IndexBuilder::new(root).build()?;
    let names: Vec<_> = index
        .iter()
        .map(|r| {
            Path::new(&r.thumbpath)
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    assert_eq!(names, ["three_thumb.tif", "one_thumb.png", "two_thumb.JPG"]);

    for record in &index {
        assert_eq!(record.key, derive_key(&record.filepath));
        assert_eq!(record.datetime, "NONE");
        let thumb = image::open(&record.thumbpath)?;
        assert_eq!((thumb.width(), thumb.height()), (200, 150));
    }
    Ok(())
}

#[test]
fn embedded_thumbnail_is_written_verbatim() -> eyre::Result<()> {
    let td = tempdir()?;
    let root = td.path();
    let embedded = [0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x01, 0xFF, 0xD9];
    write_jpeg_with_exif(&root.join("cimg0024.jpg"), "2004:04:25 02:20:24", Some(&embedded));

    let index = IndexBuilder::new(root).build()?;
    assert_eq!(index.len(), 1);
    let record = &index.records()[0];
    assert_eq!(record.datetime, "2004:04:25 02:20:24");
    assert_eq!(fs::read(&record.thumbpath)?, embedded);
    Ok(())
}

#[test]
fn datetime_without_thumbnail_still_synthesizes() -> eyre::Result<()> {
    let td = tempdir()?;
    let root = td.path();
    write_jpeg_with_exif(&root.join("dated.jpg"), "2011:12:01 09:30:00", None);

    let index = IndexBuilder::new(root).build()?;
    let record = &index.records()[0];
    assert_eq!(record.datetime, "2011:12:01 09:30:00");
    let thumb = image::open(&record.thumbpath)?;
    assert_eq!((thumb.width(), thumb.height()), (200, 150));
    Ok(())
}

#[test]
fn corrupt_image_aborts_the_walk() -> eyre::Result<()> {
    let td = tempdir()?;
    let root = td.path();
    fs::write(root.join("a_broken.jpg"), b"not really a jpeg")?;
    write_image(&root.join("b_fine.png"), 40, 30);

    let mut walk = IndexBuilder::new(root).walk()?;
    match walk.next() {
        Some(Err(Error::ThumbnailUnavailable { path, .. })) => {
            assert_eq!(path, root.join("a_broken.jpg"));
        }
        other => panic!("expected a thumbnail failure, got {other:?}"),
    }
    assert!(walk.next().is_none());
    assert!(matches!(
        IndexBuilder::new(root).build(),
        Err(Error::ThumbnailUnavailable { .. })
    ));
    Ok(())
}

#[test]
fn unwritable_thumbnail_aborts_naming_its_path() -> eyre::Result<()> {
    let td = tempdir()?;
    let root = td.path();
    write_image(&root.join("a.jpg"), 40, 30);
    // a plain file where the thumbnail directory should be
    fs::write(root.join("thumbs"), b"")?;

    let mut walk = IndexBuilder::new(root).walk()?;
    match walk.next() {
        Some(Err(Error::Io { path, .. })) => {
            assert_eq!(path, root.join("thumbs").join("a_thumb.jpg"));
        }
        other => panic!("expected an I/O failure, got {other:?}"),
    }
    assert!(walk.next().is_none());
    Ok(())
}

#[test]
fn keep_going_collects_failures() -> eyre::Result<()> {
    let td = tempdir()?;
    let root = td.path();
    fs::write(root.join("a_broken.jpg"), b"not really a jpeg")?;
    write_image(&root.join("b_fine.png"), 40, 30);

    let mut walk = IndexBuilder::new(root)
        .with_failure_policy(FailurePolicy::Continue)
        .walk()?;
    let records: Vec<_> = walk.by_ref().collect::<Result<_, _>>()?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].filepath, root.join("b_fine.png").to_string_lossy());
    assert_eq!(walk.failures().len(), 1);
    Ok(())
}

#[test]
fn reindexing_gives_the_same_index() -> eyre::Result<()> {
    let td = tempdir()?;
    let root = td.path();
    write_image(&root.join("x.png"), 300, 400);
    write_image(&root.join("y").join("z.jpg"), 64, 64);

    let first = IndexBuilder::new(root).build()?;
    let second = IndexBuilder::new(root).build()?;
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    let tall = image::open(&first.records()[0].thumbpath)?;
    assert_eq!((tall.width(), tall.height()), (200, 267));
    Ok(())
}

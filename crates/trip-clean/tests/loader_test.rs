//! Loader → Cleaner integration over files on disk.

use std::fs::File;

use ndarray::{array, Array2};
use ndarray_npy::WriteNpyExt;
use tempfile::tempdir;
use trip_clean::{Cleaner, Loader, NpyLoader};
use trip_core::{Error, Position2D, Region, Schema};

fn schema() -> Schema {
    Schema::new(
        vec!["nose".into(), "tailbase".into()],
        30.0,
        0.95,
        Region::new(475.0, 305.0, 845.0, 680.0),
    )
    .expect("schema must be valid")
}

#[test]
fn npy_f64_table_loads_and_cleans() {
    let tmp = tempdir().expect("tempdir must be created");
    let data: Array2<f64> = array![
        [0.0, 0.0, 1.0, 5.0, 5.0, 0.1],
        [9.0, 9.0, 0.2, 10.0, 10.0, 0.99],
        [20.0, 20.0, 0.97, 20.0, 20.0, 0.99],
    ];
    data.write_npy(File::create(tmp.path().join("mouse_trip.npy")).unwrap())
        .expect("npy write must succeed");

    let loader = NpyLoader::new(tmp.path());
    let table = loader.load("mouse_trip").expect("table must load");
    assert_eq!(table.frame_count(), 3);
    assert_eq!(table.column_count(), 6);

    let session = Cleaner::from_schema(&schema())
        .clean(&table, &schema())
        .expect("cleaning must succeed");
    assert_eq!(session.position("nose", 1).unwrap(), Position2D::new(10.0, 10.0));
    assert_eq!(session.position("tailbase", 0).unwrap(), Position2D::new(10.0, 10.0));
}

#[test]
fn npy_f32_table_is_widened() {
    let tmp = tempdir().expect("tempdir must be created");
    let data: Array2<f32> = array![[1.5, 2.5, 1.0, 3.5, 4.5, 1.0]];
    data.write_npy(File::create(tmp.path().join("trip.npy")).unwrap())
        .expect("npy write must succeed");

    let table = NpyLoader::new(tmp.path()).load("trip.npy").unwrap();
    assert_eq!(table.data()[[0, 3]], 3.5);
}

#[test]
fn wrong_width_fails_whole_pipeline() {
    let tmp = tempdir().expect("tempdir must be created");
    let data: Array2<f64> = Array2::zeros((4, 5));
    data.write_npy(File::create(tmp.path().join("bad.npy")).unwrap())
        .unwrap();

    let result = Cleaner::from_schema(&schema()).load_and_clean(
        &NpyLoader::new(tmp.path()),
        "bad",
        &schema(),
    );
    assert!(matches!(result, Err(Error::Schema(_))));
}

#[test]
fn missing_file_is_source_unavailable() {
    let tmp = tempdir().expect("tempdir must be created");
    let result = NpyLoader::new(tmp.path()).load("absent");
    assert!(matches!(result, Err(Error::SourceUnavailable(_))));
}

use std::fs;
use sunquote_graphics::{
    ChartLabels, GraphicsError, RasterOptions, TableLabels, render_production_chart,
    render_return_table,
};
use sunquote_types::{MonthlyProduction, YearlyReturn};
use tempfile::tempdir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn decoded_size(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(bytes).expect("artifact should be a decodable PNG");
    (img.width(), img.height())
}

#[test]
fn chart_writes_a_png_of_the_physical_size() {
    init_logger();
    let dir = tempdir().unwrap();
    let months = vec![
        MonthlyProduction::month(1, 1548.0),
        MonthlyProduction::month(2, 1458.0),
        MonthlyProduction::average(1460.0),
    ];

    let artifact = render_production_chart(
        &months,
        60,
        dir.path(),
        &ChartLabels::default(),
        &RasterOptions::default(),
    )
    .unwrap();

    assert!(artifact.path().starts_with(dir.path()));
    let bytes = artifact.read_bytes().unwrap();
    assert!(!bytes.is_empty());
    // 16 x 8 cm at 150 dpi
    assert_eq!((artifact.width_px, artifact.height_px), (945, 472));
    assert_eq!(decoded_size(&bytes), (945, 472));
}

#[test]
fn empty_chart_fails_without_writing() {
    init_logger();
    let dir = tempdir().unwrap();
    let result = render_production_chart(
        &[],
        60,
        dir.path(),
        &ChartLabels::default(),
        &RasterOptions::default(),
    );
    assert!(matches!(result, Err(GraphicsError::EmptyProduction)));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn empty_table_is_still_an_image() {
    init_logger();
    let dir = tempdir().unwrap();
    let artifact =
        render_return_table(&[], dir.path(), &TableLabels::default(), &RasterOptions::default())
            .unwrap();
    let bytes = artifact.read_bytes().unwrap();
    assert_eq!(decoded_size(&bytes), (artifact.width_px, artifact.height_px));
}

#[test]
fn concurrent_renders_never_share_a_file() {
    init_logger();
    let dir = tempdir().unwrap();
    let returns = vec![YearlyReturn::new(1, -76028.29, 1460.0, 17520.0)];
    let options = RasterOptions { dpi: 40.0, ..RasterOptions::default() };

    let paths: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    render_return_table(&returns, dir.path(), &TableLabels::default(), &options)
                        .unwrap()
                        .path
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 4);
    for (i, a) in paths.iter().enumerate() {
        for b in &paths[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn artifacts_encode_to_base64() {
    init_logger();
    let dir = tempdir().unwrap();
    let artifact = render_return_table(
        &[YearlyReturn::new(1, 10.0, 1.0, 12.0)],
        dir.path(),
        &TableLabels::default(),
        &RasterOptions { dpi: 30.0, ..RasterOptions::default() },
    )
    .unwrap();
    let encoded = artifact.to_base64().unwrap();
    // PNG signature in base64
    assert!(encoded.starts_with("iVBORw0KGgo"));
}

use collage_layout::*;

#[test]
fn test_validation_rejects_zero_override() {
    let options = CollageOptions {
        rows: Some(0),
        ..Default::default()
    };
    let result = options.validate();
    match result {
        Err(LayoutError::Config(msg)) => {
            assert!(msg.contains("at least 1"));
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_margin_must_leave_printable_area() {
    let mut options = CollageOptions::default();
    assert!(options.validate().is_ok());

    // Legal is 8.5 inches wide; 4 inches on each side still leaves 0.5
    options.paper_size = PaperSize::Legal;
    options.margin_in = 4.0;
    assert!(options.validate().is_ok());

    options.margin_in = 4.25;
    assert!(options.validate().is_err());

    options.margin_in = -0.1;
    assert!(options.validate().is_err());
}

#[test]
fn test_paper_config_from_options() {
    let options = CollageOptions {
        paper_size: PaperSize::A4,
        orientation: Orientation::Landscape,
        dpi: 150.0,
        margin_in: 0.5,
        ..Default::default()
    };
    let paper = options.paper_config();
    assert_eq!(paper.page_size_px(), (1754.0, 1240.0));

    let margin = paper.margin_rect().unwrap();
    assert_eq!(margin.left, 75.0);
    assert_eq!(margin.width, 1754.0 - 150.0);
}

#[test]
fn test_layout_request_from_options() {
    let options = CollageOptions {
        mode: ArrangementMode::MasonryRows,
        spacing: 8,
        cols: Some(3),
        ..Default::default()
    };
    let request = options.layout_request();
    assert_eq!(request.mode, ArrangementMode::MasonryRows);
    assert_eq!(request.grid.spacing, 8.0);
    assert_eq!(request.grid.cols, Some(3));
    assert_eq!(request.grid.rows, None);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = CollageOptions {
        paper_size: PaperSize::Legal,
        orientation: Orientation::Landscape,
        spacing: 12,
        layout_orientation: LayoutOrientation::SingleCol,
        order: ItemOrder::Reverse,
        rows: Some(2),
        mode: ArrangementMode::RandomCollage,
        seed: Some(42),
        ..Default::default()
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    // Save
    options.save(path).await.unwrap();

    // Load
    let loaded = CollageOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{ "spacing": 4, "layout_orientation": "single-row" }"#)
        .await
        .unwrap();

    let loaded = CollageOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.spacing, 4);
    assert_eq!(loaded.layout_orientation, LayoutOrientation::SingleRow);
    assert_eq!(loaded.dpi, 300.0);
    assert_eq!(loaded.paper_size, PaperSize::Letter);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_json() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), "{ not json").await.unwrap();

    match CollageOptions::load(temp_file.path()).await {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        _ => panic!("Expected Config error"),
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_missing_file() {
    let result = CollageOptions::load("/nonexistent/collage-options.json").await;
    assert!(matches!(result, Err(LayoutError::Io(_))));
}

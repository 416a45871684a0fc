//! Integration tests for exporting variants
//!
//! These tests verify:
//! - Export descriptors handed to an export collaborator
//! - Descriptor file names that carry the style and id verbatim
//! - Written files that cannot escape the export directory
//! - FileExporter writing the variant image to disk

use camino::Utf8PathBuf;
use mockall::mock;
use mockall::predicate::function;
use roomdecor::services::{
    ExportDescriptor, ExportError, ExportSink, FileExporter, SimulatedBackend, safe_file_name,
    suggested_filename,
};
use roomdecor::{ImageData, Orchestrator};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

mock! {
    pub Sink {}

    impl ExportSink for Sink {
        fn materialize(&self, descriptor: &ExportDescriptor) -> Result<Utf8PathBuf, ExportError>;
    }
}

fn temp_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, path)
}

async fn ready_orchestrator(style: &str) -> Orchestrator {
    let orchestrator = Orchestrator::new(
        Arc::new(SimulatedBackend::new()),
        tokio::runtime::Handle::current(),
    );
    orchestrator.set_image(ImageData::jpeg(vec![0xFFu8, 0xD8, 0xFF, 0xD9]));
    orchestrator.set_design_style(style);
    orchestrator.submit().unwrap().handle.await.unwrap();
    orchestrator
}

#[tokio::test]
async fn test_selected_variant_handed_to_sink() {
    let orchestrator = ready_orchestrator("Swedish").await;
    orchestrator.select("option-2").unwrap();

    let mut sink = MockSink::new();
    sink.expect_materialize()
        .with(function(|descriptor: &ExportDescriptor| {
            descriptor.variant_id == "option-2"
                && descriptor.suggested_filename == "decorated-room-Swedish-option-2.jpg"
        }))
        .times(1)
        .returning(|descriptor| Ok(Utf8PathBuf::from(&descriptor.suggested_filename)));

    let descriptor = orchestrator.export_selected().unwrap();
    let path = sink.materialize(&descriptor).unwrap();

    assert_eq!(path.as_str(), "decorated-room-Swedish-option-2.jpg");
    assert_eq!(
        orchestrator.view().selected.unwrap().id,
        "option-2",
        "export leaves the selection in place"
    );
}

#[tokio::test]
async fn test_file_exporter_writes_variant_image() {
    let (_temp_dir, dir) = temp_dir();
    let orchestrator = ready_orchestrator("Modern").await;

    let descriptor = orchestrator.export_variant("option-1").unwrap();
    let exporter = FileExporter::new(dir.join("exports"));
    let path = exporter.materialize(&descriptor).unwrap();

    assert_eq!(path, dir.join("exports").join("decorated-room-Modern-option-1.jpg"));
    assert_eq!(fs::read(&path).unwrap(), vec![0xFFu8, 0xD8, 0xFF, 0xD9]);
}

#[tokio::test]
async fn test_custom_style_filename_stays_in_directory() {
    let (_temp_dir, dir) = temp_dir();
    let orchestrator = ready_orchestrator("../../etc/passwd").await;

    let descriptor = orchestrator.export_variant("option-3").unwrap();
    let path = FileExporter::new(&dir).materialize(&descriptor).unwrap();

    assert_eq!(path.parent(), Some(dir.as_path()));
    assert!(descriptor.suggested_filename.contains("../../etc/passwd"));
    assert!(!path.file_name().unwrap().contains('/'));
    assert!(path.exists());
}

#[test]
fn test_suggested_filename_is_verbatim() {
    assert_eq!(
        suggested_filename("Mid Century", "option-1"),
        "decorated-room-Mid Century-option-1.jpg"
    );
    assert_ne!(suggested_filename("Modern", "a/b"), suggested_filename("Modern", "a-b"));
}

#[tokio::test]
async fn test_custom_style_descriptor_names_style_and_id() {
    let (_temp_dir, dir) = temp_dir();
    let orchestrator = ready_orchestrator("Mid Century").await;

    for variant in orchestrator.view().results.unwrap().variants() {
        let descriptor = orchestrator.export_variant(&variant.id).unwrap();

        assert!(descriptor.suggested_filename.contains("Mid Century"));
        assert!(descriptor.suggested_filename.contains(&variant.id));
        assert_eq!(descriptor.image, variant.image);

        let path = FileExporter::new(&dir).materialize(&descriptor).unwrap();
        assert_eq!(
            path.file_name(),
            Some(safe_file_name(&descriptor.suggested_filename).as_str())
        );
    }
}

#[test]
fn test_empty_image_is_not_written() {
    let (_temp_dir, dir) = temp_dir();
    let descriptor = ExportDescriptor {
        suggested_filename: "decorated-room-Modern-option-1.jpg".to_string(),
        image: ImageData::jpeg(Vec::<u8>::new()),
        variant_id: "option-1".to_string(),
    };

    let err = FileExporter::new(&dir).materialize(&descriptor).unwrap_err();

    assert!(matches!(err, ExportError::NothingToWrite(id) if id == "option-1"));
    assert!(!dir.join(&descriptor.suggested_filename).exists());
}

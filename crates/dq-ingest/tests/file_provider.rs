//! Providers backed by CSV files on disk.

use std::io::Write;

use dq_ingest::{
    ChoiceFilter, DatasetProvider, IngestError, ParameterSpec, Params, TableProvider, TableSource,
};
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn file_is_reread_for_each_request() {
    let file = write_csv("site,reading\nnorth,1.5\nsouth,NA\nnorth,2.5\n");
    let provider = TableProvider::new("readings", TableSource::File(file.path().to_path_buf()))
        .with_filter(ChoiceFilter::new(
            ParameterSpec::new("site", "Site", ["north", "south"]),
            "site",
        ));

    let north = provider.get_dataset(&Params::new()).unwrap();
    assert_eq!(north.height(), 2);

    let south = provider
        .get_dataset(&Params::new().with("site", "south"))
        .unwrap();
    assert_eq!(south.height(), 1);
    assert_eq!(south.column("reading").unwrap().null_count(), 1);
}

#[test]
fn unfiltered_provider_has_no_parameters() {
    let file = write_csv("a,b\n1,x\n2,y\n");
    let provider = TableProvider::new("plain", TableSource::File(file.path().to_path_buf()));
    assert!(provider.parameters().is_empty());
    assert_eq!(provider.get_dataset(&Params::new()).unwrap().height(), 2);

    let err = provider
        .get_dataset(&Params::new().with("a", "1"))
        .unwrap_err();
    assert!(matches!(err, IngestError::InvalidParameter { .. }));
}

#[test]
fn deleted_file_surfaces_not_found() {
    let file = write_csv("a\n1\n");
    let path = file.path().to_path_buf();
    drop(file);
    let provider = TableProvider::new("gone", TableSource::File(path));
    assert!(matches!(
        provider.get_dataset(&Params::new()),
        Err(IngestError::FileNotFound { .. })
    ));
}

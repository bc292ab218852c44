//! Generic file upload.
//!
//! Builds a zip archive of random 1 MiB entries, PUTs it into a generic
//! repository and expects `201 Created`.

use super::{Scenario, ScenarioOutcome};
use crate::error::Result;
use crate::fixture::{Scaffold, Session};
use crate::http::ArtifactClient;
use rand::RngCore;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const GENERIC_REPO_KEY: &str = "generic-test";
pub const DUMMY_FILE_NAME: &str = "dummy01.zip";
pub const DUMMY_FILE_SIZE_MB: usize = 10;

const MB: usize = 1024 * 1024;

/// Upload of a random payload to a generic repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericUpload {
    pub repo_key: String,
    pub file_name: String,
    pub size_mb: usize,
}

impl Default for GenericUpload {
    fn default() -> Self {
        Self {
            repo_key: GENERIC_REPO_KEY.to_string(),
            file_name: DUMMY_FILE_NAME.to_string(),
            size_mb: DUMMY_FILE_SIZE_MB,
        }
    }
}

pub struct GenericFixture {
    client: ArtifactClient,
    upload_url: String,
    payload_path: PathBuf,
}

impl GenericFixture {
    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

impl Scenario for GenericUpload {
    type Fixture = GenericFixture;

    fn name(&self) -> &'static str {
        "generic"
    }

    fn setup(&self, session: &Session, scaffold: &mut Scaffold) -> Result<GenericFixture> {
        let artifactory_url = session.config().artifactory_url()?;
        let client = session.basic_client()?;

        let payload_path = scaffold.write_file(&self.file_name, dummy_zip(self.size_mb)?)?;

        Ok(GenericFixture {
            client,
            upload_url: format!("{}/{}/{}", artifactory_url, self.repo_key, self.file_name),
            payload_path,
        })
    }

    fn execute(&self, _session: &Session, fixture: &GenericFixture) -> Result<ScenarioOutcome> {
        let response = fixture
            .client
            .put_file(&fixture.upload_url, &fixture.payload_path)?
            .expect_status(201)?;

        Ok(ScenarioOutcome {
            verified_url: response.url,
            status: response.status,
        })
    }
}

/// Deflated zip holding `size_mb` entries `file_{i}.txt`, each the same
/// random 1 MiB chunk.
pub fn dummy_zip(size_mb: usize) -> Result<Vec<u8>> {
    let mut chunk = vec![0u8; MB];
    rand::thread_rng().fill_bytes(&mut chunk);

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(size_mb * MB)));
    for i in 0..size_mb {
        writer.start_file(format!("file_{}.txt", i), options)?;
        writer.write_all(&chunk)?;
    }

    Ok(writer.finish()?.into_inner())
}

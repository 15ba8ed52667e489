//! Batch conversion of archived track folders into game save files.
//!
//! An archive directory holds one folder per track, named by its server id,
//! each containing a `data.bin`. Conversion writes the four decoded files to
//! `<output>/<track id>/<NAME>_<ID>.<EXT>`.

use std::fs;
use std::path::{Path, PathBuf};

use lbpk_cm2::Cm2Metadata;
use tracing::{debug, info, warn};

use crate::{extract, Error, Result};

/// Name of the archive file inside each track folder.
pub const DATA_FILE_NAME: &str = "data.bin";

/// One track folder found in an archive directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSource {
    /// Folder name, used as the track id and output subfolder.
    pub id: String,
    /// Path to the folder.
    pub dir: PathBuf,
}

impl TrackSource {
    /// Path of the folder's `data.bin`.
    pub fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE_NAME)
    }
}

/// List the track folders directly inside an archive directory.
///
/// Plain files are ignored. Folders are returned sorted by name so runs are
/// reproducible; whether they hold a `data.bin` is checked at conversion time.
pub fn discover_tracks<P: AsRef<Path>>(archive_dir: P) -> Result<Vec<TrackSource>> {
    let archive_dir = archive_dir.as_ref();
    let entries = fs::read_dir(archive_dir).map_err(|e| Error::io(archive_dir, e))?;

    let mut tracks = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(archive_dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        tracks.push(TrackSource {
            id: entry.file_name().to_string_lossy().into_owned(),
            dir: path,
        });
    }

    tracks.sort_by(|a, b| a.id.cmp(&b.id));
    debug!(count = tracks.len(), dir = %archive_dir.display(), "discovered track folders");
    Ok(tracks)
}

/// Summary of one converted track.
#[derive(Debug, Clone)]
pub struct ConvertedTrack {
    /// The source folder name.
    pub track_id: String,
    /// `<NAME>_<ID>` stem shared by all output files.
    pub base_filename: String,
    /// Decoded CM2 metadata.
    pub metadata: Cm2Metadata,
    /// Files written, in TRK, CM2, NAV, HUD order. Empty on a dry run.
    pub files: Vec<PathBuf>,
    /// Segment lengths in TRK, CM2, NAV, HUD order.
    pub segment_lens: [usize; 4],
}

/// Writes decoded tracks into an output directory.
#[derive(Debug, Clone)]
pub struct Converter {
    output_dir: PathBuf,
    dry_run: bool,
}

impl Converter {
    /// Create a converter writing under `output_dir`.
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            dry_run: false,
        }
    }

    /// Decode and name tracks without writing anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Convert one track folder.
    ///
    /// The whole archive is decoded before anything is written, so a corrupt
    /// archive leaves no files behind. If a write fails part way, every file
    /// of this track, including the one that failed, is removed again, along
    /// with the track folder if this call created it.
    pub fn convert(&self, source: &TrackSource) -> Result<ConvertedTrack> {
        let data_path = source.data_path();
        if !data_path.is_file() {
            return Err(Error::MissingData {
                dir: source.dir.clone(),
            });
        }

        let data = fs::read(&data_path).map_err(|e| Error::io(&data_path, e))?;
        let track = extract(&data)?;

        let sanitized = track.metadata.sanitized_name();
        if sanitized.is_empty() {
            return Err(Error::EmptyTrackName {
                track: source.id.clone(),
                name: track.metadata.display_name.clone(),
            });
        }

        let base_filename = track.base_filename();
        let segment_lens = [
            track.segments.track.len(),
            track.segments.composite_metadata.len(),
            track.segments.navigation.len(),
            track.segments.heads_up_display.len(),
        ];

        debug!(
            track = %source.id,
            trk = segment_lens[0],
            cm2 = segment_lens[1],
            nav = segment_lens[2],
            hud = segment_lens[3],
            "split archive"
        );

        let files = if self.dry_run {
            Vec::new()
        } else {
            write_outputs(&self.output_dir.join(&source.id), &track.output_files())?
        };

        info!(
            track = %source.id,
            unique_id = %track.metadata.unique_id,
            name = %track.metadata.display_name,
            description = %track.metadata.description,
            "converted {}",
            base_filename
        );

        Ok(ConvertedTrack {
            track_id: source.id.clone(),
            base_filename,
            metadata: track.metadata,
            files,
            segment_lens,
        })
    }
}

/// Write all output files into `track_dir`, or none of them.
fn write_outputs(track_dir: &Path, outputs: &[(String, &[u8])]) -> Result<Vec<PathBuf>> {
    let created_dir = !track_dir.exists();
    fs::create_dir_all(track_dir).map_err(|e| Error::io(track_dir, e))?;

    let mut files = Vec::with_capacity(outputs.len());
    for (name, bytes) in outputs {
        let path = track_dir.join(name);
        if let Err(e) = fs::write(&path, bytes) {
            // A failed write may still have created a truncated file.
            if path.is_file() {
                files.push(path.clone());
            }
            remove_written(&files);
            if created_dir {
                if let Err(err) = fs::remove_dir(track_dir) {
                    warn!(path = %track_dir.display(), error = %err, "could not remove track folder");
                }
            }
            return Err(Error::io(path, e));
        }
        files.push(path);
    }

    Ok(files)
}

fn remove_written(files: &[PathBuf]) {
    for path in files {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "could not remove partial output");
        }
    }
}

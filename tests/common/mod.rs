#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Small track dataset exercising quoting, nulls, a duplicate row, and a
/// malformed row (field count 3 against an 11-column header).
pub const TRACKS_CSV: &str = concat!(
    "track_name,track_artist,track_popularity,track_album_name,track_album_release_date,",
    "playlist_genre,playlist_subgenre,danceability,energy,tempo,liveness\n",
    "Shape of You,Ed Sheeran,84,Divide,2017-03-03,pop,dance pop,0.83,0.65,95.98,0.09\n",
    "\"Thinking, Out Loud\",Ed Sheeran,78,Multiply,2014-06-20,pop,dance pop,0.78,0.45,79.0,0.33\n",
    "Believer,Imagine Dragons,88,Evolve,2017-01-31,rock,modern rock,0.77,0.78,124.95,0.08\n",
    "Thunder,Imagine Dragons,NA,Evolve,2017-04-27,rock,modern rock,0.6,0.81,168.0,0.15\n",
    "Believer,Imagine Dragons,88,Evolve,2017-01-31,rock,modern rock,0.77,0.78,124.95,0.08\n",
    "Bad Row,Only,Three\n",
    "Nightcall,Kavinsky,65,OutRun,2010-12-06,electronic,electro,0.71,0.6,140.0,0.11\n",
    "Mystery,Unknown Artist,50,Lost,NA,pop,indie poptimism,0.5,0.5,100.0,0.2\n",
);

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes the shared track dataset and returns its path.
    pub fn write_tracks(&self) -> PathBuf {
        self.write("tracks.csv", TRACKS_CSV)
    }
}

//! Well-known column names of the track dataset.
//!
//! The query pipeline, predicate builder, and subset command all address the
//! same handful of columns; naming them once keeps the spelling honest.

pub const TRACK_NAME: &str = "track_name";
pub const TRACK_ARTIST: &str = "track_artist";
pub const TRACK_POPULARITY: &str = "track_popularity";
pub const TRACK_ALBUM_NAME: &str = "track_album_name";
pub const TRACK_ALBUM_RELEASE_DATE: &str = "track_album_release_date";
pub const PLAYLIST_GENRE: &str = "playlist_genre";
pub const PLAYLIST_SUBGENRE: &str = "playlist_subgenre";
pub const DANCEABILITY: &str = "danceability";
pub const ENERGY: &str = "energy";
pub const TEMPO: &str = "tempo";
pub const LIVENESS: &str = "liveness";

/// Columns the query pipeline always projects for display and export.
pub const PROJECT_COLUMNS: &[&str] = &[
    TRACK_NAME,
    TRACK_ARTIST,
    TRACK_ALBUM_NAME,
    TRACK_ALBUM_RELEASE_DATE,
];

/// Analysis subset kept by the `subset` command.
pub const SUBSET_COLUMNS: &[&str] = &[
    TRACK_NAME,
    TRACK_ARTIST,
    TRACK_POPULARITY,
    TRACK_ALBUM_NAME,
    TRACK_ALBUM_RELEASE_DATE,
    PLAYLIST_GENRE,
    PLAYLIST_SUBGENRE,
    DANCEABILITY,
    ENERGY,
    TEMPO,
    LIVENESS,
];

use std::fmt::Write as _;
use std::io::Cursor;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use track_query::ingest::{dedupe, ingest_reader};
use track_query::pipeline::{Selections, apply_pipeline};

fn generate_tracks(rows: usize) -> String {
    let mut text = String::from(
        "track_name,track_artist,track_popularity,track_album_name,track_album_release_date,\
         playlist_genre,playlist_subgenre,danceability,energy,tempo,liveness\n",
    );
    for i in 0..rows {
        let genre = match i % 3 {
            0 => "pop",
            1 => "rock",
            _ => "electronic",
        };
        let month = (i % 12) + 1;
        let year = 2000 + (i % 20);
        let _ = writeln!(
            text,
            "Track {i},Artist {artist},{pop},Album {album},{year}-{month:02}-15,{genre},sub {genre},0.{dance},0.{energy},{tempo}.5,0.1",
            artist = i % 250,
            pop = i % 101,
            album = i % 40,
            dance = i % 10,
            energy = (i + 3) % 10,
            tempo = 70 + (i % 110),
        );
    }
    text
}

fn bench_ingest(c: &mut Criterion) {
    let text = generate_tracks(20_000);
    c.bench_function("ingest_20k_rows", |b| {
        b.iter_batched(
            || Cursor::new(text.clone()),
            |cursor| ingest_reader(cursor, ',').expect("ingest"),
            BatchSize::LargeInput,
        )
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let text = generate_tracks(20_000);
    let mut ingestion = ingest_reader(Cursor::new(text), ',').expect("ingest");
    let table = dedupe(ingestion.table, &mut ingestion.stats);
    let selections = Selections {
        genre: "pop".to_string(),
        popularity: "40-80".to_string(),
        ..Selections::default()
    };

    c.bench_function("filter_project_group_20k_rows", |b| {
        b.iter(|| {
            apply_pipeline(&table, &selections, Some("track_popularity")).expect("pipeline")
        })
    });
}

criterion_group!(benches, bench_ingest, bench_pipeline);
criterion_main!(benches);

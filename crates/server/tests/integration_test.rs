//! Integration tests for the recommender service.
//!
//! These load real CSV files from disk and exercise rebuilds while queries
//! are in flight.

use std::io::Write;

use server::{RecommenderService, ServiceConfig};
use tempfile::NamedTempFile;

fn write_dataset(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Movie_Name,Year,Genre,Overview,Director,Cast").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

fn first_dataset() -> NamedTempFile {
    write_dataset(&[
        "Sholay,1975,Action,Two ex-convicts hunt a ruthless bandit,Ramesh Sippy,Dharmendra",
        "Deewaar,1975,Crime,Two brothers on opposite sides of the law,Yash Chopra,Amitabh Bachchan",
        "Trishul,1978,Drama,A son seeks revenge on his father,Yash Chopra,Amitabh Bachchan",
        "Shaan,1980,Action,Brothers hunt a ruthless crime lord,Ramesh Sippy,Sunil Dutt",
    ])
}

#[tokio::test]
async fn test_start_from_path() {
    let file = first_dataset();
    let service = RecommenderService::start_from_path(file.path(), ServiceConfig::default())
        .await
        .unwrap();

    let recs = service.recommend("sholay", 3);
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].row.title, "Shaan");
    assert_eq!(recs[0].row.year.as_deref(), Some("1980"));
    assert_eq!(recs[0].row.director.as_deref(), Some("Ramesh Sippy"));
}

#[tokio::test]
async fn test_reload_publishes_new_catalog() {
    let file = first_dataset();
    let service = RecommenderService::start_from_path(file.path(), ServiceConfig::default())
        .await
        .unwrap();

    let next = write_dataset(&[
        "Lagaan,2001,Sport,Villagers challenge officers to cricket,Ashutosh Gowariker,Aamir Khan",
        "Iqbal,2005,Sport,A deaf boy dreams of playing cricket,Nagesh Kukunoor,Shreyas Talpade",
    ]);
    let generation = service.reload(next.path()).await.unwrap();

    assert_eq!(generation, 2);
    assert_eq!(service.titles(), vec!["Iqbal", "Lagaan"]);
    assert_eq!(service.recommend("Lagaan", 5)[0].row.title, "Iqbal");
}

#[tokio::test]
async fn test_reload_of_bad_file_keeps_serving() {
    let file = first_dataset();
    let service = RecommenderService::start_from_path(file.path(), ServiceConfig::default())
        .await
        .unwrap();

    let mut bad = NamedTempFile::new().unwrap();
    writeln!(bad, "title,genre\nX,Drama").unwrap();

    assert!(service.reload(bad.path()).await.is_err());
    assert!(service.reload("no/such/file.csv").await.is_err());
    assert_eq!(service.generation(), 1);
    assert_eq!(service.titles().len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_queries_during_rebuild_see_a_whole_index() {
    let file = first_dataset();
    let service = RecommenderService::start_from_path(file.path(), ServiceConfig::default())
        .await
        .unwrap();

    let readers: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                for _ in 0..200 {
                    let recs = service.recommend("Sholay", 10);
                    // Old or rebuilt, every snapshot holds the same four items
                    assert_eq!(recs.len(), 3);
                    assert!(recs.iter().all(|r| r.row.title != "Sholay"));
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    let rebuilds = {
        let service = service.clone();
        let path = file.path().to_path_buf();
        tokio::spawn(async move {
            for _ in 0..5 {
                service.reload(&path).await.unwrap();
            }
        })
    };

    for reader in readers {
        reader.await.unwrap();
    }
    rebuilds.await.unwrap();

    assert_eq!(service.generation(), 6);
}

use catalog::normalizer;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/IMDB-Movie-Dataset(2023-1951).csv");

    println!("Loading catalog from {}...\n", path.display());

    let start = Instant::now();
    let catalog = normalizer::load_csv(path).expect("Failed to load dataset");
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Items: {}", catalog.len());
    println!("Columns: {}", catalog.columns().names().join(", "));
    println!(
        "\nPerformance: {:.0} items/second",
        catalog.len() as f64 / elapsed.as_secs_f64()
    );
}

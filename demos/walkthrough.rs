/// Dashboard Walkthrough
///
/// This demo shows one user session without a database:
/// - Building a record set
/// - Listing facet options
/// - Applying selections and reading KPIs
/// - Reading chart series
/// - Serving an empty dataset after a failed load

use gamesales::{
    apply, group_sum, mean, sum, Dashboard, FacetSelection, Field, LoadError, NumericField, Record,
    RecordSet,
};

fn game(
    rank: i64,
    title: &str,
    platform: &str,
    publisher: &str,
    developer: &str,
    year: i32,
    shipped: f64,
    critic: Option<f64>,
    user: Option<f64>,
) -> Record {
    Record {
        rank,
        title: title.to_string(),
        critic_score: critic,
        user_score: user,
        total_shipped: shipped,
        year,
        platform: platform.to_string(),
        publisher: publisher.to_string(),
        developer: developer.to_string(),
    }
}

fn main() {
    println!("=== Game Sales Dashboard Walkthrough ===\n");

    // 1. Build the record set
    println!("1. Building record set...");
    let records = RecordSet::new(vec![
        game(1, "Wii Sports", "Wii", "Nintendo", "Nintendo EAD", 2006, 82.9, Some(7.7), Some(8.0)),
        game(2, "Super Mario Bros.", "NES", "Nintendo", "Nintendo EAD", 1985, 40.24, None, None),
        game(3, "Mario Kart Wii", "Wii", "Nintendo", "Nintendo EAD", 2008, 37.32, Some(8.2), Some(9.1)),
        game(4, "Grand Theft Auto V", "PS3", "Rockstar Games", "Rockstar North", 2013, 20.32, Some(9.4), None),
        game(5, "Grand Theft Auto V", "PS4", "Rockstar Games", "Rockstar North", 2014, 19.39, Some(9.7), Some(8.3)),
        game(6, "Tetris", "GB", "Nintendo", "Bullet-Proof Software", 1989, 30.26, None, None),
    ]);
    println!("   Loaded {} records\n", records.len());

    let dashboard = Dashboard::new(records.clone());
    println!("   {}", dashboard.title());

    // 2. Facet options
    println!("\n2. Selector options (from the full dataset)...");
    let options = dashboard.options();
    println!("   Platforms: {:?}", options.platforms);
    println!("   Publishers: {:?}", options.publishers);
    println!("   Years: {:?}", options.years);

    // 3. Filter by platform
    println!("\n3. Selecting platform = Wii...");
    let selection = FacetSelection::new().with_platforms(["Wii"]);
    let view = apply(&records, &selection);
    for r in &view {
        println!("   #{} {} ({}) {:.2}M", r.rank, r.title, r.year, r.total_shipped);
    }
    println!("   Units shipped: {:.2}M", sum(&view, NumericField::TotalShipped));
    match mean(&view, NumericField::CriticScore) {
        Some(score) => println!("   Mean critic score: {:.2}", score),
        None => println!("   Mean critic score: no data"),
    }

    // 4. Combine facets
    println!("\n4. Selecting publisher = Rockstar Games AND year in {{2013, 2014}}...");
    let selection = FacetSelection::new()
        .with_publishers(["Rockstar Games"])
        .with_years([2013, 2014]);
    let snapshot = dashboard.snapshot(&selection);
    println!("   {} rows", snapshot.rows.len());
    println!("   {}: {}", snapshot.kpis.total_shipped.label, snapshot.kpis.total_shipped.display);
    println!("   {}: {}", snapshot.kpis.mean_critic_score.label, snapshot.kpis.mean_critic_score.display);
    println!("   {}: {}", snapshot.kpis.mean_user_score.label, snapshot.kpis.mean_user_score.display);

    // 5. Chart series
    println!("\n5. Sales by platform (all records)...");
    let by_platform = group_sum(&records, Field::Platform, NumericField::TotalShipped);
    for (platform, shipped) in &by_platform {
        println!("   {:<4} {:>7.2}M", platform, shipped);
    }
    let all = dashboard.snapshot(&FacetSelection::new());
    println!("\n   {}:", all.charts.publisher_share.title);
    for point in &all.charts.publisher_share.points {
        println!("   {:<16} {:>5.1}%", point.label, point.value * 100.0);
    }

    // 6. No match
    println!("\n6. Selecting a platform with no games...");
    let empty = dashboard.snapshot(&FacetSelection::new().with_platforms(["Dreamcast"]));
    println!("   {} rows, shipped {}, critic {}", empty.rows.len(), empty.kpis.total_shipped.display, empty.kpis.mean_critic_score.display);

    // 7. Failed load
    println!("\n7. Dashboard after a failed database connection...");
    let degraded = Dashboard::from_load(Err(LoadError::Connection("Connection refused".to_string())));
    let snap = degraded.snapshot(&FacetSelection::new());
    println!("   Status: {:?}", snap.status);
    println!("   Rows: {}, title: {}", snap.rows.len(), snap.title);

    println!("\n=== Walkthrough Complete ===");
}

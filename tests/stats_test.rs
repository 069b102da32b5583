use tunescout::discovery::calculate_discovery_stats;
use tunescout::types::SongSummary;

fn summary(artist: &str, genre: Option<&str>, mood: Option<&str>, tempo: Option<f64>) -> SongSummary {
    SongSummary {
        title: Some(format!("{} song", artist)),
        artist: Some(artist.to_string()),
        genre: genre.map(str::to_string),
        tempo,
        mood: mood.map(str::to_string),
    }
}

fn by(artist: &str) -> SongSummary {
    summary(artist, None, None, None)
}

#[test]
fn test_new_artists() {
    let original = vec![by("A"), by("B")];
    let recommended = vec![by("B"), by("C"), by("D")];

    let stats = calculate_discovery_stats(&original, &recommended);

    assert_eq!(stats.new_artists_count, 2);
    assert_eq!(stats.total_recommended_artists, 3);
    assert_eq!(stats.new_artists_percentage, 66.7);
    assert_eq!(stats.total_recommendations, 3);
}

#[test]
fn test_repeated_artists_count_once() {
    let original = vec![by("A")];
    let recommended = vec![by("C"), by("C"), by("A"), by("A")];

    let stats = calculate_discovery_stats(&original, &recommended);

    assert_eq!(stats.total_recommended_artists, 2);
    assert_eq!(stats.new_artists_count, 1);
    assert_eq!(stats.new_artists_percentage, 50.0);
    assert_eq!(stats.total_recommendations, 4);
}

#[test]
fn test_artist_matching_is_exact() {
    let original = vec![by("Daft Punk")];
    let recommended = vec![by("daft punk")];

    let stats = calculate_discovery_stats(&original, &recommended);

    assert_eq!(stats.new_artists_count, 1);
    assert_eq!(stats.new_artists_percentage, 100.0);
}

#[test]
fn test_empty_recommendations() {
    let original = vec![by("A")];
    let recommended: Vec<SongSummary> = Vec::new();

    let stats = calculate_discovery_stats(&original, &recommended);

    assert_eq!(stats.new_artists_percentage, 0.0);
    assert_eq!(stats.new_artists_count, 0);
    assert_eq!(stats.average_tempo, 0);
    assert!(stats.genre_breakdown.is_empty());
    assert!(stats.mood_breakdown.is_empty());
    assert_eq!(stats.total_recommendations, 0);
}

#[test]
fn test_breakdowns() {
    let recommended = vec![
        summary("A", Some("Rock"), Some("Happy"), None),
        summary("B", Some("Rock"), Some("Sad"), None),
        summary("C", Some("Jazz"), None, None),
        summary("D", None, Some("Happy"), None),
    ];

    let stats = calculate_discovery_stats(&Vec::<SongSummary>::new(), &recommended);

    assert_eq!(stats.genre_breakdown.get("Rock"), Some(&2));
    assert_eq!(stats.genre_breakdown.get("Jazz"), Some(&1));
    assert_eq!(stats.genre_breakdown.get("Unknown"), Some(&1));
    assert_eq!(stats.mood_breakdown.get("Happy"), Some(&2));
    assert_eq!(stats.mood_breakdown.get("Sad"), Some(&1));
    assert_eq!(stats.mood_breakdown.get("Unknown"), Some(&1));
}

#[test]
fn test_average_tempo_ignores_missing_and_non_positive() {
    let recommended = vec![
        summary("A", None, None, Some(100.0)),
        summary("B", None, None, Some(121.0)),
        summary("C", None, None, None),
        summary("D", None, None, Some(0.0)),
        summary("E", None, None, Some(-30.0)),
    ];

    let stats = calculate_discovery_stats(&Vec::<SongSummary>::new(), &recommended);

    // (100 + 121) / 2 = 110.5, rounded
    assert_eq!(stats.average_tempo, 111);
}

#[test]
fn test_stats_wire_names() {
    let stats = calculate_discovery_stats(&vec![by("A")], &vec![by("B")]);
    let out = serde_json::to_value(&stats).unwrap();

    assert_eq!(out["newArtistsPercentage"], 100.0);
    assert_eq!(out["newArtistsCount"], 1);
    assert_eq!(out["totalRecommendedArtists"], 1);
    assert_eq!(out["averageTempo"], 0);
    assert_eq!(out["totalRecommendations"], 1);
    assert!(out["genreBreakdown"].is_object());
    assert!(out["moodBreakdown"].is_object());
}

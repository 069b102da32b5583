use crate::types::SongSummary;

/// Number of playlist songs described to the model.
pub const CONTEXT_SONG_LIMIT: usize = 20;

/// Renders the first 20 songs as one numbered line each.
pub fn song_context(songs: &[SongSummary]) -> String {
    songs
        .iter()
        .take(CONTEXT_SONG_LIMIT)
        .enumerate()
        .map(|(i, song)| {
            let tempo = song
                .tempo
                .map(|t| format!("{}", t.round() as i64))
                .unwrap_or_else(|| "Unknown".to_string());
            format!(
                "{n}. {title} by {artist} | Genre: {genre} | Tempo: {tempo} BPM | Mood: {mood}",
                n = i + 1,
                title = field(&song.title),
                artist = field(&song.artist),
                genre = field(&song.genre),
                tempo = tempo,
                mood = field(&song.mood),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn field(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("Unknown")
}

pub fn playlist_prompt(context: &str, count: usize) -> String {
    format!(
        r##"You are a music curator. Study the playlist below and suggest {count} songs a listener of it would enjoy.

PLAYLIST:
{context}

RULES:
1. Only suggest songs that really exist.
2. Weigh genre, tempo, mood, related artists and era.
3. Give a short, specific reason for every suggestion.
4. Spread the suggestions over several artists.
5. Rate how well each song fits with a matchScore between 0 and 1.

Answer with a JSON array in exactly this shape:
[
  {{
    "id": "unique_id",
    "title": "Song Title",
    "artist": "Artist Name",
    "genre": "Genre",
    "tempo": 120,
    "mood": "Happy|Sad|Energetic|Chill",
    "reason": "Why this song fits the playlist",
    "previewUrl": "#",
    "confidence": 0.8,
    "matchScore": 0.7
  }}
]

Return the JSON array only, without any other text."##,
        count = count,
        context = context
    )
}

pub fn mood_prompt(context: &str, mood: &str, count: usize) -> String {
    let upper = mood.trim().to_uppercase();
    let capitalized = capitalize(mood.trim());

    format!(
        r##"You are a music curator. Using the playlist below as a reference, suggest {count} songs with a {upper} mood.

PLAYLIST:
{context}

TARGET MOOD: {upper}

RULES:
1. Every suggestion must carry a {lower} mood and energy.
2. Stay musically close to the playlist.
3. Only suggest songs that really exist.
4. Explain what gives each song this mood.
5. Rate how well each song fits with a matchScore between 0 and 1.

Answer with a JSON array in exactly this shape:
[
  {{
    "id": "unique_id",
    "title": "Song Title",
    "artist": "Artist Name",
    "genre": "Genre",
    "tempo": 120,
    "mood": "{capitalized}",
    "reason": "Why this song has a {lower} mood and fits the playlist",
    "previewUrl": "#",
    "confidence": 0.8,
    "matchScore": 0.7
  }}
]

Return the JSON array only."##,
        count = count,
        context = context,
        upper = upper,
        lower = mood.trim().to_lowercase(),
        capitalized = capitalized,
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

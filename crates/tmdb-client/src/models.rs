use serde::{Deserialize, Deserializer, Serialize};

// TMDB omits or nulls many fields depending on the title, so nearly
// everything defaults, and an explicit `null` reads as the default too.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: i64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_results: i64,
}

// ============ Movie Details ============

/// The parts of a detail record used for media lookups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

// ============ Search ============

/// A movie as it appears in search results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

// ============ Videos ============

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Video {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Hosting platform, e.g. "YouTube"
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: String,
    /// "Trailer", "Teaser", "Clip", ...
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube" && !self.key.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub results: Vec<Video>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_movie_details_with_nulls() {
        let json = r#"{"id": 19995, "title": "Avatar", "poster_path": null, "overview": null, "genres": []}"#;
        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, 19995);
        assert!(details.poster_path.is_none());
    }

    #[test]
    fn test_nulls_in_unread_fields_keep_the_poster() {
        let json = r#"{"id": 603, "title": null, "vote_average": null, "runtime": null,
                       "release_date": null, "poster_path": "/m.jpg"}"#;
        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.poster_path.as_deref(), Some("/m.jpg"));
        assert!(details.title.is_none());
    }

    #[test]
    fn test_null_video_fields_read_as_empty() {
        let json = r#"{"id": null, "results": [
            {"key": null, "name": null, "site": "YouTube", "type": "Trailer", "official": null}
        ]}"#;
        let videos: VideoList = serde_json::from_str(json).unwrap();
        assert_eq!(videos.id, 0);
        assert!(!videos.results[0].is_youtube_trailer());
    }

    #[test]
    fn test_video_type_field() {
        let json = r#"{"id": 1, "results": [
            {"key": "abc", "site": "YouTube", "type": "Teaser"},
            {"key": "def", "site": "Vimeo", "type": "Trailer"},
            {"key": "ghi", "site": "YouTube", "type": "Trailer"}
        ]}"#;
        let videos: VideoList = serde_json::from_str(json).unwrap();
        let trailers: Vec<_> = videos
            .results
            .iter()
            .filter(|v| v.is_youtube_trailer())
            .map(|v| v.key.as_str())
            .collect();
        assert_eq!(trailers, vec!["ghi"]);
    }
}

//! Playlist container models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::LibraryError;

/// Treat an explicit `null` like a missing field
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Album a track belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumModel {
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    /// Album artist display name
    #[serde(default, deserialize_with = "null_to_default")]
    pub artist: String,
    pub year: Option<u32>,
}

/// Track inside a playlist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackModel {
    /// Service URI of the track
    #[serde(default, deserialize_with = "null_to_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub artists: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub album: AlbumModel,
    /// Position of the track on its album
    #[serde(default, deserialize_with = "null_to_default")]
    pub index: u32,
    /// Duration as reported by the service, unit unspecified
    #[serde(default, deserialize_with = "null_to_default")]
    pub duration: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub starred: bool,
}

/// Fully loaded playlist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistModel {
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    /// Owner display name
    #[serde(default, deserialize_with = "null_to_default")]
    pub owner: String,
    pub description: Option<String>,
    /// Canonical service URI (not a web URL)
    #[serde(default, deserialize_with = "null_to_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub tracks: Vec<TrackModel>,
}

/// An entry the container walker does not know how to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Type tag of the entry (`int`, `str`, or an unknown object type)
    pub kind: String,
    pub value: String,
}

/// One entry of the flat playlist container
///
/// Folders are encoded as start/end markers around their contents, so the
/// order of entries is significant.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerEntry {
    Playlist(PlaylistModel),
    FolderStart { name: String },
    FolderEnd,
    Unrecognized(RawEntry),
}

#[derive(Deserialize)]
struct FolderStartPayload {
    name: String,
}

impl ContainerEntry {
    /// Convert one element of a JSON container snapshot
    pub fn from_json(position: usize, value: Value) -> Result<Self, LibraryError> {
        let kind = match &value {
            Value::Object(map) => match map.get("type").and_then(Value::as_str) {
                Some(kind) => kind.to_string(),
                None => "object".to_string(),
            },
            Value::Number(n) if n.is_f64() => "float".to_string(),
            Value::Number(_) => "int".to_string(),
            Value::String(_) => "str".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Null => "null".to_string(),
            Value::Array(_) => "array".to_string(),
        };

        let invalid = |source| LibraryError::InvalidEntry { position, source };

        match kind.as_str() {
            "playlist" => serde_json::from_value(value)
                .map(ContainerEntry::Playlist)
                .map_err(invalid),
            "folder_start" => serde_json::from_value::<FolderStartPayload>(value)
                .map(|f| ContainerEntry::FolderStart { name: f.name })
                .map_err(invalid),
            "folder_end" => Ok(ContainerEntry::FolderEnd),
            _ => {
                let value = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Ok(ContainerEntry::Unrecognized(RawEntry { kind, value }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_playlist_entry_with_defaults() {
        let entry = ContainerEntry::from_json(
            0,
            json!({
                "type": "playlist",
                "name": "Road Trip",
                "tracks": [{ "title": "Song", "artists": ["A", "B"] }]
            }),
        )
        .unwrap();

        let ContainerEntry::Playlist(model) = entry else {
            panic!("expected playlist");
        };
        assert_eq!(model.name, "Road Trip");
        assert_eq!(model.owner, "");
        assert_eq!(model.description, None);
        assert_eq!(model.tracks.len(), 1);
        assert!(!model.tracks[0].starred);
        assert_eq!(model.tracks[0].album.year, None);
    }

    #[test]
    fn test_folder_markers() {
        assert_eq!(
            ContainerEntry::from_json(0, json!({ "type": "folder_start", "name": "Rock" }))
                .unwrap(),
            ContainerEntry::FolderStart {
                name: "Rock".to_string()
            }
        );
        assert_eq!(
            ContainerEntry::from_json(1, json!({ "type": "folder_end" })).unwrap(),
            ContainerEntry::FolderEnd
        );
    }

    #[test]
    fn test_unrecognized_entries() {
        assert_eq!(
            ContainerEntry::from_json(0, json!(42)).unwrap(),
            ContainerEntry::Unrecognized(RawEntry {
                kind: "int".to_string(),
                value: "42".to_string()
            })
        );
        assert_eq!(
            ContainerEntry::from_json(0, json!("spotify:legacy")).unwrap(),
            ContainerEntry::Unrecognized(RawEntry {
                kind: "str".to_string(),
                value: "spotify:legacy".to_string()
            })
        );

        let entry = ContainerEntry::from_json(0, json!({ "type": "placeholder" })).unwrap();
        match entry {
            ContainerEntry::Unrecognized(raw) => assert_eq!(raw.kind, "placeholder"),
            other => panic!("unexpected entry: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_known_entry() {
        let err = ContainerEntry::from_json(3, json!({ "type": "folder_start" })).unwrap_err();
        assert!(matches!(err, LibraryError::InvalidEntry { position: 3, .. }));
    }

    #[test]
    fn test_null_metadata_falls_back_to_defaults() {
        let entry = ContainerEntry::from_json(
            0,
            json!({
                "type": "playlist",
                "name": "P",
                "owner": null,
                "link": null,
                "tracks": [{
                    "title": "t",
                    "starred": null,
                    "artists": null,
                    "index": null,
                    "duration": null,
                    "album": null
                }]
            }),
        )
        .unwrap();

        let ContainerEntry::Playlist(model) = entry else {
            panic!("expected playlist");
        };
        assert_eq!(model.owner, "");
        assert_eq!(model.link, "");
        let track = &model.tracks[0];
        assert!(!track.starred);
        assert!(track.artists.is_empty());
        assert_eq!(track.index, 0);
        assert_eq!(track.duration, 0);
        assert_eq!(track.album, AlbumModel::default());
    }

    #[test]
    fn test_playlist_without_name() {
        for value in [
            json!({ "type": "playlist" }),
            json!({ "type": "playlist", "name": null, "tracks": null }),
        ] {
            let entry = ContainerEntry::from_json(0, value).unwrap();
            let ContainerEntry::Playlist(model) = entry else {
                panic!("expected playlist");
            };
            assert_eq!(model.name, "");
            assert!(model.tracks.is_empty());
        }
    }
}

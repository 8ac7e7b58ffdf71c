//! Mapping of playlist models onto the XSPF schema
//!
//! XSPF has no field for the playlist's modification date, so none is written.

use super::document::{Element, XspfDocument};
use crate::library::{PlaylistModel, TrackModel};

pub const XSPF_VERSION: &str = "1";
pub const XSPF_NAMESPACE: &str = "http://xspf.org/ns/0/";

/// Build the XSPF document for a loaded playlist
pub fn generate_xspf(playlist: &PlaylistModel) -> XspfDocument {
    let mut root = Element::new("playlist");
    root.set_attribute("version", XSPF_VERSION);
    root.set_attribute("xmlns", XSPF_NAMESPACE);

    root.add_child("title", xml_text(&playlist.name));
    root.add_child("creator", xml_text(&playlist.owner));
    if let Some(description) = playlist.description.as_deref().filter(|d| !d.is_empty()) {
        root.add_child("annotation", xml_text(description));
    }
    root.add_child("location", xml_text(&playlist.link));

    let track_list = root.add_child("trackList", None);
    for track in &playlist.tracks {
        track_list.children.push(track_element(track));
    }

    XspfDocument { root }
}

fn track_element(track: &TrackModel) -> Element {
    let mut element = Element::new("track");
    element.add_child("location", xml_text(&track.link));
    element.add_child("title", xml_text(&track.title));
    element.add_child("creator", xml_text(&track.artists.join(",")));
    element.add_child("album", xml_text(&album_label(track)));
    element.add_child("trackNum", Some(track.index.to_string()));
    element.add_child("duration", Some(track.duration.to_string()));
    if track.starred {
        element.add_child("annotation", Some("Starred".to_string()));
    }
    element
}

/// `<album artist> - <album name> (<year>)`
fn album_label(track: &TrackModel) -> String {
    let year = track.album.year.map(|y| y.to_string()).unwrap_or_default();
    format!("{} - {} ({})", track.album.artist, track.album.name, year)
}

/// Drop characters XML 1.0 cannot carry (C0 controls other than tab, LF, CR)
fn xml_text(text: &str) -> Option<String> {
    Some(
        text.chars()
            .filter(|&c| {
                matches!(c, '\t' | '\n' | '\r')
                    || !(c < '\u{20}' || c == '\u{FFFE}' || c == '\u{FFFF}')
            })
            .collect(),
    )
}

// src/catalog/m3u.rs
//! M3U rendering of a finished movie catalog.

use super::MovieEntry;

/// Generate an extended M3U playlist from finalized entries, in the order
/// given. Render after `finalize`: the playlist and the JSON must agree on
/// numbering and order.
pub fn render_m3u(entries: &[MovieEntry]) -> String {
    let mut playlist = String::from("#EXTM3U\n");

    for entry in entries {
        playlist.push_str(&format!(
            "#EXTINF:-1 group-title=\"{group}\" tvg-id=\"{name}\" tvg-logo=\"{logo}\",{display}\n\
             {url}\n\n",
            group = attr(&entry.category_name),
            name = attr(&entry.name),
            logo = attr(&entry.stream_icon),
            display = entry.name,
            url = entry.direct_source,
        ));
    }

    playlist
}

// Double quotes would break the attribute quoting.
fn attr(value: &str) -> String {
    value.replace('"', "")
}

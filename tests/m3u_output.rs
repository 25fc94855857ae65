// tests/m3u_output.rs
use tmdb_playlist_generator::catalog::m3u::render_m3u;
use tmdb_playlist_generator::catalog::{finalize, MovieEntry};
use tmdb_playlist_generator::tmdb::types::SourceItem;

fn entry(id: u64, title: &str, date: &str, group: &str) -> MovieEntry {
    let item = SourceItem {
        id,
        title: Some(title.to_string()),
        release_date: Some(date.to_string()),
        poster_path: Some(format!("/{id}.jpg")),
        ..Default::default()
    };
    MovieEntry::from_listing(0, &item, "1", group, "http://host")
}

#[test]
fn m3u_and_json_agree_on_order() {
    let mut entries = vec![
        entry(3, "Zeta", "2001-01-01", "Drama"),
        entry(1, "Alpha", "1999-01-01", "Action"),
        entry(2, "Mid", "1994-01-01", "Drama"),
    ];
    finalize(&mut entries);
    let rendered = render_m3u(&entries);

    let json_names: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();
    let m3u_names: Vec<String> = rendered
        .lines()
        .filter(|line| line.starts_with("#EXTINF"))
        .map(|line| line.split(',').skip(1).collect::<Vec<_>>().join(","))
        .collect();
    assert_eq!(m3u_names, json_names);

    let urls: Vec<&str> = rendered
        .lines()
        .filter(|line| line.starts_with("http"))
        .collect();
    let json_urls: Vec<&str> = entries.iter().map(|e| e.direct_source.as_str()).collect();
    assert_eq!(urls, json_urls);
}

#[test]
fn every_entry_renders_one_extinf_and_one_url() {
    let mut entries = vec![
        entry(1, "One", "2000-01-01", "G"),
        entry(2, "Two", "2001-01-01", "G"),
    ];
    finalize(&mut entries);
    let rendered = render_m3u(&entries);

    assert!(rendered.starts_with("#EXTM3U\n"));
    let extinf = rendered.matches("#EXTINF:-1 ").count();
    assert_eq!(extinf, entries.len());
    // Each block ends with a blank separator line.
    assert!(rendered.ends_with("\n\n"));
}

#[test]
fn attribute_values_never_carry_quotes() {
    let mut entries = vec![entry(1, "Say \"Hi\"", "2000-01-01", "The \"G\" Group")];
    finalize(&mut entries);
    let rendered = render_m3u(&entries);
    let extinf = rendered
        .lines()
        .find(|line| line.starts_with("#EXTINF"))
        .unwrap();
    assert!(extinf.contains("group-title=\"The G Group\""));
    assert!(extinf.contains("tvg-id=\"Say Hi (2000)\""));
    // The display name after the comma keeps the original text.
    assert!(extinf.ends_with(",Say \"Hi\" (2000)"));
}

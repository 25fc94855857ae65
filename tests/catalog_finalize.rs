// tests/catalog_finalize.rs
use tmdb_playlist_generator::catalog::{finalize, MovieEntry, SeriesEntry};
use tmdb_playlist_generator::tmdb::types::SourceItem;

fn movie(id: u64, title: &str, date: &str) -> SourceItem {
    SourceItem {
        id,
        title: Some(title.to_string()),
        release_date: Some(date.to_string()),
        poster_path: Some("/p.jpg".to_string()),
        ..Default::default()
    }
}

fn entry(id: u64, title: &str, date: &str, group: &str) -> MovieEntry {
    MovieEntry::from_listing(0, &movie(id, title, date), "1", group, "http://host")
}

#[test]
fn merged_groups_renumber_densely() {
    // Arrival order interleaves three groups; provisional nums are stale.
    let mut entries = vec![
        entry(1, "C One", "2005-01-01", "Crime"),
        entry(2, "A One", "1999-01-01", "Action"),
        entry(3, "C Two", "1990-01-01", "Crime"),
        entry(4, "B One", "2010-01-01", "Bio"),
        entry(5, "A Two", "2001-01-01", "Action"),
    ];
    finalize(&mut entries);

    let nums: Vec<u32> = entries.iter().map(|e| e.num).collect();
    assert_eq!(nums, vec![1, 2, 3, 4, 5]);

    let keys: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.category_name.as_str(), e.year.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Action", "1999"),
            ("Action", "2001"),
            ("Bio", "2010"),
            ("Crime", "1990"),
            ("Crime", "2005"),
        ]
    );
}

#[test]
fn ties_keep_arrival_order() {
    let mut entries = vec![
        entry(10, "First In", "2000-03-01", "Drama"),
        entry(20, "Second In", "2000-09-01", "Drama"),
        entry(30, "Third In", "2000-12-01", "Drama"),
    ];
    finalize(&mut entries);
    let ids: Vec<u64> = entries.iter().map(|e| e.stream_id).collect();
    assert_eq!(ids, vec![10, 20, 30]);
}

#[test]
fn missing_year_leads_its_group() {
    let dated = entry(1, "Dated", "1985-05-05", "Drama");
    let mut undated = entry(2, "Undated", "1985-05-05", "Drama");
    undated.year.clear();
    let mut entries = vec![dated, undated];
    finalize(&mut entries);
    assert_eq!(entries[0].stream_id, 2);
    assert_eq!(entries[0].num, 1);
    assert_eq!(entries[1].stream_id, 1);
}

#[test]
fn series_catalogs_finalize_the_same_way() {
    let mut show = SourceItem {
        id: 1,
        name: Some("Show".to_string()),
        first_air_date: Some("2015-04-01".to_string()),
        poster_path: Some("/s.jpg".to_string()),
        ..Default::default()
    };
    let a = SeriesEntry::from_listing(0, &show, "88881", "Popular", "2024-03-01 10:00:00");
    show.id = 2;
    show.first_air_date = Some("2009-01-01".to_string());
    let b = SeriesEntry::from_listing(0, &show, "88881", "Popular", "2024-03-01 10:00:00");
    show.id = 3;
    show.first_air_date = Some("2012-01-01".to_string());
    let c = SeriesEntry::from_listing(0, &show, "99999213", "Netflix", "2024-03-01 10:00:00");

    let mut entries = vec![a, b, c];
    finalize(&mut entries);
    let order: Vec<u64> = entries.iter().map(|e| e.series_id).collect();
    // Netflix sorts before Popular; within Popular the older show leads.
    assert_eq!(order, vec![3, 2, 1]);
    assert_eq!(
        entries.iter().map(|e| e.num).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

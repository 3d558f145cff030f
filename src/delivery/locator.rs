//! Finds a client's report in a directory listing

use std::cmp::Ordering;

use crate::report::REPORT_DELIMITER;

/// The client id encoded before the last `_report`; the whole name if absent.
/// Ids may themselves contain `_report`, so decoding starts from the end.
pub fn client_prefix(file_name: &str) -> &str {
    match file_name.rfind(REPORT_DELIMITER) {
        Some(end) => &file_name[..end],
        None => file_name,
    }
}

/// Order a listing by decoded client id, as [`find_report`] requires.
///
/// Plain lexicographic order of file names is not enough: `bob@x.com_report`
/// sorts before `bob_report` while `bob` sorts before `bob@x.com`.
pub fn sort_report_files(files: &mut [String]) {
    files.sort_by(|a, b| client_prefix(a).cmp(client_prefix(b)).then_with(|| a.cmp(b)));
}

/// Binary search for `client` over `files` sorted by client prefix
pub fn find_report<'a, S: AsRef<str>>(client: &str, files: &'a [S]) -> Option<&'a str> {
    let mut lo = 0;
    let mut hi = files.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let name = files[mid].as_ref();
        match client_prefix(name).cmp(client) {
            Ordering::Equal => return Some(name),
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILES: [&str; 3] = ["acme_report.html", "bravo_report.html", "coyote_report.html"];

    #[test]
    fn test_finds_middle() {
        assert_eq!(find_report("bravo", &FILES), Some("bravo_report.html"));
    }

    #[test]
    fn test_finds_both_ends() {
        assert_eq!(find_report("acme", &FILES), Some("acme_report.html"));
        assert_eq!(find_report("coyote", &FILES), Some("coyote_report.html"));
    }

    #[test]
    fn test_absent_client() {
        assert_eq!(find_report("zeta", &FILES), None);
        assert_eq!(find_report("aardvark", &FILES), None);
        assert_eq!(find_report("bravo_", &FILES), None);
    }

    #[test]
    fn test_single_element() {
        assert_eq!(find_report("acme", &["acme_report.html"]), Some("acme_report.html"));
        assert_eq!(find_report("bravo", &["acme_report.html"]), None);
    }

    #[test]
    fn test_empty_listing() {
        let empty: [&str; 0] = [];
        assert_eq!(find_report("acme", &empty), None);
    }

    #[test]
    fn test_every_position_in_longer_listing() {
        let clients = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let files: Vec<String> = clients.iter().map(|c| format!("{c}_report.html")).collect();
        for client in clients {
            let expected = format!("{client}_report.html");
            assert_eq!(find_report(client, &files), Some(expected.as_str()));
        }
    }

    #[test]
    fn test_client_prefix() {
        assert_eq!(client_prefix("ann@example.com_report.html"), "ann@example.com");
        assert_eq!(client_prefix("notes.txt"), "notes.txt");
        assert_eq!(
            client_prefix("sales_reports@corp.com_report.html"),
            "sales_reports@corp.com"
        );
    }

    #[test]
    fn test_id_containing_delimiter() {
        let mut files = vec![
            "sales_reports@corp.com_report.html".to_string(),
            "sales@corp.com_report.html".to_string(),
            "ann@corp.com_report.html".to_string(),
        ];
        sort_report_files(&mut files);

        assert_eq!(
            find_report("sales_reports@corp.com", &files),
            Some("sales_reports@corp.com_report.html")
        );
        assert_eq!(find_report("sales", &files), None);
        assert_eq!(find_report("sales@corp.com", &files), Some("sales@corp.com_report.html"));
    }

    #[test]
    fn test_email_ids_need_prefix_order() {
        let mut files = vec![
            "bob_report.html".to_string(),
            "bob@x.com_report.html".to_string(),
            "alice@x.com_report.html".to_string(),
        ];
        files.sort();
        sort_report_files(&mut files);
        assert_eq!(files[0], "alice@x.com_report.html");
        assert_eq!(files[1], "bob_report.html");

        for client in ["bob", "bob@x.com", "alice@x.com"] {
            let found = find_report(client, &files).unwrap();
            assert_eq!(client_prefix(found), client);
        }
    }
}
